use super::input::{read_json, write_json};
use secret_santa::engine::{analyze, Problem};
use std::path::PathBuf;

/// Report whether any valid assignment exists for a problem document
///
/// Prints the feasibility report as JSON. An infeasible problem is still a
/// successful check; only malformed input is an error.
pub fn execute(input: String) -> Result<(), Box<dyn std::error::Error>> {
    let problem: Problem = read_json(&PathBuf::from(&input))?;
    let report = analyze(&problem.participants, &problem.restrictions)?;

    if !report.feasible {
        tracing::info!(
            max_matching = report.max_matching,
            participants = report.participants,
            "problem is infeasible"
        );
    }

    write_json(&report, None)
}
