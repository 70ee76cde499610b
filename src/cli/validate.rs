use super::input::read_json;
use secret_santa::engine::{find_violation, Assignment, Problem};
use std::path::PathBuf;

/// Check a stored assignment against its problem document
///
/// Prints `valid` when every invariant holds. Otherwise returns an error
/// naming the first violation, so the process exits non-zero.
pub fn execute(input: String, assignment: String) -> Result<(), Box<dyn std::error::Error>> {
    let problem: Problem = read_json(&PathBuf::from(&input))?;
    let assignment: Assignment = read_json(&PathBuf::from(&assignment))?;

    match find_violation(&assignment, &problem.participants, &problem.restrictions) {
        None => {
            println!("valid");
            Ok(())
        }
        Some(violation) => {
            tracing::warn!(%violation, "assignment rejected");
            Err(format!("invalid assignment: {}", violation).into())
        }
    }
}
