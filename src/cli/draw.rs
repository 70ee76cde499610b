use super::config::SantaConfig;
use super::input::{make_rng, read_json, write_json};
use secret_santa::engine::{MatchingEngine, Problem};
use std::path::PathBuf;

/// Compute an assignment for a problem document
///
/// Reads `{participants, restrictions}` from `input`, runs the matching
/// engine with the configured budgets and writes the giver → receiver map as
/// JSON to `output` (stdout by default).
///
/// `--seed` makes the draw reproducible; without it every run may differ.
pub fn execute(
    config: &SantaConfig,
    input: String,
    seed: Option<u64>,
    output: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let problem: Problem = read_json(&PathBuf::from(&input))?;
    tracing::debug!(input = %input, seeded = seed.is_some(), "draw requested");

    let engine = MatchingEngine::new(config.engine.clone());
    let mut rng = make_rng(seed);
    let assignment = engine.generate(&problem.participants, &problem.restrictions, &mut rng)?;

    let output = output.map(PathBuf::from);
    write_json(&assignment, output.as_deref())
}
