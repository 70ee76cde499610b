use super::config::SantaConfig;
use super::input::{make_rng, read_json, write_json};
use secret_santa::engine::MatchingEngine;
use secret_santa::raffle::{run_raffle, RaffleGroup, RaffleTrigger};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Run the raffle for a group document
///
/// Checks eligibility (not yet raffled, enough active members, deadline
/// passed unless `--manual`), then writes one `assigned_to` record per active
/// participant. Persisting the records and the group's `raffled` flag is up
/// to the caller.
///
/// `--now` overrides the clock for deadline checks (unix seconds).
pub fn execute(
    config: &SantaConfig,
    input: String,
    now: Option<u64>,
    manual: bool,
    seed: Option<u64>,
    output: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let group: RaffleGroup = read_json(&PathBuf::from(&input))?;

    let trigger = if manual {
        RaffleTrigger::Manual
    } else {
        let now = match now {
            Some(now) => now,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_err(|e| format!("System clock before unix epoch: {}", e))?
                .as_secs(),
        };
        RaffleTrigger::Deadline { now }
    };

    let engine = MatchingEngine::new(config.engine.clone());
    let mut rng = make_rng(seed);
    let outcome = run_raffle(&group, trigger, &engine, &mut rng)?;

    let output = output.map(PathBuf::from);
    write_json(&outcome, output.as_deref())
}
