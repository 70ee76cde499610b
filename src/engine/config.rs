//! Engine tuning knobs.

use serde::{Deserialize, Serialize};

/// Default number of uniform shuffles tried before backtracking.
pub const DEFAULT_MAX_RANDOM_ATTEMPTS: usize = 1000;

/// Default ceiling on backtracking node visits.
pub const DEFAULT_MAX_BACKTRACK_STEPS: u64 = 1_000_000;

/// Search budgets for [`crate::engine::MatchingEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Shuffles tried before falling back to backtracking. Zero skips the
    /// random phase entirely.
    pub max_random_attempts: usize,

    /// Node visits allowed in the backtracking search. Running out without a
    /// proof yields `MatchError::Timeout`.
    pub max_backtrack_steps: u64,

    /// Prove infeasibility up front with a perfect-matching check.
    pub precheck_feasibility: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_random_attempts: DEFAULT_MAX_RANDOM_ATTEMPTS,
            max_backtrack_steps: DEFAULT_MAX_BACKTRACK_STEPS,
            precheck_feasibility: true,
        }
    }
}
