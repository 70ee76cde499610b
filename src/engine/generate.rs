//! Assignment generation.
//!
//! Hybrid search:
//! - Phase 0: fast infeasibility checks (isolated participant, perfect matching)
//! - Phase 1: uniform random shuffles until one is a valid derangement
//! - Phase 2: randomized depth-first backtracking with forward checking
//!
//! `MatchError::Impossible` is only returned on proof (phase 0 or an exhausted
//! phase 2), never because shuffles got unlucky.

use super::config::EngineConfig;
use super::error::MatchError;
use super::feasibility::max_matching_size;
use super::roster::Roster;
use super::types::{Assignment, Participant, Restriction};
use super::validate::find_violation;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, info, warn};

/// Stateless matcher. Safe to share across threads; all randomness comes in
/// through the `rng` argument.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: EngineConfig,
}

impl MatchingEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute a random valid assignment.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: fewer than two participants, duplicate ids, or a
    ///   restriction naming an unknown participant
    /// - `Impossible`: no assignment satisfies the restrictions
    /// - `Timeout`: backtracking budget spent without an answer
    /// - `Internal`: the result failed its post-condition check
    pub fn generate<R: Rng + ?Sized>(
        &self,
        participants: &[Participant],
        restrictions: &[Restriction],
        rng: &mut R,
    ) -> Result<Assignment, MatchError> {
        let roster = Roster::build(participants, restrictions)?;
        debug!(
            participants = roster.len(),
            restrictions = roster.logical_restrictions(),
            "matching started"
        );

        self.ensure_feasible(&roster)?;

        let receivers = match self.random_phase(&roster, rng) {
            Some(receivers) => receivers,
            None => {
                warn!(
                    attempts = self.config.max_random_attempts,
                    "random search exhausted, falling back to backtracking"
                );
                self.backtrack_phase(&roster, rng)?
            }
        };

        let assignment = roster.to_assignment(&receivers);
        if let Some(violation) = find_violation(&assignment, participants, restrictions) {
            error!(%violation, "generated assignment failed validation");
            return Err(MatchError::Internal(format!(
                "generated assignment failed validation: {}",
                violation
            )));
        }

        info!(participants = assignment.len(), "matching complete");
        Ok(assignment)
    }

    fn ensure_feasible(&self, roster: &Roster<'_>) -> Result<(), MatchError> {
        if let Some(id) = roster.isolated().first() {
            warn!("participant restricted from everyone");
            return Err(MatchError::Impossible(format!(
                "participant '{}' is restricted from every other participant",
                id
            )));
        }

        if self.config.precheck_feasibility {
            let matched = max_matching_size(roster);
            if matched < roster.len() {
                warn!(matched, participants = roster.len(), "no perfect matching");
                return Err(MatchError::Impossible(format!(
                    "restrictions leave at most {} of {} participants with a distinct receiver",
                    matched,
                    roster.len()
                )));
            }
        }

        Ok(())
    }

    fn random_phase<R: Rng + ?Sized>(&self, roster: &Roster<'_>, rng: &mut R) -> Option<Vec<usize>> {
        let mut receivers: Vec<usize> = (0..roster.len()).collect();

        for attempt in 1..=self.config.max_random_attempts {
            receivers.shuffle(rng);
            if roster.accepts(&receivers) {
                debug!(attempt, "random shuffle accepted");
                return Some(receivers);
            }
        }

        None
    }

    fn backtrack_phase<R: Rng + ?Sized>(
        &self,
        roster: &Roster<'_>,
        rng: &mut R,
    ) -> Result<Vec<usize>, MatchError> {
        let mut search = Backtracker::new(roster, self.config.max_backtrack_steps, rng);

        if search.extend(0)? {
            debug!(steps = search.steps, "backtracking found an assignment");
            Ok(search.receivers)
        } else {
            warn!(steps = search.steps, "backtracking exhausted the search space");
            Err(MatchError::Impossible(
                "no assignment satisfies the restrictions (exhaustive search)".to_string(),
            ))
        }
    }
}

/// Compute a random valid assignment with the default configuration.
pub fn generate_matches<R: Rng + ?Sized>(
    participants: &[Participant],
    restrictions: &[Restriction],
    rng: &mut R,
) -> Result<Assignment, MatchError> {
    MatchingEngine::default().generate(participants, restrictions, rng)
}

////////////////////////////////////////////////////////////////////////////////
// Depth-first search

struct Backtracker<'r, 'a> {
    roster: &'r Roster<'a>,
    /// Givers in visiting order: fewest allowed receivers first.
    order: Vec<usize>,
    /// Allowed receivers per giver, in randomized trial order.
    candidates: Vec<Vec<usize>>,
    taken: Vec<bool>,
    receivers: Vec<usize>,
    steps: u64,
    max_steps: u64,
}

impl<'r, 'a> Backtracker<'r, 'a> {
    fn new<R: Rng + ?Sized>(roster: &'r Roster<'a>, max_steps: u64, rng: &mut R) -> Self {
        let n = roster.len();

        // Shuffle first so the stable sort breaks ties randomly
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        order.sort_by_key(|&giver| roster.allowed_count(giver));

        let candidates = (0..n)
            .map(|giver| {
                let mut allowed: Vec<usize> = roster.allowed_receivers(giver).collect();
                allowed.shuffle(rng);
                allowed
            })
            .collect();

        Self {
            roster,
            order,
            candidates,
            taken: vec![false; n],
            receivers: vec![usize::MAX; n],
            steps: 0,
            max_steps,
        }
    }

    /// Assign givers `order[depth..]`. `Ok(false)` means this branch is exhausted.
    fn extend(&mut self, depth: usize) -> Result<bool, MatchError> {
        if depth == self.order.len() {
            return Ok(true);
        }

        let giver = self.order[depth];
        for k in 0..self.candidates[giver].len() {
            let receiver = self.candidates[giver][k];
            if self.taken[receiver] {
                continue;
            }

            self.steps += 1;
            if self.steps > self.max_steps {
                return Err(MatchError::Timeout {
                    steps: self.max_steps,
                });
            }

            self.taken[receiver] = true;
            self.receivers[giver] = receiver;

            if !self.dead_end(depth + 1) && self.extend(depth + 1)? {
                return Ok(true);
            }

            self.taken[receiver] = false;
            self.receivers[giver] = usize::MAX;
        }

        Ok(false)
    }

    /// Forward check: some unassigned giver has no free receiver left.
    fn dead_end(&self, depth: usize) -> bool {
        self.order[depth..].iter().any(|&giver| {
            self.candidates[giver]
                .iter()
                .all(|&receiver| self.taken[receiver])
        })
    }
}
