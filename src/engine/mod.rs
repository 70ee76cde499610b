//! Matching engine: gift assignments under pairwise restrictions.
//!
//! Given a group's participants and restricted pairs, produce a random
//! bijection giver → receiver with no self-assignment and no restricted pair
//! (a constrained derangement), or fail explicitly when none exists.
//!
//! - Generation: random shuffles, then randomized backtracking
//! - Validation: independent check of the assignment invariants
//! - Feasibility: perfect-matching proof of (in)feasibility
//!
//! Everything here is pure and synchronous. No I/O, no shared state.

pub mod config;
pub mod error;
pub mod feasibility;
pub mod generate;
pub mod restrictions;
pub mod types;
pub mod validate;

mod roster;

#[cfg(test)]
mod proptests;

pub use config::EngineConfig;
pub use error::MatchError;
pub use feasibility::{analyze, FeasibilityReport};
pub use generate::{generate_matches, MatchingEngine};
pub use restrictions::{has_restriction, RestrictionSet};
pub use roster::MIN_PARTICIPANTS;
pub use types::{Assignment, Participant, ParticipantId, Problem, Restriction};
pub use validate::{find_violation, validate_matching, Violation};
