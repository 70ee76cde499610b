//! Secret Santa - gift exchange assignment engine
//!
//! Computes who gives to whom for a group, honoring pairwise restrictions.
//!
//! Key principles:
//! - Pure computation (no I/O, no shared state)
//! - Explicit randomness (seedable for replay)
//! - "Impossible" only on proof, never on bad luck
//! - Every result passes the validator before it is returned

pub mod engine;
pub mod raffle;
