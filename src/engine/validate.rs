//! Assignment validation.
//!
//! Checks a giver → receiver map against the five assignment invariants:
//! size, bijection, no self-assignment, no restricted pair, no foreign ids.
//! Used as the engine's post-condition and by callers verifying a stored
//! assignment without re-deriving it.

use super::restrictions::RestrictionSet;
use super::types::{Assignment, Participant, ParticipantId, Restriction};
use std::collections::HashSet;
use thiserror::Error;

/// First invariant an assignment breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("participant list contains '{0}' more than once")]
    DuplicateParticipant(ParticipantId),

    #[error("assignment has {actual} givers, expected {expected}")]
    WrongSize { expected: usize, actual: usize },

    #[error("giver '{0}' is not a participant")]
    UnknownGiver(ParticipantId),

    #[error("receiver '{0}' is not a participant")]
    UnknownReceiver(ParticipantId),

    #[error("'{0}' receives more than one gift")]
    DuplicateReceiver(ParticipantId),

    #[error("'{0}' is assigned to themselves")]
    SelfAssignment(ParticipantId),

    #[error("'{giver}' → '{receiver}' is a restricted pair")]
    Restricted {
        giver: ParticipantId,
        receiver: ParticipantId,
    },
}

/// True iff `assignment` satisfies every invariant. Never panics.
pub fn validate_matching(
    assignment: &Assignment,
    participants: &[Participant],
    restrictions: &[Restriction],
) -> bool {
    find_violation(assignment, participants, restrictions).is_none()
}

/// Return the first violated invariant, or `None` for a valid assignment.
pub fn find_violation(
    assignment: &Assignment,
    participants: &[Participant],
    restrictions: &[Restriction],
) -> Option<Violation> {
    let mut known: HashSet<&ParticipantId> = HashSet::with_capacity(participants.len());
    for participant in participants {
        if !known.insert(&participant.id) {
            return Some(Violation::DuplicateParticipant(participant.id.clone()));
        }
    }

    if assignment.len() != participants.len() {
        return Some(Violation::WrongSize {
            expected: participants.len(),
            actual: assignment.len(),
        });
    }

    let restricted = RestrictionSet::new(restrictions);
    let mut received: HashSet<&ParticipantId> = HashSet::with_capacity(assignment.len());

    for (giver, receiver) in assignment.iter() {
        if !known.contains(giver) {
            return Some(Violation::UnknownGiver(giver.clone()));
        }
        if !known.contains(receiver) {
            return Some(Violation::UnknownReceiver(receiver.clone()));
        }
        if !received.insert(receiver) {
            return Some(Violation::DuplicateReceiver(receiver.clone()));
        }
        if giver == receiver {
            return Some(Violation::SelfAssignment(giver.clone()));
        }
        if restricted.contains(giver, receiver) {
            return Some(Violation::Restricted {
                giver: giver.clone(),
                receiver: receiver.clone(),
            });
        }
    }

    // Same size, unique known givers and unique known receivers: a bijection.
    None
}
