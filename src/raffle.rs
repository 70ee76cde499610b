//! Raffle: one-shot assignment for a group.
//!
//! The pure part of the raffle trigger contract:
//! - Only active (non-kicked) members take part
//! - At least `MIN_RAFFLE_PARTICIPANTS` active members
//! - Deadline passed, unless triggered manually by the organizer
//! - At most once per group (`raffled` flag)
//!
//! Scheduling and persisting the outcome (and the `raffled` flag) belong to
//! the caller. `run_raffle` never mutates the group.

use crate::engine::{MatchError, MatchingEngine, Participant, ParticipantId, Restriction};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info};

/// Smallest group allowed to raffle.
pub const MIN_RAFFLE_PARTICIPANTS: usize = 3;

/// Group member as held by the group store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: ParticipantId,

    #[serde(default)]
    pub name: String,

    /// Removed by the organizer; excluded from the raffle.
    #[serde(default)]
    pub kicked: bool,
}

/// Group snapshot supplied to the raffle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleGroup {
    pub group_id: String,

    pub members: Vec<GroupMember>,

    #[serde(default)]
    pub restrictions: Vec<Restriction>,

    /// Unix seconds after which the raffle may run.
    #[serde(default)]
    pub deadline: Option<u64>,

    /// Set once an assignment has been persisted for this group.
    #[serde(default)]
    pub raffled: bool,
}

impl RaffleGroup {
    /// Members still taking part, as engine participants.
    pub fn active_participants(&self) -> Vec<Participant> {
        self.members
            .iter()
            .filter(|m| !m.kicked)
            .map(|m| Participant {
                id: m.id.clone(),
                name: m.name.clone(),
            })
            .collect()
    }
}

/// What started the raffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaffleTrigger {
    /// Scheduled check at `now` (unix seconds).
    Deadline { now: u64 },
    /// Organizer override: ignores the deadline.
    Manual,
}

/// Per-participant result record. Each participant is only ever shown their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedTo {
    pub participant_id: ParticipantId,
    pub assigned_to: ParticipantId,
}

/// Complete raffle result, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaffleOutcome {
    pub group_id: String,
    pub assignments: Vec<AssignedTo>,
}

/// Raffle errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RaffleError {
    #[error("group has already been raffled")]
    AlreadyRaffled,

    #[error("need at least {required} active participants, have {active}")]
    NotEnoughParticipants { active: usize, required: usize },

    #[error("group has no deadline; trigger the raffle manually")]
    NoDeadline,

    #[error("deadline {deadline} not reached (now {now})")]
    DeadlineNotReached { deadline: u64, now: u64 },

    #[error(transparent)]
    Matching(#[from] MatchError),
}

/// Check raffle preconditions, returning the active participants.
pub fn check_eligibility(
    group: &RaffleGroup,
    trigger: RaffleTrigger,
) -> Result<Vec<Participant>, RaffleError> {
    if group.raffled {
        return Err(RaffleError::AlreadyRaffled);
    }

    let participants = group.active_participants();
    if participants.len() < MIN_RAFFLE_PARTICIPANTS {
        return Err(RaffleError::NotEnoughParticipants {
            active: participants.len(),
            required: MIN_RAFFLE_PARTICIPANTS,
        });
    }

    if let RaffleTrigger::Deadline { now } = trigger {
        let deadline = group.deadline.ok_or(RaffleError::NoDeadline)?;
        if now < deadline {
            return Err(RaffleError::DeadlineNotReached { deadline, now });
        }
    }

    Ok(participants)
}

/// Run the raffle for an eligible group.
///
/// Restrictions naming kicked members are dropped: they no longer constrain
/// anyone taking part. A restriction naming an id that was never a member is
/// `MatchError::InvalidInput`.
pub fn run_raffle<R: Rng + ?Sized>(
    group: &RaffleGroup,
    trigger: RaffleTrigger,
    engine: &MatchingEngine,
    rng: &mut R,
) -> Result<RaffleOutcome, RaffleError> {
    let participants = check_eligibility(group, trigger)?;

    let members: HashSet<&ParticipantId> = group.members.iter().map(|m| &m.id).collect();
    if let Some(unknown) = group
        .restrictions
        .iter()
        .flat_map(|r| [&r.a, &r.b])
        .find(|id| !members.contains(id))
    {
        return Err(MatchError::InvalidInput(format!(
            "restriction references unknown participant '{}'",
            unknown
        ))
        .into());
    }

    let active: HashSet<&ParticipantId> = participants.iter().map(|p| &p.id).collect();
    let restrictions: Vec<Restriction> = group
        .restrictions
        .iter()
        .filter(|r| active.contains(&r.a) && active.contains(&r.b))
        .cloned()
        .collect();

    let dropped = group.restrictions.len() - restrictions.len();
    if dropped > 0 {
        debug!(group = %group.group_id, dropped, "ignoring restrictions on inactive members");
    }

    let assignment = engine.generate(&participants, &restrictions, rng)?;

    let assignments = assignment
        .iter()
        .map(|(giver, receiver)| AssignedTo {
            participant_id: giver.clone(),
            assigned_to: receiver.clone(),
        })
        .collect();

    info!(group = %group.group_id, participants = participants.len(), "raffle complete");

    Ok(RaffleOutcome {
        group_id: group.group_id.clone(),
        assignments,
    })
}
