//! Validated, index-based view of a problem.
//!
//! Search works on dense indices into the participant list; ids are only
//! touched again when the final assignment is built.

use super::error::MatchError;
use super::restrictions::RestrictionSet;
use super::types::{Assignment, Participant, ParticipantId, Restriction};
use std::collections::HashMap;

/// Smallest group the engine will match.
pub const MIN_PARTICIPANTS: usize = 2;

pub(crate) struct Roster<'a> {
    ids: Vec<&'a ParticipantId>,
    /// `allowed[giver][receiver]`: neither self nor restricted.
    allowed: Vec<Vec<bool>>,
    logical_restrictions: usize,
}

impl<'a> Roster<'a> {
    /// Check referential integrity and compile the symmetric allowed matrix.
    pub fn build(
        participants: &'a [Participant],
        restrictions: &[Restriction],
    ) -> Result<Self, MatchError> {
        if participants.len() < MIN_PARTICIPANTS {
            return Err(MatchError::InvalidInput(format!(
                "need at least {} participants, got {}",
                MIN_PARTICIPANTS,
                participants.len()
            )));
        }

        let mut index: HashMap<&ParticipantId, usize> = HashMap::with_capacity(participants.len());
        for (i, participant) in participants.iter().enumerate() {
            if index.insert(&participant.id, i).is_some() {
                return Err(MatchError::InvalidInput(format!(
                    "duplicate participant id '{}'",
                    participant.id
                )));
            }
        }

        for restriction in restrictions {
            for id in [&restriction.a, &restriction.b] {
                if !index.contains_key(id) {
                    return Err(MatchError::InvalidInput(format!(
                        "restriction references unknown participant '{}'",
                        id
                    )));
                }
            }
        }

        let set = RestrictionSet::new(restrictions);
        let n = participants.len();
        let mut allowed = vec![vec![true; n]; n];
        for (i, row) in allowed.iter_mut().enumerate() {
            row[i] = false;
        }
        for (a, b) in set.iter() {
            let (i, j) = (index[a], index[b]);
            allowed[i][j] = false;
            allowed[j][i] = false;
        }

        Ok(Self {
            ids: participants.iter().map(|p| &p.id).collect(),
            allowed,
            logical_restrictions: set.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn id(&self, index: usize) -> &'a ParticipantId {
        self.ids[index]
    }

    pub fn logical_restrictions(&self) -> usize {
        self.logical_restrictions
    }

    pub fn is_allowed(&self, giver: usize, receiver: usize) -> bool {
        self.allowed[giver][receiver]
    }

    pub fn allowed_receivers(&self, giver: usize) -> impl Iterator<Item = usize> + '_ {
        self.allowed[giver]
            .iter()
            .enumerate()
            .filter(|(_, ok)| **ok)
            .map(|(receiver, _)| receiver)
    }

    pub fn allowed_count(&self, giver: usize) -> usize {
        self.allowed[giver].iter().filter(|&&ok| ok).count()
    }

    /// Participants restricted from everyone else (no possible receiver).
    pub fn isolated(&self) -> Vec<&'a ParticipantId> {
        (0..self.len())
            .filter(|&i| self.allowed_count(i) == 0)
            .map(|i| self.ids[i])
            .collect()
    }

    /// True if `receivers[giver]` is a valid derangement under the restrictions.
    /// Assumes `receivers` is a permutation of `0..len`.
    pub fn accepts(&self, receivers: &[usize]) -> bool {
        receivers
            .iter()
            .enumerate()
            .all(|(giver, &receiver)| self.is_allowed(giver, receiver))
    }

    pub fn to_assignment(&self, receivers: &[usize]) -> Assignment {
        receivers
            .iter()
            .enumerate()
            .map(|(giver, &receiver)| (self.ids[giver].clone(), self.ids[receiver].clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(n: usize) -> Vec<Participant> {
        (1..=n)
            .map(|i| Participant::new(i.to_string(), format!("P{i}")))
            .collect()
    }

    #[test]
    fn test_rejects_single_participant() {
        let participants = people(1);
        let result = Roster::build(&participants, &[]);
        assert!(matches!(result, Err(MatchError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut participants = people(3);
        participants.push(Participant::new("2", "Again"));
        let result = Roster::build(&participants, &[]);
        assert!(matches!(result, Err(MatchError::InvalidInput(msg)) if msg.contains("'2'")));
    }

    #[test]
    fn test_rejects_unknown_restriction_id() {
        let participants = people(3);
        let result = Roster::build(&participants, &[Restriction::new("1", "9")]);
        assert!(matches!(result, Err(MatchError::InvalidInput(msg)) if msg.contains("'9'")));
    }

    #[test]
    fn test_matrix_is_symmetric_and_irreflexive() {
        let participants = people(4);
        let roster = Roster::build(&participants, &[Restriction::new("2", "1")]).unwrap();
        for i in 0..4 {
            assert!(!roster.is_allowed(i, i));
        }
        assert!(!roster.is_allowed(0, 1));
        assert!(!roster.is_allowed(1, 0));
        assert!(roster.is_allowed(0, 2));
        assert_eq!(roster.allowed_count(0), 2);
        assert_eq!(roster.allowed_count(2), 3);
        assert_eq!(roster.logical_restrictions(), 1);
    }

    #[test]
    fn test_self_pair_is_tolerated() {
        let participants = people(3);
        let roster = Roster::build(&participants, &[Restriction::new("1", "1")]).unwrap();
        assert_eq!(roster.logical_restrictions(), 0);
        assert_eq!(roster.allowed_count(0), 2);
    }

    #[test]
    fn test_isolated_participant() {
        let participants = people(4);
        let restrictions = vec![
            Restriction::new("1", "2"),
            Restriction::new("1", "3"),
            Restriction::new("4", "1"),
        ];
        let roster = Roster::build(&participants, &restrictions).unwrap();
        assert_eq!(roster.isolated(), vec![&participants[0].id]);
    }

    #[test]
    fn test_accepts_and_to_assignment() {
        let participants = people(3);
        let roster = Roster::build(&participants, &[]).unwrap();
        assert!(roster.accepts(&[1, 2, 0]));
        assert!(!roster.accepts(&[0, 2, 1]));

        let assignment = roster.to_assignment(&[1, 2, 0]);
        assert_eq!(
            assignment.receiver_for(&participants[2].id),
            Some(&participants[0].id)
        );
    }
}
