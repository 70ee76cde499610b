//! Feasibility analysis via bipartite perfect matching.
//!
//! A valid assignment is exactly a perfect matching in the bipartite graph
//! whose left side is givers, right side is receivers, and whose edges are the
//! allowed (non-self, non-restricted) pairs. No perfect matching means no
//! assignment exists, which gives a polynomial-time infeasibility proof.
//!
//! Uses petgraph's maximum matching (Gabow's variant of Edmonds' algorithm).

use super::error::MatchError;
use super::roster::Roster;
use super::types::{Participant, ParticipantId, Restriction};
use petgraph::algo::maximum_matching;
use petgraph::graph::UnGraph;
use serde::Serialize;

/// Outcome of [`analyze`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeasibilityReport {
    /// Number of participants.
    pub participants: usize,
    /// Restrictions after dropping duplicates, mirrors and self-pairs.
    pub logical_restrictions: usize,
    /// Participants restricted from everyone else.
    pub isolated: Vec<ParticipantId>,
    /// Size of a maximum giver/receiver matching.
    pub max_matching: usize,
    /// True iff a valid assignment exists.
    pub feasible: bool,
}

/// Decide whether any valid assignment exists.
///
/// Fails with `InvalidInput` under the same rules as generation.
pub fn analyze(
    participants: &[Participant],
    restrictions: &[Restriction],
) -> Result<FeasibilityReport, MatchError> {
    let roster = Roster::build(participants, restrictions)?;
    let max_matching = max_matching_size(&roster);

    Ok(FeasibilityReport {
        participants: roster.len(),
        logical_restrictions: roster.logical_restrictions(),
        isolated: roster.isolated().into_iter().cloned().collect(),
        max_matching,
        feasible: max_matching == roster.len(),
    })
}

/// Size of a maximum matching between givers and allowed receivers.
pub(crate) fn max_matching_size(roster: &Roster<'_>) -> usize {
    let n = roster.len();
    let mut graph = UnGraph::<(), ()>::with_capacity(2 * n, n * n);

    let givers: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();
    let receivers: Vec<_> = (0..n).map(|_| graph.add_node(())).collect();

    for (giver, &giver_node) in givers.iter().enumerate() {
        for receiver in roster.allowed_receivers(giver) {
            graph.add_edge(giver_node, receivers[receiver], ());
        }
    }

    maximum_matching(&graph).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people(n: usize) -> Vec<Participant> {
        (1..=n).map(|i| Participant::new(i.to_string(), "")).collect()
    }

    #[test]
    fn test_unrestricted_is_feasible() {
        let report = analyze(&people(5), &[]).unwrap();
        assert!(report.feasible);
        assert_eq!(report.max_matching, 5);
        assert!(report.isolated.is_empty());
    }

    #[test]
    fn test_two_restricted_is_infeasible() {
        let report = analyze(&people(2), &[Restriction::new("1", "2")]).unwrap();
        assert!(!report.feasible);
        assert_eq!(report.isolated.len(), 2);
    }

    #[test]
    fn test_fully_restricted_participant() {
        let restrictions = vec![
            Restriction::new("1", "2"),
            Restriction::new("1", "3"),
            Restriction::new("1", "4"),
        ];
        let report = analyze(&people(4), &restrictions).unwrap();
        assert!(!report.feasible);
        assert_eq!(report.isolated, vec![ParticipantId::new("1")]);
        assert_eq!(report.logical_restrictions, 3);
    }

    #[test]
    fn test_hall_violation_without_isolated_member() {
        // 1, 2 and 3 are restricted from each other, so all three compete for
        // receivers 4 and 5.
        let restrictions = vec![
            Restriction::new("1", "2"),
            Restriction::new("1", "3"),
            Restriction::new("2", "3"),
        ];
        let report = analyze(&people(5), &restrictions).unwrap();
        assert!(report.isolated.is_empty());
        assert!(!report.feasible);
        assert_eq!(report.max_matching, 4);
    }

    #[test]
    fn test_three_couples_feasible() {
        let restrictions = vec![
            Restriction::new("1", "2"),
            Restriction::new("3", "4"),
            Restriction::new("5", "6"),
        ];
        let report = analyze(&people(6), &restrictions).unwrap();
        assert!(report.feasible);
        assert_eq!(report.logical_restrictions, 3);
    }

    #[test]
    fn test_invalid_input_propagates() {
        let result = analyze(&people(1), &[]);
        assert!(matches!(result, Err(MatchError::InvalidInput(_))));
    }
}
