//! Property-based tests for the matching engine
//!
//! Tests for:
//! - Soundness: every returned assignment passes validation
//! - Completeness: `Impossible` only when exhaustive enumeration agrees
//! - Symmetry: restriction lookup ignores orientation
//! - Determinism: same seed produces same assignment

use super::{
    analyze, generate_matches, has_restriction, validate_matching, EngineConfig, MatchError,
    MatchingEngine, Participant, ParticipantId, Restriction,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn people(n: usize) -> Vec<Participant> {
    (1..=n).map(|i| Participant::new(i.to_string(), "")).collect()
}

// Raw index pairs may be self-pairs or repeats; both must be tolerated
fn restrictions_from(n: usize, raw: &[(usize, usize)]) -> Vec<Restriction> {
    raw.iter()
        .map(|&(a, b)| Restriction::new((a % n + 1).to_string(), (b % n + 1).to_string()))
        .collect()
}

/// Reference answer by plain enumeration, using only the linear lookup.
fn assignment_exists(participants: &[Participant], restrictions: &[Restriction]) -> bool {
    fn extend(
        ids: &[&ParticipantId],
        restrictions: &[Restriction],
        giver: usize,
        used: &mut [bool],
    ) -> bool {
        if giver == ids.len() {
            return true;
        }
        for receiver in 0..ids.len() {
            if used[receiver]
                || receiver == giver
                || has_restriction(ids[giver], ids[receiver], restrictions)
            {
                continue;
            }
            used[receiver] = true;
            if extend(ids, restrictions, giver + 1, used) {
                return true;
            }
            used[receiver] = false;
        }
        false
    }

    let ids: Vec<&ParticipantId> = participants.iter().map(|p| &p.id).collect();
    let mut used = vec![false; ids.len()];
    extend(&ids, restrictions, 0, &mut used)
}

fn backtrack_only() -> MatchingEngine {
    MatchingEngine::new(EngineConfig {
        max_random_attempts: 0,
        precheck_feasibility: false,
        ..EngineConfig::default()
    })
}

proptest! {
    /// Property test: default engine is sound and complete on small groups
    #[test]
    fn prop_generation_agrees_with_enumeration(
        n in 2usize..=7,
        raw in prop::collection::vec((0usize..7, 0usize..7), 0..12),
        seed in any::<u64>(),
    ) {
        let participants = people(n);
        let restrictions = restrictions_from(n, &raw);
        let expected = assignment_exists(&participants, &restrictions);

        let mut rng = StdRng::seed_from_u64(seed);
        match generate_matches(&participants, &restrictions, &mut rng) {
            Ok(assignment) => {
                prop_assert!(expected, "found an assignment where none should exist");
                prop_assert!(validate_matching(&assignment, &participants, &restrictions));
            }
            Err(MatchError::Impossible(_)) => {
                prop_assert!(!expected, "reported impossible for a feasible group");
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// Property test: backtracking alone reaches the same verdicts
    #[test]
    fn prop_backtracking_agrees_with_enumeration(
        n in 2usize..=7,
        raw in prop::collection::vec((0usize..7, 0usize..7), 0..12),
        seed in any::<u64>(),
    ) {
        let participants = people(n);
        let restrictions = restrictions_from(n, &raw);
        let expected = assignment_exists(&participants, &restrictions);

        let mut rng = StdRng::seed_from_u64(seed);
        let result = backtrack_only().generate(&participants, &restrictions, &mut rng);
        match result {
            Ok(assignment) => {
                prop_assert!(expected);
                prop_assert!(validate_matching(&assignment, &participants, &restrictions));
            }
            Err(MatchError::Impossible(_)) => prop_assert!(!expected),
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// Property test: feasibility report matches enumeration
    #[test]
    fn prop_analysis_agrees_with_enumeration(
        n in 2usize..=7,
        raw in prop::collection::vec((0usize..7, 0usize..7), 0..12),
    ) {
        let participants = people(n);
        let restrictions = restrictions_from(n, &raw);

        let report = analyze(&participants, &restrictions).unwrap();
        prop_assert_eq!(report.feasible, assignment_exists(&participants, &restrictions));
        prop_assert!(report.max_matching <= n);
    }

    /// Property test: no self-assignment and no restricted pair, larger groups
    #[test]
    fn prop_invariants_hold_up_to_twenty(
        n in 3usize..=20,
        raw in prop::collection::vec((0usize..20, 0usize..20), 0..6),
        seed in any::<u64>(),
    ) {
        let participants = people(n);
        let restrictions = restrictions_from(n, &raw);

        let mut rng = StdRng::seed_from_u64(seed);
        match generate_matches(&participants, &restrictions, &mut rng) {
            Ok(assignment) => {
                prop_assert_eq!(assignment.len(), n);
                for (giver, receiver) in assignment.iter() {
                    prop_assert_ne!(giver, receiver);
                    prop_assert!(!has_restriction(giver, receiver, &restrictions));
                }
            }
            Err(MatchError::Impossible(_)) => {}
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    /// Property test: restriction lookup is symmetric
    #[test]
    fn prop_restriction_symmetry(
        raw in prop::collection::vec((0usize..10, 0usize..10), 0..20),
        a in 0usize..10,
        b in 0usize..10,
    ) {
        let restrictions = restrictions_from(10, &raw);
        let a = ParticipantId::new((a + 1).to_string());
        let b = ParticipantId::new((b + 1).to_string());
        prop_assert_eq!(
            has_restriction(&a, &b, &restrictions),
            has_restriction(&b, &a, &restrictions)
        );
    }

    /// Property test: same seed, same assignment
    #[test]
    fn prop_seeded_determinism(n in 2usize..=12, seed in any::<u64>()) {
        let participants = people(n);
        let first = generate_matches(&participants, &[], &mut StdRng::seed_from_u64(seed));
        let second = generate_matches(&participants, &[], &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(first, second);
    }
}
