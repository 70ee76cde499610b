//! Restriction lookup.
//!
//! Restrictions are symmetric. Callers may store each pair once in either
//! orientation, or twice (once per direction); lookups never depend on which.

use super::types::{ParticipantId, Restriction};
use std::collections::HashSet;

/// True iff `{a, b}` appears in `restrictions` in either orientation.
///
/// Linear scan, no assumption about storage order.
pub fn has_restriction(a: &ParticipantId, b: &ParticipantId, restrictions: &[Restriction]) -> bool {
    restrictions.iter().any(|r| r.matches(a, b))
}

/// Deduplicated restriction lookup in O(1).
///
/// Mirrored and repeated entries collapse into one logical constraint and
/// self-pairs are dropped.
#[derive(Debug, Clone, Default)]
pub struct RestrictionSet {
    pairs: HashSet<(ParticipantId, ParticipantId)>,
}

impl RestrictionSet {
    pub fn new<'a>(restrictions: impl IntoIterator<Item = &'a Restriction>) -> Self {
        let pairs = restrictions
            .into_iter()
            .filter(|r| !r.is_self_pair())
            .map(Restriction::normalized)
            .collect();
        Self { pairs }
    }

    pub fn contains(&self, a: &ParticipantId, b: &ParticipantId) -> bool {
        let key = if a <= b {
            (a.clone(), b.clone())
        } else {
            (b.clone(), a.clone())
        };
        self.pairs.contains(&key)
    }

    /// Number of logical constraints.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(ParticipantId, ParticipantId)> {
        self.pairs.iter()
    }
}

impl<'a> FromIterator<&'a Restriction> for RestrictionSet {
    fn from_iter<I: IntoIterator<Item = &'a Restriction>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: &str) -> ParticipantId {
        ParticipantId::new(id)
    }

    #[test]
    fn test_has_restriction_either_orientation() {
        let restrictions = vec![Restriction::new("1", "2")];
        assert!(has_restriction(&pid("1"), &pid("2"), &restrictions));
        assert!(has_restriction(&pid("2"), &pid("1"), &restrictions));
    }

    #[test]
    fn test_has_restriction_absent() {
        let restrictions = vec![Restriction::new("1", "2")];
        assert!(!has_restriction(&pid("1"), &pid("3"), &restrictions));
        assert!(!has_restriction(&pid("3"), &pid("4"), &[]));
    }

    #[test]
    fn test_has_restriction_reverse_storage() {
        // Stored as (b, a); asked as (a, b)
        let restrictions = vec![Restriction::new("z", "a")];
        assert!(has_restriction(&pid("a"), &pid("z"), &restrictions));
    }

    #[test]
    fn test_set_collapses_duplicates() {
        let restrictions = vec![
            Restriction::new("1", "2"),
            Restriction::new("2", "1"),
            Restriction::new("1", "2"),
        ];
        let set = RestrictionSet::new(&restrictions);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&pid("1"), &pid("2")));
        assert!(set.contains(&pid("2"), &pid("1")));
    }

    #[test]
    fn test_set_drops_self_pairs() {
        let restrictions = vec![Restriction::new("1", "1"), Restriction::new("1", "2")];
        let set: RestrictionSet = restrictions.iter().collect();
        assert_eq!(set.len(), 1);
        assert!(!set.contains(&pid("1"), &pid("1")));
    }

    #[test]
    fn test_set_agrees_with_linear_lookup() {
        let restrictions = vec![
            Restriction::new("1", "2"),
            Restriction::new("4", "3"),
            Restriction::new("5", "1"),
        ];
        let set = RestrictionSet::new(&restrictions);
        let ids = ["1", "2", "3", "4", "5", "6"];
        for a in ids {
            for b in ids {
                if a == b {
                    continue;
                }
                assert_eq!(
                    set.contains(&pid(a), &pid(b)),
                    has_restriction(&pid(a), &pid(b), &restrictions),
                    "disagreement on ({a}, {b})"
                );
            }
        }
    }
}
