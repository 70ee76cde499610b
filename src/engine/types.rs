//! Core data model: participants, restrictions, assignments.

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

/// Opaque participant identifier, unique within a group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ParticipantId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ParticipantId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A member of the exchange.
///
/// Identity is by `id` only. `name` is for display and never read by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,

    #[serde(default)]
    pub name: String,
}

impl Participant {
    pub fn new(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Unordered pair of participants who must not give to each other.
///
/// Storage orientation carries no meaning: `{a, b}` forbids both `a → b` and `b → a`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Restriction {
    pub a: ParticipantId,
    pub b: ParticipantId,
}

impl Restriction {
    pub fn new(a: impl Into<ParticipantId>, b: impl Into<ParticipantId>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }

    /// True if this restriction covers the pair in either orientation.
    pub fn matches(&self, x: &ParticipantId, y: &ParticipantId) -> bool {
        (self.a == *x && self.b == *y) || (self.a == *y && self.b == *x)
    }

    /// Self-pairs add nothing: self-assignment is already forbidden.
    pub fn is_self_pair(&self) -> bool {
        self.a == self.b
    }

    /// Canonical (smaller, larger) form used for deduplication.
    pub fn normalized(&self) -> (ParticipantId, ParticipantId) {
        if self.a <= self.b {
            (self.a.clone(), self.b.clone())
        } else {
            (self.b.clone(), self.a.clone())
        }
    }
}

/// Giver → receiver mapping.
///
/// Ordered by giver so serialized output is stable. Any map can be held here,
/// including malformed ones; use [`crate::engine::validate_matching`] before
/// trusting it. Deserializing rejects a giver listed twice, so a stored
/// document cannot hide an entry behind a later one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Assignment(BTreeMap<ParticipantId, ParticipantId>);

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `giver → receiver`, returning the previous receiver if any.
    pub fn insert(
        &mut self,
        giver: ParticipantId,
        receiver: ParticipantId,
    ) -> Option<ParticipantId> {
        self.0.insert(giver, receiver)
    }

    /// Receiver for a giver. This is the only slice of the assignment a
    /// participant is ever shown.
    pub fn receiver_for(&self, giver: &ParticipantId) -> Option<&ParticipantId> {
        self.0.get(giver)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(giver, receiver)` pairs in giver order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &ParticipantId)> {
        self.0.iter()
    }

    pub fn givers(&self) -> impl Iterator<Item = &ParticipantId> {
        self.0.keys()
    }

    pub fn receivers(&self) -> impl Iterator<Item = &ParticipantId> {
        self.0.values()
    }
}

impl<'de> Deserialize<'de> for Assignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AssignmentVisitor;

        impl<'de> Visitor<'de> for AssignmentVisitor {
            type Value = Assignment;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of giver id to receiver id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Assignment, A::Error> {
                let mut entries = BTreeMap::new();
                while let Some((giver, receiver)) =
                    map.next_entry::<ParticipantId, ParticipantId>()?
                {
                    match entries.entry(giver) {
                        Entry::Occupied(slot) => {
                            return Err(de::Error::custom(format!(
                                "giver '{}' appears more than once",
                                slot.key()
                            )));
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(receiver);
                        }
                    }
                }
                Ok(Assignment(entries))
            }
        }

        deserializer.deserialize_map(AssignmentVisitor)
    }
}

impl FromIterator<(ParticipantId, ParticipantId)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (ParticipantId, ParticipantId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One group's matching input, as supplied by the group store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Problem {
    pub participants: Vec<Participant>,

    #[serde(default)]
    pub restrictions: Vec<Restriction>,
}
