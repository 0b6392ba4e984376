use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// The set of users a follow or unfollow applies to.
///
/// A single id and a list are both accepted and collapse into the same
/// deduplicated set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct FollowTargets(BTreeSet<Uuid>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(Uuid),
    Many(Vec<Uuid>),
}

impl From<OneOrMany> for FollowTargets {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(id) => id.into(),
            OneOrMany::Many(ids) => ids.into(),
        }
    }
}

impl FollowTargets {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.0.contains(id)
    }

    /// Returns the targets without `id`.
    pub fn without(&self, id: &Uuid) -> Self {
        self.0.iter().filter(|target| *target != id).copied().collect()
    }

    pub fn to_vec(&self) -> Vec<Uuid> {
        self.0.iter().copied().collect()
    }
}

impl From<Uuid> for FollowTargets {
    fn from(id: Uuid) -> Self {
        FollowTargets(BTreeSet::from([id]))
    }
}

impl From<Vec<Uuid>> for FollowTargets {
    fn from(ids: Vec<Uuid>) -> Self {
        ids.into_iter().collect()
    }
}

impl FromIterator<Uuid> for FollowTargets {
    fn from_iter<I: IntoIterator<Item = Uuid>>(iter: I) -> Self {
        FollowTargets(iter.into_iter().collect())
    }
}

/// Outcome of a follow or unfollow call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FollowSummary {
    /// Number of distinct target users in the request
    pub requested: usize,
    /// Number of edges actually created or removed
    pub changed: u64,
}
