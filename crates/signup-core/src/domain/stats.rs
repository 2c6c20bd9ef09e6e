use serde::{Deserialize, Serialize};

/// One bucket of a grouped count.
///
/// `key` is `None` for records where the grouped field is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCount {
    pub key: Option<String>,
    pub count: u64,
}

impl GroupCount {
    pub fn new(key: Option<String>, count: u64) -> Self {
        Self { key, count }
    }

    /// Sort buckets by descending count. The sort is stable, so ties keep
    /// whatever order the store produced them in; callers must not rely on
    /// tie order being the same across store implementations.
    pub fn rank(mut groups: Vec<GroupCount>) -> Vec<GroupCount> {
        groups.sort_by(|a, b| b.count.cmp(&a.count));
        groups
    }
}
