use std::collections::BTreeSet;

use crate::model::{DistinctReport, RawRecord};

/// Exact set difference of normalized names, in both directions.
///
/// No fuzzy scoring: two records are the same only when their normalized
/// text is identical. Output names are normalized, deduplicated and sorted.
pub fn find_distinct(
    left_id: &str,
    left: &[RawRecord],
    right_id: &str,
    right: &[RawRecord],
) -> DistinctReport {
    let left_set: BTreeSet<&str> = left.iter().map(|r| r.normalized.as_str()).collect();
    let right_set: BTreeSet<&str> = right.iter().map(|r| r.normalized.as_str()).collect();

    DistinctReport {
        left: left_id.to_string(),
        right: right_id.to_string(),
        left_only: left_set.difference(&right_set).map(|s| s.to_string()).collect(),
        right_only: right_set.difference(&left_set).map(|s| s.to_string()).collect(),
    }
}
