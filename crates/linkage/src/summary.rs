use std::collections::BTreeMap;

use crate::model::{Cluster, MatchMethod, MatchSummary};

/// Compute summary statistics from finalized clusters.
pub fn compute_summary(
    clusters: &[Cluster],
    pairs_compared: usize,
    candidates: usize,
    discarded_clusters: usize,
) -> MatchSummary {
    let mut clusters_by_coverage: BTreeMap<usize, usize> = BTreeMap::new();
    let mut records_linked = 0;
    let mut exact_members = 0;
    let mut fuzzy_members = 0;

    for c in clusters {
        *clusters_by_coverage.entry(c.coverage()).or_insert(0) += 1;
        records_linked += c.members.len();
        for m in &c.members {
            match m.method {
                MatchMethod::ExactKey => exact_members += 1,
                MatchMethod::Fuzzy => fuzzy_members += 1,
            }
        }
    }

    MatchSummary {
        pairs_compared,
        candidates,
        clusters: clusters.len(),
        discarded_clusters,
        records_linked,
        exact_members,
        fuzzy_members,
        clusters_by_coverage,
    }
}
