use std::collections::{BTreeMap, HashMap};

use crate::model::{Cluster, ClusterMember, MatchCandidate, NameKey, RawRecord};
use crate::similarity::score;

/// `(list_id, line_index)`: identifies a source record across pairs.
type RecordId = (String, usize);

/// Cross-pair union of match candidates into clusters.
///
/// A candidate joins the cluster that already holds one of its records, else
/// the cluster indexed under either endpoint's joined `"first last"` key,
/// else it opens a new one. A record sits in at most one cluster: once
/// placed, a later candidate pulling it toward another cluster leaves it
/// where it is. Each cluster holds at most one member per list; a
/// represented list's member is replaced only by a candidate with a strictly
/// higher score.
#[derive(Debug, Default)]
pub struct ClusterAccumulator {
    clusters: Vec<OpenCluster>,
    by_key: HashMap<String, usize>,
    by_record: HashMap<RecordId, usize>,
    candidates: usize,
}

#[derive(Debug, Default)]
struct OpenCluster {
    /// First record ever inserted.
    representative: Option<(String, NameKey)>,
    /// Member per list with the score of the candidate that placed it.
    members: BTreeMap<String, (RawRecord, f64)>,
}

enum Offer {
    Rejected,
    Inserted,
    Replaced(RecordId),
}

fn record_id(record: &RawRecord) -> RecordId {
    (record.list_id.clone(), record.line_index)
}

impl OpenCluster {
    fn offer(&mut self, record: &RawRecord, link_score: f64) -> Offer {
        let evicted = match self.members.get(&record.list_id) {
            Some((existing, existing_score)) => {
                if link_score <= *existing_score {
                    return Offer::Rejected;
                }
                Some(record_id(existing))
            }
            None => None,
        };
        if self.representative.is_none() {
            self.representative = Some((record.original.clone(), record.key.clone()));
        }
        self.members
            .insert(record.list_id.clone(), (record.clone(), link_score));
        match evicted {
            Some(id) => Offer::Replaced(id),
            None => Offer::Inserted,
        }
    }
}

impl ClusterAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidates_seen(&self) -> usize {
        self.candidates
    }

    pub fn open_clusters(&self) -> usize {
        self.clusters.len()
    }

    pub fn absorb(&mut self, candidate: &MatchCandidate<'_>) {
        self.candidates += 1;

        let left_key = candidate.left.key.joined();
        let right_key = candidate.right.key.joined();

        let existing = self
            .by_record
            .get(&record_id(candidate.left))
            .or_else(|| self.by_record.get(&record_id(candidate.right)))
            .or_else(|| self.by_key.get(&left_key))
            .or_else(|| self.by_key.get(&right_key))
            .copied();

        let idx = match existing {
            Some(idx) => idx,
            None => {
                self.clusters.push(OpenCluster::default());
                let idx = self.clusters.len() - 1;
                self.by_key.insert(left_key, idx);
                idx
            }
        };

        for record in [candidate.left, candidate.right] {
            let id = record_id(record);
            if self.by_record.get(&id).is_some_and(|&home| home != idx) {
                continue;
            }
            match self.clusters[idx].offer(record, candidate.score) {
                Offer::Rejected => continue,
                Offer::Inserted => {}
                Offer::Replaced(evicted) => {
                    self.by_record.remove(&evicted);
                }
            }
            self.by_record.insert(id, idx);
            self.by_key.entry(record.key.joined()).or_insert(idx);
        }
    }

    /// Close the accumulator, keeping clusters that span at least
    /// `min_coverage` lists. Returns survivors in creation order and the
    /// number discarded.
    ///
    /// Member scores are recomputed against the cluster's representative.
    pub fn finalize(self, min_coverage: usize) -> (Vec<Cluster>, usize) {
        let mut kept = Vec::new();
        let mut discarded = 0;

        for open in self.clusters {
            let Some((canonical_name, rep_key)) = open.representative else {
                continue;
            };
            if open.members.len() < min_coverage {
                discarded += 1;
                continue;
            }
            let members = open
                .members
                .into_values()
                .map(|(record, _)| {
                    let s = score(&record.key, &rep_key);
                    ClusterMember::from_record(&record, s.score, s.method)
                })
                .collect();
            kept.push(Cluster {
                canonical_name,
                members,
            });
        }

        (kept, discarded)
    }
}
