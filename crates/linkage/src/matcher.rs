use tracing::debug;

use crate::model::{MatchCandidate, RawRecord};
use crate::similarity::{score, Similarity};

const PROGRESS_EVERY: usize = 100;

/// For every left record, find its best-scoring right record.
///
/// Each left record is compared against the whole right list; the first
/// record reaching the maximum wins ties. A candidate is emitted only when
/// that maximum reaches `threshold`. An empty right list yields nothing.
///
/// Records whose name normalizes to nothing (`"---"`, `"???"`) have an empty
/// key and take no part on either side.
pub fn match_best<'a>(
    left: &'a [RawRecord],
    right: &'a [RawRecord],
    threshold: u8,
) -> Vec<MatchCandidate<'a>> {
    let mut candidates = Vec::new();
    if right.is_empty() {
        return candidates;
    }

    for (i, left_rec) in left.iter().enumerate() {
        if left_rec.key.is_empty() {
            continue;
        }
        if let Some((right_rec, best)) = best_counterpart(left_rec, right) {
            if best.score >= f64::from(threshold) {
                candidates.push(MatchCandidate {
                    left: left_rec,
                    right: right_rec,
                    score: best.score,
                    method: best.method,
                });
            }
        }

        if (i + 1) % PROGRESS_EVERY == 0 {
            debug!(processed = i + 1, total = left.len(), "pair scan progress");
        }
    }

    candidates
}

fn best_counterpart<'a>(
    left_rec: &RawRecord,
    right: &'a [RawRecord],
) -> Option<(&'a RawRecord, Similarity)> {
    let mut best: Option<(&'a RawRecord, Similarity)> = None;

    for right_rec in right.iter().filter(|r| !r.key.is_empty()) {
        let s = score(&left_rec.key, &right_rec.key);
        let improves = match best {
            None => true,
            Some((_, current)) => s.score > current.score,
        };
        if improves {
            best = Some((right_rec, s));
            // Nothing can beat a perfect score and earlier records win ties.
            if s.score >= 100.0 {
                break;
            }
        }
    }

    best
}
