use crate::model::{DifferenceRecord, DifferenceSummary, RawRecord};
use crate::similarity::{exact_key, token_ratio};

/// Report records of `left` that have no exact counterpart in `right`.
///
/// A left record sharing a non-empty key with any right record is
/// reconciled and skipped without fuzzy scoring. Every other record is scored
/// against each right record with [`token_ratio`]; the first best is kept and
/// reported unless it reaches 100. When `right` is empty each record is
/// reported with no match and a score of 0.
///
/// Only `left` is checked; swap the arguments for the other direction.
pub fn find_differences(
    left_id: &str,
    left: &[RawRecord],
    right_id: &str,
    right: &[RawRecord],
) -> (Vec<DifferenceRecord>, DifferenceSummary) {
    let mut records = Vec::new();
    let mut summary = DifferenceSummary {
        compared: left.len(),
        ..DifferenceSummary::default()
    };

    for left_rec in left {
        if right.iter().any(|r| exact_key(&left_rec.key, &r.key)) {
            summary.reconciled += 1;
            continue;
        }

        let mut best: Option<(&RawRecord, f64)> = None;
        for right_rec in right {
            let avg = token_ratio(&left_rec.key, &right_rec.key);
            if best.map_or(true, |(_, b)| avg > b) {
                best = Some((right_rec, avg));
            }
        }

        let (best_match, score) = match best {
            Some((r, s)) => (Some(r.original.clone()), s),
            None => (None, 0.0),
        };

        if score >= 100.0 {
            summary.reconciled += 1;
            continue;
        }

        records.push(DifferenceRecord {
            list_a: left_id.to_string(),
            original: left_rec.original.clone(),
            list_b: right_id.to_string(),
            best_match,
            score: round2(score),
        });
    }

    summary.reported = records.len();
    (records, summary)
}

fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
