use std::time::Instant;

use tracing::{debug, info, warn};

use crate::aggregate::ClusterAccumulator;
use crate::config::LinkageConfig;
use crate::difference::find_differences;
use crate::distinct::find_distinct;
use crate::error::LinkError;
use crate::matcher::match_best;
use crate::model::{DifferenceResult, DistinctReport, LinkageInput, MatchResult, RunMeta};
use crate::summary::compute_summary;

/// Link the selected lists into clusters.
///
/// The config is validated in full before any comparison. Pairs run in
/// sorted-identifier order and feed a single accumulator owned by this call,
/// so identical input always yields identical clusters.
pub fn compute_matches(config: &LinkageConfig, input: &LinkageInput) -> Result<MatchResult, LinkError> {
    config.validate_against(input)?;

    let started = Instant::now();
    let lists = config.sorted_lists();
    let pairs = config.list_pairs();
    info!(
        lists = lists.len(),
        pairs = pairs.len(),
        threshold = config.threshold,
        min_coverage = config.min_coverage,
        "linkage started"
    );

    let warnings = empty_list_warnings(&lists, input)?;

    let mut acc = ClusterAccumulator::new();
    for (left_id, right_id) in &pairs {
        let left = input.list(left_id)?;
        let right = input.list(right_id)?;
        let candidates = match_best(left, right, config.threshold);
        debug!(
            left = %left_id,
            right = %right_id,
            compared = left.len() * right.len(),
            candidates = candidates.len(),
            "pair matched"
        );
        for candidate in &candidates {
            acc.absorb(candidate);
        }
    }

    let candidates = acc.candidates_seen();
    let (clusters, discarded) = acc.finalize(config.min_coverage);
    let summary = compute_summary(&clusters, pairs.len(), candidates, discarded);

    info!(
        clusters = summary.clusters,
        discarded = discarded,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "linkage finished"
    );

    Ok(MatchResult {
        meta: run_meta(config, lists),
        summary,
        clusters,
        warnings,
    })
}

/// Report records of `list_a` lacking an exact counterpart in `list_b`.
///
/// One direction only; call again with the lists swapped for the other.
pub fn compute_differences(
    config: &LinkageConfig,
    input: &LinkageInput,
    list_a: &str,
    list_b: &str,
) -> Result<DifferenceResult, LinkError> {
    config.validate_against(input)?;
    if list_a == list_b {
        return Err(LinkError::InvalidConfiguration(format!(
            "difference needs two different lists, got '{list_a}' twice"
        )));
    }
    let left = input.list(list_a)?;
    let right = input.list(list_b)?;

    let started = Instant::now();
    let warnings = empty_list_warnings(&[list_a.to_string(), list_b.to_string()], input)?;

    let (records, summary) = find_differences(list_a, left, list_b, right);

    info!(
        list_a = %list_a,
        list_b = %list_b,
        compared = summary.compared,
        reported = summary.reported,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "differences computed"
    );

    Ok(DifferenceResult {
        list_a: list_a.to_string(),
        list_b: list_b.to_string(),
        summary,
        records,
        warnings,
    })
}

/// Exact normalized-name set difference between two lists.
pub fn compute_distinct(input: &LinkageInput, left: &str, right: &str) -> Result<DistinctReport, LinkError> {
    let left_recs = input.list(left)?;
    let right_recs = input.list(right)?;
    let report = find_distinct(left, left_recs, right, right_recs);
    info!(
        left = %left,
        right = %right,
        left_only = report.left_only.len(),
        right_only = report.right_only.len(),
        "distinct names computed"
    );
    Ok(report)
}

fn empty_list_warnings(lists: &[String], input: &LinkageInput) -> Result<Vec<String>, LinkError> {
    let mut warnings = Vec::new();
    for id in lists {
        if input.list(id)?.is_empty() {
            warn!(list = %id, "list is empty; pairs involving it yield no matches");
            warnings.push(format!("list '{id}' is empty"));
        }
    }
    Ok(warnings)
}

fn run_meta(config: &LinkageConfig, lists: Vec<String>) -> RunMeta {
    RunMeta {
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        run_at: chrono::Utc::now().to_rfc3339(),
        threshold: config.threshold,
        min_coverage: config.min_coverage,
        lists,
    }
}
