use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::LinkError;
use crate::normalize::{name_key, normalize};

/// Placeholder shown in reports when the paired list had nothing to compare against.
pub const NO_MATCH: &str = "no match";

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// (first, last) token pair derived from a normalized name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NameKey {
    pub first: String,
    pub last: String,
}

impl NameKey {
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.last.is_empty()
    }

    /// `"first last"`, or just `"first"` when there is no last token.
    pub fn joined(&self) -> String {
        if self.last.is_empty() {
            self.first.clone()
        } else {
            format!("{} {}", self.first, self.last)
        }
    }
}

/// One line of a source list. The normalized form and key are computed once
/// at construction and never change.
#[derive(Debug, Clone, Serialize)]
pub struct RawRecord {
    pub list_id: String,
    pub original: String,
    pub line_index: usize,
    pub normalized: String,
    pub key: NameKey,
}

impl RawRecord {
    pub fn new(list_id: impl Into<String>, original: impl Into<String>, line_index: usize) -> Self {
        let original = original.into();
        let normalized = normalize(&original);
        let key = name_key(&normalized);
        Self {
            list_id: list_id.into(),
            original,
            line_index,
            normalized,
            key,
        }
    }
}

/// Pre-loaded records grouped by list identifier.
#[derive(Debug, Clone, Default)]
pub struct LinkageInput {
    pub lists: BTreeMap<String, Vec<RawRecord>>,
}

impl LinkageInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a list from bare names, numbering lines from 1.
    pub fn with_names<I, S>(mut self, list_id: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let records = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| RawRecord::new(list_id, name, i + 1))
            .collect();
        self.lists.insert(list_id.to_string(), records);
        self
    }

    pub fn list(&self, list_id: &str) -> Result<&[RawRecord], LinkError> {
        self.lists
            .get(list_id)
            .map(|v| v.as_slice())
            .ok_or_else(|| LinkError::UnknownListIdentifier(list_id.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Pair matching
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    ExactKey,
    Fuzzy,
}

impl std::fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExactKey => f.pad("exact_key"),
            Self::Fuzzy => f.pad("fuzzy"),
        }
    }
}

/// Best counterpart found for a left record. Lives only until aggregation.
#[derive(Debug, Clone, Copy)]
pub struct MatchCandidate<'a> {
    pub left: &'a RawRecord,
    pub right: &'a RawRecord,
    pub score: f64,
    pub method: MatchMethod,
}

// ---------------------------------------------------------------------------
// Clusters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterMember {
    pub list_id: String,
    pub original: String,
    pub line_index: usize,
    /// Score against the cluster representative (the first record inserted).
    pub score: f64,
    pub method: MatchMethod,
}

impl ClusterMember {
    pub fn from_record(record: &RawRecord, score: f64, method: MatchMethod) -> Self {
        Self {
            list_id: record.list_id.clone(),
            original: record.original.clone(),
            line_index: record.line_index,
            score,
            method,
        }
    }
}

/// Records from distinct lists judged to be the same person.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Original text of the first record ever inserted.
    pub canonical_name: String,
    /// One member per list, ordered by list identifier.
    pub members: Vec<ClusterMember>,
}

impl Cluster {
    pub fn coverage(&self) -> usize {
        self.members.len()
    }

    pub fn lists(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.list_id.as_str()).collect()
    }

    pub fn member(&self, list_id: &str) -> Option<&ClusterMember> {
        self.members.iter().find(|m| m.list_id == list_id)
    }
}

// ---------------------------------------------------------------------------
// Differences
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DifferenceRecord {
    pub list_a: String,
    pub original: String,
    pub list_b: String,
    /// `None` when list B was empty.
    pub best_match: Option<String>,
    pub score: f64,
}

impl DifferenceRecord {
    pub fn best_match_or_sentinel(&self) -> &str {
        self.best_match.as_deref().unwrap_or(NO_MATCH)
    }
}

/// Exact set difference of normalized names between two lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistinctReport {
    pub left: String,
    pub right: String,
    pub left_only: Vec<String>,
    pub right_only: Vec<String>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub engine_version: String,
    pub run_at: String,
    pub threshold: u8,
    pub min_coverage: usize,
    pub lists: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchSummary {
    pub pairs_compared: usize,
    pub candidates: usize,
    pub clusters: usize,
    pub discarded_clusters: usize,
    pub records_linked: usize,
    pub exact_members: usize,
    pub fuzzy_members: usize,
    pub clusters_by_coverage: BTreeMap<usize, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub meta: RunMeta,
    pub summary: MatchSummary,
    pub clusters: Vec<Cluster>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl MatchResult {
    /// Clusters keyed by canonical name. Later clusters sharing a canonical
    /// name do not replace earlier ones.
    pub fn by_canonical_name(&self) -> BTreeMap<&str, &Cluster> {
        let mut map = BTreeMap::new();
        for cluster in &self.clusters {
            map.entry(cluster.canonical_name.as_str()).or_insert(cluster);
        }
        map
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DifferenceSummary {
    pub compared: usize,
    pub reconciled: usize,
    pub reported: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferenceResult {
    pub list_a: String,
    pub list_b: String,
    pub summary: DifferenceSummary,
    pub records: Vec<DifferenceRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
