use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::error::LinkError;
use crate::model::LinkageInput;

pub const DEFAULT_THRESHOLD: u8 = 85;
pub const DEFAULT_MIN_COVERAGE: usize = 2;

// ---------------------------------------------------------------------------
// Engine config
// ---------------------------------------------------------------------------

/// Parameters for one linkage run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkageConfig {
    /// Lists taking part in the run. Order does not matter; pairs are always
    /// formed from the sorted identifiers.
    pub selected: Vec<String>,
    /// Minimum similarity (1–100) for a pairwise candidate.
    pub threshold: u8,
    /// Minimum number of distinct lists a cluster must span (2..=N).
    pub min_coverage: usize,
}

impl LinkageConfig {
    pub fn new(selected: &[&str], threshold: u8, min_coverage: usize) -> Self {
        Self {
            selected: selected.iter().map(|s| s.to_string()).collect(),
            threshold,
            min_coverage,
        }
    }

    /// Check selection, threshold and coverage ranges.
    pub fn validate(&self) -> Result<(), LinkError> {
        if self.selected.len() < 2 {
            return Err(LinkError::InvalidConfiguration(format!(
                "at least 2 lists must be selected, got {}",
                self.selected.len()
            )));
        }

        let unique: BTreeSet<&str> = self.selected.iter().map(|s| s.as_str()).collect();
        if unique.len() != self.selected.len() {
            return Err(LinkError::InvalidConfiguration(
                "selected lists must be distinct".into(),
            ));
        }

        if !(1..=100).contains(&self.threshold) {
            return Err(LinkError::InvalidConfiguration(format!(
                "threshold must be between 1 and 100, got {}",
                self.threshold
            )));
        }

        let n = self.selected.len();
        if self.min_coverage < 2 || self.min_coverage > n {
            return Err(LinkError::InvalidConfiguration(format!(
                "min_coverage must be between 2 and {n}, got {}",
                self.min_coverage
            )));
        }

        Ok(())
    }

    /// [`validate`](Self::validate), then check every selected list was supplied.
    pub fn validate_against(&self, input: &LinkageInput) -> Result<(), LinkError> {
        self.validate()?;
        for id in &self.selected {
            if !input.lists.contains_key(id) {
                return Err(LinkError::UnknownListIdentifier(id.clone()));
            }
        }
        Ok(())
    }

    /// Selected identifiers, sorted.
    pub fn sorted_lists(&self) -> Vec<String> {
        let mut lists = self.selected.clone();
        lists.sort();
        lists
    }

    /// Every unordered pair of selected lists, lower identifier first, in
    /// sorted order.
    pub fn list_pairs(&self) -> Vec<(String, String)> {
        let lists = self.sorted_lists();
        let mut pairs = Vec::with_capacity(lists.len() * (lists.len().saturating_sub(1)) / 2);
        for (i, left) in lists.iter().enumerate() {
            for right in &lists[i + 1..] {
                pairs.push((left.clone(), right.clone()));
            }
        }
        pairs
    }
}

// ---------------------------------------------------------------------------
// Run file
// ---------------------------------------------------------------------------

/// TOML run file describing the lists and matching parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    #[serde(default = "default_min_coverage")]
    pub min_coverage: usize,
    /// Subset of `lists` to link. Defaults to all of them.
    #[serde(default)]
    pub selected: Option<Vec<String>>,
    pub lists: BTreeMap<String, ListSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListSource {
    pub file: String,
}

fn default_name() -> String {
    "namelink".into()
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

fn default_min_coverage() -> usize {
    DEFAULT_MIN_COVERAGE
}

impl RunConfig {
    pub fn from_toml(input: &str) -> Result<Self, LinkError> {
        let config: RunConfig =
            toml::from_str(input).map_err(|e| LinkError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LinkError> {
        if let Some(ref selected) = self.selected {
            for id in selected {
                if !self.lists.contains_key(id) {
                    return Err(LinkError::UnknownListIdentifier(format!(
                        "selected list '{id}' is not defined under [lists]"
                    )));
                }
            }
        }
        self.linkage().validate()
    }

    /// Engine config for this run file.
    pub fn linkage(&self) -> LinkageConfig {
        let selected = match self.selected {
            Some(ref s) => s.clone(),
            None => self.lists.keys().cloned().collect(),
        };
        LinkageConfig {
            selected,
            threshold: self.threshold,
            min_coverage: self.min_coverage,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
