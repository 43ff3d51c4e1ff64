//! `namelink-linkage`: fuzzy multi-list name matching engine.
//!
//! Pure engine crate: receives pre-loaded name lists, returns clusters and
//! difference reports. No CLI or IO dependencies.

pub mod aggregate;
pub mod config;
pub mod difference;
pub mod distinct;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod similarity;
pub mod summary;

pub use config::{LinkageConfig, RunConfig};
pub use engine::{compute_differences, compute_distinct, compute_matches};
pub use error::LinkError;
pub use model::{Cluster, DifferenceRecord, LinkageInput, MatchResult, RawRecord};
