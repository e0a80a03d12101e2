use std::path::Path;

use serde::{Deserialize, Serialize};
use tezca_diff::DiffAlgorithm;

use crate::error::CompareResult;
use crate::outline::OutlineOptions;

/// Tuning of a comparison session.
///
/// Every field is optional in TOML:
///
/// ```toml
/// diff_algorithm = "patience"
/// background_diff_threshold = 5000
///
/// [outline]
/// max_label_chars = 60
/// max_depth = 3
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Algorithm used for word diffs of matched articles.
    pub diff_algorithm: DiffAlgorithm,
    /// Word count of differing matched articles above which diffs are
    /// computed off the async executor.
    pub background_diff_threshold: usize,
    pub outline: OutlineOptions,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            diff_algorithm: DiffAlgorithm::default(),
            background_diff_threshold: 2_000,
            outline: OutlineOptions::default(),
        }
    }
}

impl CompareConfig {
    pub fn from_toml_str(s: &str) -> CompareResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> CompareResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
