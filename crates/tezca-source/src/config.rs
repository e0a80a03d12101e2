use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration of the on-disk [`DirectorySource`](crate::DirectorySource).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory holding one sub-directory per document id.
    pub root: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}
