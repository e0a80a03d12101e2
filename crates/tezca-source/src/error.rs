use serde::{Deserialize, Serialize};
use tezca_types::DocumentId;
use thiserror::Error;

/// Errors reported by a [`DocumentSource`](crate::DocumentSource).
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("document not found: {0}")]
    NotFound(DocumentId),

    #[error("invalid document id for this source: {0}")]
    InvalidId(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Returns `true` if the source answered but the payload could not be decoded.
    pub fn is_malformed(&self) -> bool {
        matches!(self, SourceError::Json(_))
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Broad cause of a [`LoadFailure`], kept for diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadFailureKind {
    /// The document could not be fetched.
    Transport,
    /// The source answered with a payload missing required fields.
    Malformed,
}

/// A document could not be loaded.
///
/// This is the only failure the loader surfaces. It is terminal for the
/// request that produced it: the loader never retries.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("failed to load document {document_id}: {reason}")]
pub struct LoadFailure {
    pub document_id: DocumentId,
    pub kind: LoadFailureKind,
    pub reason: String,
}

impl LoadFailure {
    pub fn transport(document_id: &DocumentId, reason: impl Into<String>) -> Self {
        Self {
            document_id: document_id.clone(),
            kind: LoadFailureKind::Transport,
            reason: reason.into(),
        }
    }

    pub fn malformed(document_id: &DocumentId, reason: impl Into<String>) -> Self {
        Self {
            document_id: document_id.clone(),
            kind: LoadFailureKind::Malformed,
            reason: reason.into(),
        }
    }

    /// Classify a source error for `document_id`.
    pub fn from_source(document_id: &DocumentId, err: &SourceError) -> Self {
        if err.is_malformed() {
            Self::malformed(document_id, err.to_string())
        } else {
            Self::transport(document_id, err.to_string())
        }
    }
}
