//! Payload shapes served by the document backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tezca_types::{Article, DocumentId, DocumentSnapshot, OutlineNode};

use crate::error::LoadFailure;

/// Article list of a document.
///
/// `law_name` and `articles` are required; `articles` may be empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlesPayload {
    #[serde(default)]
    pub law_id: Option<String>,
    pub law_name: String,
    pub articles: Vec<Article>,
    #[serde(default)]
    pub total: Option<usize>,
}

/// Structural outline of a document. A missing or null `structure` is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlinePayload {
    #[serde(default)]
    pub law_id: Option<String>,
    #[serde(default)]
    pub structure: Option<Vec<OutlineNode>>,
}

impl ArticlesPayload {
    pub fn from_snapshot(snapshot: &DocumentSnapshot) -> Self {
        Self {
            law_id: Some(snapshot.document_id().to_string()),
            law_name: snapshot.display_name().to_string(),
            articles: snapshot.articles().to_vec(),
            total: Some(snapshot.total()),
        }
    }
}

impl OutlinePayload {
    pub fn from_snapshot(snapshot: &DocumentSnapshot) -> Self {
        Self {
            law_id: Some(snapshot.document_id().to_string()),
            structure: Some(snapshot.outline().to_vec()),
        }
    }
}

/// Validate raw payloads and assemble the snapshot of `id`.
pub fn into_snapshot(
    id: &DocumentId,
    articles: Value,
    outline: Option<Value>,
) -> Result<DocumentSnapshot, LoadFailure> {
    let articles: ArticlesPayload = serde_json::from_value(articles)
        .map_err(|e| LoadFailure::malformed(id, format!("article list: {e}")))?;
    check_law_id(id, articles.law_id.as_deref());

    if let Some(total) = articles.total {
        if total != articles.articles.len() {
            tracing::debug!(
                document = %id,
                total,
                received = articles.articles.len(),
                "article total differs from received articles"
            );
        }
    }

    let outline = match outline {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => {
            let payload: OutlinePayload = serde_json::from_value(value)
                .map_err(|e| LoadFailure::malformed(id, format!("structure: {e}")))?;
            check_law_id(id, payload.law_id.as_deref());
            payload.structure.unwrap_or_default()
        }
    };

    let snapshot =
        DocumentSnapshot::new(id.clone(), articles.law_name, articles.articles, outline)
            .map_err(|e| LoadFailure::malformed(id, e.to_string()))?;
    Ok(snapshot.with_declared_total(articles.total))
}

fn check_law_id(requested: &DocumentId, reported: Option<&str>) {
    if let Some(reported) = reported {
        if reported != requested.as_str() {
            tracing::warn!(
                requested = %requested,
                reported,
                "source reported a different document id; keeping the requested one"
            );
        }
    }
}
