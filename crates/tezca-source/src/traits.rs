use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tezca_types::DocumentId;

use crate::error::SourceResult;

/// Backend that serves legal documents by id.
///
/// Implementations return the raw payloads; validation is the loader's job.
/// The two reads of a document are independent and may be issued
/// concurrently.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// The article list payload of a document.
    async fn fetch_articles(&self, id: &DocumentId) -> SourceResult<Value>;

    /// The structure payload of a document, or `None` if it has no outline.
    async fn fetch_outline(&self, id: &DocumentId) -> SourceResult<Option<Value>>;
}

#[async_trait]
impl<T: DocumentSource + ?Sized> DocumentSource for Arc<T> {
    async fn fetch_articles(&self, id: &DocumentId) -> SourceResult<Value> {
        (**self).fetch_articles(id).await
    }

    async fn fetch_outline(&self, id: &DocumentId) -> SourceResult<Option<Value>> {
        (**self).fetch_outline(id).await
    }
}
