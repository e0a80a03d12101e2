use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use tezca_types::{DocumentId, DocumentSnapshot};

use crate::error::{SourceError, SourceResult};
use crate::traits::DocumentSource;
use crate::wire::{ArticlesPayload, OutlinePayload};

enum Entry {
    Document {
        articles: Value,
        outline: Option<Value>,
    },
    Failing(String),
}

/// In-memory, HashMap-based document source.
///
/// Intended for tests and embedding. Payloads are stored as raw JSON so that
/// malformed documents can be served too.
pub struct InMemorySource {
    documents: RwLock<HashMap<DocumentId, Entry>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Serve raw payloads for `id`.
    pub fn insert_raw(&self, id: DocumentId, articles: Value, outline: Option<Value>) {
        self.documents
            .write()
            .expect("lock poisoned")
            .insert(id, Entry::Document { articles, outline });
    }

    /// Serve a well-formed document built from `snapshot`.
    pub fn insert_snapshot(&self, snapshot: &DocumentSnapshot) -> SourceResult<()> {
        let articles = serde_json::to_value(ArticlesPayload::from_snapshot(snapshot))?;
        let outline = serde_json::to_value(OutlinePayload::from_snapshot(snapshot))?;
        self.insert_raw(snapshot.document_id().clone(), articles, Some(outline));
        Ok(())
    }

    /// Make every read of `id` fail with a transport error.
    pub fn fail(&self, id: DocumentId, reason: impl Into<String>) {
        self.documents
            .write()
            .expect("lock poisoned")
            .insert(id, Entry::Failing(reason.into()));
    }

    pub fn remove(&self, id: &DocumentId) -> bool {
        self.documents.write().expect("lock poisoned").remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.documents.read().expect("lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().expect("lock poisoned").is_empty()
    }
}

impl Default for InMemorySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentSource for InMemorySource {
    async fn fetch_articles(&self, id: &DocumentId) -> SourceResult<Value> {
        let map = self.documents.read().expect("lock poisoned");
        match map.get(id) {
            Some(Entry::Document { articles, .. }) => Ok(articles.clone()),
            Some(Entry::Failing(reason)) => Err(SourceError::Transport(reason.clone())),
            None => Err(SourceError::NotFound(id.clone())),
        }
    }

    async fn fetch_outline(&self, id: &DocumentId) -> SourceResult<Option<Value>> {
        let map = self.documents.read().expect("lock poisoned");
        match map.get(id) {
            Some(Entry::Document { outline, .. }) => Ok(outline.clone()),
            Some(Entry::Failing(reason)) => Err(SourceError::Transport(reason.clone())),
            None => Err(SourceError::NotFound(id.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tezca_types::{Article, OutlineNode};

    fn id(s: &str) -> DocumentId {
        DocumentId::new(s).unwrap()
    }

    #[tokio::test]
    async fn serves_raw_payloads() {
        let source = InMemorySource::new();
        source.insert_raw(id("a"), json!({"law_name": "A", "articles": []}), None);
        assert_eq!(source.len(), 1);
        let articles = source.fetch_articles(&id("a")).await.unwrap();
        assert_eq!(articles["law_name"], "A");
        assert!(source.fetch_outline(&id("a")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn serves_snapshots() {
        let snap = DocumentSnapshot::new(
            id("cpeum"),
            "Constitución",
            vec![Article::new("1", "En los Estados Unidos Mexicanos")],
            vec![OutlineNode::leaf("Título Primero")],
        )
        .unwrap();
        let source = InMemorySource::new();
        source.insert_snapshot(&snap).unwrap();

        let articles = source.fetch_articles(&id("cpeum")).await.unwrap();
        assert_eq!(articles["articles"][0]["article_id"], "1");
        let outline = source.fetch_outline(&id("cpeum")).await.unwrap().unwrap();
        assert_eq!(outline["structure"][0]["label"], "Título Primero");
    }

    #[tokio::test]
    async fn unknown_document_not_found() {
        let source = InMemorySource::new();
        let err = source.fetch_articles(&id("missing")).await.unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[tokio::test]
    async fn failing_document() {
        let source = InMemorySource::new();
        source.fail(id("down"), "connection reset");
        let err = source.fetch_outline(&id("down")).await.unwrap_err();
        assert!(matches!(err, SourceError::Transport(ref r) if r == "connection reset"));
        assert!(source.remove(&id("down")));
        assert!(source.is_empty());
    }
}
