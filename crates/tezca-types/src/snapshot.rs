use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::article::{Article, OutlineNode};
use crate::document::DocumentId;
use crate::error::TypeError;

/// An immutable, fully loaded document.
///
/// Articles keep the order returned by the source, which is the canonical
/// display order. A snapshot is never patched: a new comparison request
/// loads a new snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct DocumentSnapshot {
    document_id: DocumentId,
    display_name: String,
    articles: Vec<Article>,
    outline: Vec<OutlineNode>,
    /// Article count reported by the source, if any.
    declared_total: Option<usize>,
}

/// Unvalidated wire form of [`DocumentSnapshot`].
#[derive(Deserialize)]
struct RawSnapshot {
    document_id: DocumentId,
    display_name: String,
    articles: Vec<Article>,
    #[serde(default)]
    outline: Vec<OutlineNode>,
    #[serde(default)]
    declared_total: Option<usize>,
}

impl TryFrom<RawSnapshot> for DocumentSnapshot {
    type Error = TypeError;

    fn try_from(raw: RawSnapshot) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.document_id, raw.display_name, raw.articles, raw.outline)?
            .with_declared_total(raw.declared_total))
    }
}

impl DocumentSnapshot {
    /// Build a snapshot, rejecting duplicated article ids.
    pub fn new(
        document_id: DocumentId,
        display_name: impl Into<String>,
        articles: Vec<Article>,
        outline: Vec<OutlineNode>,
    ) -> Result<Self, TypeError> {
        let mut seen = HashSet::with_capacity(articles.len());
        for article in &articles {
            if !seen.insert(article.article_id.as_str()) {
                return Err(TypeError::DuplicateArticleId {
                    document_id: document_id.to_string(),
                    article_id: article.article_id.clone(),
                });
            }
        }
        Ok(Self {
            document_id,
            display_name: display_name.into(),
            articles,
            outline,
            declared_total: None,
        })
    }

    /// Record the article count the source reports for the document.
    pub fn with_declared_total(mut self, total: Option<usize>) -> Self {
        self.declared_total = total;
        self
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn outline(&self) -> &[OutlineNode] {
        &self.outline
    }

    /// Look up an article by id.
    pub fn article(&self, article_id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.article_id == article_id)
    }

    /// Article ids in display order.
    pub fn article_ids(&self) -> impl Iterator<Item = &str> {
        self.articles.iter().map(|a| a.article_id.as_str())
    }

    /// Number of articles.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Article count reported by the source, falling back to [`len`](Self::len).
    ///
    /// The two differ when the source paginates or truncates its article list.
    pub fn total(&self) -> usize {
        self.declared_total.unwrap_or(self.articles.len())
    }

    /// Returns `true` if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Total number of nodes across the outline forest.
    pub fn outline_node_count(&self) -> usize {
        self.outline.iter().map(OutlineNode::node_count).sum()
    }
}
