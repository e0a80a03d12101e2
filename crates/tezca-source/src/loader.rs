use tezca_types::{DocumentId, DocumentSnapshot};
use tracing::{debug, warn};

use crate::error::LoadFailure;
use crate::traits::DocumentSource;
use crate::wire;

/// Loads validated document snapshots from a [`DocumentSource`].
///
/// The loader never retries and never caches: every call is a fresh read.
pub struct DocumentLoader<S> {
    source: S,
}

impl<S: DocumentSource> DocumentLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load one document.
    ///
    /// The article list and the outline are fetched concurrently; both must
    /// succeed.
    pub async fn load(&self, id: &DocumentId) -> Result<DocumentSnapshot, LoadFailure> {
        debug!(document = %id, "loading document");
        let fetched = tokio::try_join!(
            self.source.fetch_articles(id),
            self.source.fetch_outline(id)
        );
        let (articles, outline) = match fetched {
            Ok(pair) => pair,
            Err(e) => {
                let failure = LoadFailure::from_source(id, &e);
                warn!(document = %id, error = %e, "document fetch failed");
                return Err(failure);
            }
        };

        let snapshot = wire::into_snapshot(id, articles, outline).inspect_err(|failure| {
            warn!(document = %id, reason = %failure.reason, "malformed document payload");
        })?;
        debug!(
            document = %id,
            articles = snapshot.len(),
            outline_nodes = snapshot.outline_node_count(),
            "document loaded"
        );
        Ok(snapshot)
    }

    /// Load two documents concurrently. Fails if either load fails.
    pub async fn load_pair(
        &self,
        left: &DocumentId,
        right: &DocumentId,
    ) -> Result<(DocumentSnapshot, DocumentSnapshot), LoadFailure> {
        tokio::try_join!(self.load(left), self.load(right))
    }
}
