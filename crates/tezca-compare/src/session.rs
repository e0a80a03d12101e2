use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tezca_source::{DocumentLoader, DocumentSource, LoadFailure};
use tezca_types::{DocumentId, DocumentSnapshot, Side};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::CompareConfig;
use crate::pane::{build_comparison_until, pending_diff_words, Comparison};
use crate::scroll::ScrollRegion;
use crate::selection::ComparisonSelection;
use crate::view::{ComparisonView, RequestToken, Resolution, ViewState};

/// A receiver observing every transition of the comparison view.
pub type ViewStream = watch::Receiver<ComparisonView>;

/// Drives comparison requests against a document source.
///
/// Each call to [`compare`](Self::compare) is one request: it enters
/// `Loading`, loads both documents concurrently, builds the comparison, and
/// publishes the outcome. Calls may overlap; only the newest request's
/// outcome ever reaches the view.
pub struct ComparisonSession<S> {
    loader: DocumentLoader<S>,
    config: CompareConfig,
    view: watch::Sender<ComparisonView>,
    /// Generation of the newest request, read by diff work off the executor.
    latest: Arc<AtomicU64>,
    left_scroll: ScrollRegion,
    right_scroll: ScrollRegion,
}

impl<S: DocumentSource> ComparisonSession<S> {
    pub fn new(source: S, config: CompareConfig) -> Self {
        let (view, _rx) = watch::channel(ComparisonView::new());
        Self {
            loader: DocumentLoader::new(source),
            config,
            view,
            latest: Arc::new(AtomicU64::new(0)),
            left_scroll: ScrollRegion::new(),
            right_scroll: ScrollRegion::new(),
        }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn loader(&self) -> &DocumentLoader<S> {
        &self.loader
    }

    pub fn subscribe(&self) -> ViewStream {
        self.view.subscribe()
    }

    /// The current view state.
    pub fn state(&self) -> ViewState {
        self.view.borrow().state().clone()
    }

    pub fn scroll(&self, side: Side) -> &ScrollRegion {
        match side {
            Side::Left => &self.left_scroll,
            Side::Right => &self.right_scroll,
        }
    }

    /// Go idle, abandoning any request in flight.
    pub fn reset(&self) {
        self.view.send_modify(|view| {
            view.reset();
            self.latest.store(view.generation(), Ordering::SeqCst);
        });
    }

    pub async fn compare_selection(&self, selection: &ComparisonSelection) -> ViewState {
        self.compare(selection.ids()).await
    }

    /// Compare the first two of `ids` and return the resulting view state.
    ///
    /// With fewer than two ids the view goes idle. If a newer request starts
    /// while this one is in flight, this request's results are discarded and
    /// the returned state is whatever the newer request has produced so far.
    pub async fn compare(&self, ids: &[DocumentId]) -> ViewState {
        let Some(token) = self.begin(ids) else {
            return self.state();
        };
        self.left_scroll.reset();
        self.right_scroll.reset();

        let pair = token.pair().clone();
        match self.loader.load_pair(&pair.left, &pair.right).await {
            Ok((left, right)) => {
                if !self.is_current(&token) {
                    debug!(pair = %pair, "documents arrived for a superseded request");
                    return self.state();
                }
                match self.build(&token, left, right).await {
                    Some(comparison) => {
                        self.apply(&token, Ok(comparison));
                    }
                    None => debug!(pair = %pair, "diff work abandoned for a superseded request"),
                }
            }
            Err(failure) => {
                self.apply(&token, Err(failure));
            }
        }
        self.state()
    }

    fn begin(&self, ids: &[DocumentId]) -> Option<RequestToken> {
        let mut token = None;
        self.view.send_modify(|view| {
            token = view.request(ids);
            self.latest.store(view.generation(), Ordering::SeqCst);
        });
        token
    }

    fn is_current(&self, token: &RequestToken) -> bool {
        self.view.borrow().is_current(token)
    }

    fn apply(&self, token: &RequestToken, outcome: Result<Comparison, LoadFailure>) -> Resolution {
        let mut resolution = Resolution::Stale;
        self.view.send_if_modified(|view| {
            resolution = view.resolve(token, outcome);
            resolution == Resolution::Applied
        });
        resolution
    }

    /// Build the comparison, off the executor when the diff work is large.
    ///
    /// Returns `None` if the request was superseded while diffing.
    async fn build(
        &self,
        token: &RequestToken,
        left: DocumentSnapshot,
        right: DocumentSnapshot,
    ) -> Option<Comparison> {
        let generation = token.generation();
        let latest = Arc::clone(&self.latest);
        let is_cancelled = move || latest.load(Ordering::SeqCst) != generation;

        let words = pending_diff_words(&left, &right);
        if words <= self.config.background_diff_threshold {
            return build_comparison_until(&left, &right, &self.config, &is_cancelled);
        }

        debug!(words, "diffing on the blocking pool");
        let config = self.config.clone();
        let task = tokio::task::spawn_blocking(move || {
            build_comparison_until(&left, &right, &config, &is_cancelled)
        });
        match task.await {
            Ok(comparison) => comparison,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(e) => {
                warn!(error = %e, "diff task did not complete");
                None
            }
        }
    }
}
