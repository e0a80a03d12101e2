//! The comparison state machine.
//!
//! ```text
//!            request(<2 ids)
//!   ┌────────────────────────────────┐
//!   ▼                                │
//! Idle ──request(2 ids)──► Loading ──┼──resolve(Ok)──► Ready
//!                            ▲       └──resolve(Err)─► Error
//!                            └── request(2 ids) from any state
//! ```
//!
//! Every request gets a fresh [`RequestToken`]. Outcomes are accepted only
//! for the current token, so a late response for an abandoned request can
//! never overwrite the state of a newer one. A token is spent once its
//! outcome is applied.

use std::fmt;
use std::sync::Arc;

use tezca_source::LoadFailure;
use tezca_types::{DocumentId, DocumentSnapshot};
use tracing::{debug, info, warn};

use crate::config::CompareConfig;
use crate::pane::{build_comparison, Comparison};

/// Message shown to the reader when a comparison cannot be loaded.
pub const LOAD_FAILURE_MESSAGE: &str =
    "The documents could not be loaded. Please choose the documents to compare again.";

/// The ordered pair of documents being compared. `left` is the reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentPair {
    pub left: DocumentId,
    pub right: DocumentId,
}

impl DocumentPair {
    pub fn new(left: DocumentId, right: DocumentId) -> Self {
        Self { left, right }
    }
}

impl fmt::Display for DocumentPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ↔ {}", self.left, self.right)
    }
}

/// Identifies one comparison request.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RequestToken {
    generation: u64,
    pair: DocumentPair,
}

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pair(&self) -> &DocumentPair {
        &self.pair
    }
}

/// Why a comparison ended in the error state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonFailure {
    pub pair: DocumentPair,
    /// Non-specific, reader-facing summary.
    pub message: String,
    /// The underlying load failure, for diagnostics.
    pub cause: LoadFailure,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// Fewer than two documents selected.
    Idle,
    Loading { pair: DocumentPair },
    Ready(Arc<Comparison>),
    Error(ComparisonFailure),
}

/// Whether an outcome was applied to the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The outcome belonged to a request that is no longer current.
    Stale,
}

pub struct ComparisonView {
    generation: u64,
    current: Option<RequestToken>,
    state: ViewState,
}

impl ComparisonView {
    pub fn new() -> Self {
        Self {
            generation: 0,
            current: None,
            state: ViewState::Idle,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Generation of the latest request or reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_token(&self) -> Option<&RequestToken> {
        self.current.as_ref()
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        self.current.as_ref() == Some(token)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, ViewState::Loading { .. })
    }

    pub fn comparison(&self) -> Option<&Arc<Comparison>> {
        match &self.state {
            ViewState::Ready(comparison) => Some(comparison),
            _ => None,
        }
    }

    pub fn error_summary(&self) -> Option<&str> {
        match &self.state {
            ViewState::Error(failure) => Some(failure.message.as_str()),
            _ => None,
        }
    }

    /// Start a comparison of `ids`.
    ///
    /// With fewer than two ids the view goes idle and `None` is returned.
    /// Otherwise the first two ids become the left and right documents.
    pub fn request(&mut self, ids: &[DocumentId]) -> Option<RequestToken> {
        match ids {
            [] | [_] => {
                self.reset();
                None
            }
            [left, right, rest @ ..] => {
                if !rest.is_empty() {
                    warn!(
                        ignored = rest.len(),
                        "only two documents can be compared; ignoring the rest"
                    );
                }
                Some(self.begin(DocumentPair::new(left.clone(), right.clone())))
            }
        }
    }

    /// Enter `Loading` for `pair`, discarding all previous state.
    pub fn begin(&mut self, pair: DocumentPair) -> RequestToken {
        self.generation += 1;
        let token = RequestToken {
            generation: self.generation,
            pair: pair.clone(),
        };
        debug!(generation = token.generation, pair = %pair, "comparison requested");
        self.current = Some(token.clone());
        self.state = ViewState::Loading { pair };
        token
    }

    /// Return to `Idle`. Outcomes of in-flight requests become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.current = None;
        self.state = ViewState::Idle;
    }

    /// Apply the outcome of the request identified by `token`.
    ///
    /// Only the first outcome for the current token is applied; repeats are
    /// reported as stale.
    pub fn resolve(
        &mut self,
        token: &RequestToken,
        outcome: Result<Comparison, LoadFailure>,
    ) -> Resolution {
        if !self.is_current(token) {
            debug!(
                generation = token.generation,
                pair = %token.pair,
                "discarding stale comparison outcome"
            );
            return Resolution::Stale;
        }
        self.current = None;
        self.state = match outcome {
            Ok(comparison) => {
                info!(
                    pair = %token.pair,
                    matched = comparison.alignment.matched_ids.len(),
                    differing = comparison.differing_count(),
                    "comparison ready"
                );
                ViewState::Ready(Arc::new(comparison))
            }
            Err(cause) => {
                warn!(pair = %token.pair, error = %cause, "comparison failed");
                ViewState::Error(ComparisonFailure {
                    pair: token.pair.clone(),
                    message: LOAD_FAILURE_MESSAGE.to_string(),
                    cause,
                })
            }
        };
        Resolution::Applied
    }

    /// Apply loaded snapshots, building the comparison only if `token` is current.
    pub fn resolve_snapshots(
        &mut self,
        token: &RequestToken,
        loaded: Result<(DocumentSnapshot, DocumentSnapshot), LoadFailure>,
        config: &CompareConfig,
    ) -> Resolution {
        if !self.is_current(token) {
            debug!(
                generation = token.generation,
                pair = %token.pair,
                "discarding stale snapshots"
            );
            return Resolution::Stale;
        }
        let outcome = loaded.map(|(left, right)| build_comparison(&left, &right, config));
        self.resolve(token, outcome)
    }
}

impl Default for ComparisonView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tezca_types::Article;

    fn id(s: &str) -> DocumentId {
        DocumentId::new(s).unwrap()
    }

    fn snapshot(doc: &str, articles: &[(&str, &str)]) -> DocumentSnapshot {
        DocumentSnapshot::new(
            id(doc),
            doc.to_uppercase(),
            articles.iter().map(|(a, t)| Article::new(*a, *t)).collect(),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn starts_idle() {
        let view = ComparisonView::new();
        assert_eq!(view.state(), &ViewState::Idle);
        assert!(view.current_token().is_none());
    }

    #[test]
    fn fewer_than_two_ids_is_idle() {
        let mut view = ComparisonView::new();
        assert!(view.request(&[]).is_none());
        assert!(view.request(&[id("a")]).is_none());
        assert_eq!(view.state(), &ViewState::Idle);
        assert!(view.error_summary().is_none());
    }

    #[test]
    fn two_ids_enter_loading() {
        let mut view = ComparisonView::new();
        let token = view.request(&[id("a"), id("b")]).unwrap();
        assert!(view.is_loading());
        assert_eq!(token.pair(), &DocumentPair::new(id("a"), id("b")));
        assert!(view.is_current(&token));
    }

    #[test]
    fn extra_ids_are_ignored() {
        let mut view = ComparisonView::new();
        let token = view.request(&[id("a"), id("b"), id("c")]).unwrap();
        assert_eq!(token.pair(), &DocumentPair::new(id("a"), id("b")));
    }

    #[test]
    fn loaded_snapshots_become_ready() {
        let mut view = ComparisonView::new();
        let token = view.request(&[id("a"), id("b")]).unwrap();
        let loaded = Ok((snapshot("a", &[("1", "x")]), snapshot("b", &[("1", "x")])));
        let resolution = view.resolve_snapshots(&token, loaded, &CompareConfig::default());
        assert_eq!(resolution, Resolution::Applied);
        let comparison = view.comparison().unwrap();
        assert!(comparison.alignment.is_matched("1"));
    }

    #[test]
    fn failure_becomes_single_error() {
        let mut view = ComparisonView::new();
        let token = view.request(&[id("a"), id("b")]).unwrap();
        let cause = LoadFailure::transport(&id("b"), "connection refused");
        view.resolve(&token, Err(cause.clone()));
        assert_eq!(view.error_summary(), Some(LOAD_FAILURE_MESSAGE));
        match view.state() {
            ViewState::Error(failure) => assert_eq!(failure.cause, cause),
            other => panic!("expected error, got {other:?}"),
        }
        assert!(view.comparison().is_none());
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut view = ComparisonView::new();
        let old = view.request(&[id("a"), id("b")]).unwrap();
        let new = view.request(&[id("c"), id("d")]).unwrap();
        assert_ne!(old, new);

        let late = Ok((snapshot("a", &[]), snapshot("b", &[])));
        assert_eq!(
            view.resolve_snapshots(&old, late, &CompareConfig::default()),
            Resolution::Stale
        );
        assert!(view.is_loading());

        let fresh = Ok((snapshot("c", &[]), snapshot("d", &[])));
        assert_eq!(
            view.resolve_snapshots(&new, fresh, &CompareConfig::default()),
            Resolution::Applied
        );
        assert_eq!(view.comparison().unwrap().left.display_name, "C");
    }

    #[test]
    fn token_is_spent_after_outcome_applies() {
        let mut view = ComparisonView::new();
        let token = view.request(&[id("a"), id("b")]).unwrap();
        let loaded = Ok((snapshot("a", &[("1", "x")]), snapshot("b", &[("1", "x")])));
        let config = CompareConfig::default();
        assert_eq!(view.resolve_snapshots(&token, loaded, &config), Resolution::Applied);
        assert!(!view.is_current(&token));
        assert!(view.current_token().is_none());

        let repeat = Err(LoadFailure::transport(&id("a"), "late retry"));
        assert_eq!(view.resolve(&token, repeat), Resolution::Stale);
        assert!(view.comparison().is_some());
        assert!(view.error_summary().is_none());
    }

    #[test]
    fn same_pair_requested_twice_gets_new_token() {
        let mut view = ComparisonView::new();
        let first = view.request(&[id("a"), id("b")]).unwrap();
        let second = view.request(&[id("a"), id("b")]).unwrap();
        assert_ne!(first, second);
        let late = Err(LoadFailure::transport(&id("a"), "x"));
        assert_eq!(view.resolve(&first, late), Resolution::Stale);
        assert!(view.is_loading());
    }

    #[test]
    fn new_request_after_error_discards_it() {
        let mut view = ComparisonView::new();
        let token = view.request(&[id("a"), id("b")]).unwrap();
        view.resolve(&token, Err(LoadFailure::transport(&id("a"), "down")));
        view.request(&[id("a"), id("c")]).unwrap();
        assert!(view.is_loading());
        assert!(view.error_summary().is_none());
    }

    #[test]
    fn reset_invalidates_in_flight_request() {
        let mut view = ComparisonView::new();
        let token = view.request(&[id("a"), id("b")]).unwrap();
        view.request(&[id("a")]);
        let late = Ok((snapshot("a", &[]), snapshot("b", &[])));
        assert_eq!(
            view.resolve_snapshots(&token, late, &CompareConfig::default()),
            Resolution::Stale
        );
        assert_eq!(view.state(), &ViewState::Idle);
    }
}
