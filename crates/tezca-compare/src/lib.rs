//! Dual-pane document comparison for the Tezca legal portal.
//!
//! Loads two documents, aligns their articles by identifier, and builds the
//! render model of two independently scrollable panes: plain text for
//! identical articles, word diffs for changed ones, and side markers for
//! articles found in only one document.
//!
//! # Key Types
//!
//! - [`ComparisonSession`] -- Async driver issuing loads and publishing view states
//! - [`ComparisonView`] / [`ViewState`] -- The comparison state machine
//! - [`Comparison`] / [`PaneModel`] / [`ArticleView`] -- Render model of both panes
//! - [`OutlineEntry`] -- One line of a rendered document outline
//! - [`ScrollRegion`] -- Per-pane scroll position hook
//! - [`ComparisonSelection`] -- The reader's two-document pick
//! - [`CompareConfig`] -- Session tuning, loadable from TOML

pub mod config;
pub mod error;
pub mod outline;
pub mod pane;
pub mod scroll;
pub mod selection;
pub mod session;
pub mod view;

pub use config::CompareConfig;
pub use error::{CompareError, CompareResult};
pub use outline::{render_outline, OutlineEntry, OutlineOptions};
pub use pane::{
    build_comparison, build_comparison_until, pending_diff_words, ArticleView, Comparison, Marker,
    MarkerStyle, PaneModel, RenderMode,
};
pub use scroll::{ScrollRegion, ScrollStream};
pub use selection::{ComparisonSelection, MAX_SELECTED};
pub use session::{ComparisonSession, ViewStream};
pub use view::{
    ComparisonFailure, ComparisonView, DocumentPair, RequestToken, Resolution, ViewState,
    LOAD_FAILURE_MESSAGE,
};

// Re-export the types callers need to read a comparison.
pub use tezca_diff::{AlignmentResult, DiffAlgorithm, DiffSpan, SpanKind, WordDiff};
pub use tezca_source::{DocumentSource, LoadFailure};
pub use tezca_types::{Article, DocumentId, DocumentSnapshot, OutlineNode, Side};
