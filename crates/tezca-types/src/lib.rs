//! Foundation types for the Tezca document comparison engine.
//!
//! Every other Tezca crate depends on `tezca-types`. The types here describe
//! a loaded legal document; none of them carry comparison state.
//!
//! # Key Types
//!
//! - [`DocumentId`] -- Non-empty opaque identifier of a document in the source
//! - [`Article`] -- One identified article of a document
//! - [`OutlineNode`] -- A node of the document's structural outline
//! - [`DocumentSnapshot`] -- Immutable result of loading a document
//! - [`Side`] -- Which pane of a comparison a document occupies

pub mod article;
pub mod document;
pub mod error;
pub mod snapshot;

pub use article::{Article, OutlineNode};
pub use document::{DocumentId, Side};
pub use error::TypeError;
pub use snapshot::DocumentSnapshot;
