//! Document loading for the Tezca comparison engine.
//!
//! The document backend is an external collaborator reached through the
//! [`DocumentSource`] trait. [`DocumentLoader`] turns its raw JSON payloads
//! into validated [`DocumentSnapshot`](tezca_types::DocumentSnapshot)s and
//! reduces every failure to a single [`LoadFailure`].

pub mod config;
pub mod error;
pub mod fs;
pub mod loader;
pub mod memory;
pub mod traits;
pub mod wire;

pub use config::SourceConfig;
pub use error::{LoadFailure, LoadFailureKind, SourceError, SourceResult};
pub use fs::DirectorySource;
pub use loader::DocumentLoader;
pub use memory::InMemorySource;
pub use traits::DocumentSource;
pub use wire::{ArticlesPayload, OutlinePayload};
