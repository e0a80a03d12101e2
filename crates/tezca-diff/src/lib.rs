//! Comparison primitives for the Tezca document comparison engine.
//!
//! Aligns the articles of two documents by their official identifiers and
//! computes word-level differences between the texts of matched articles.
//! Both operations are total: they never fail, whatever the input.
//!
//! # Key Types
//!
//! - [`AlignmentResult`] / [`Classification`] -- Matched and per-side unique article ids
//! - [`WordDiff`] / [`DiffSpan`] / [`SpanKind`] -- Word-level diff of two texts
//! - [`DiffAlgorithm`] -- Which sequence diff algorithm drives the word diff

pub mod alignment;
pub mod word_diff;

pub use alignment::{align, AlignmentResult, Classification};
pub use word_diff::{diff_words, diff_words_with, DiffAlgorithm, DiffSpan, SpanKind, WordDiff};
