//! Word-level diff: token-by-token comparison of two article texts.
//!
//! Uses the `similar` crate over word tokens. Whitespace runs are tokens of
//! their own, so span values carry every original character and the two
//! input texts can be rebuilt exactly from the span sequence.

use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag, TextDiff};

/// Sequence diff algorithm used for word diffs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Myers' O(ND) algorithm in linear space. Suitable for very long articles.
    #[default]
    Myers,
    /// Patience diff: anchors on unique common tokens first.
    Patience,
    /// Classic longest-common-subsequence table, O(n·m) time and memory.
    Lcs,
}

impl DiffAlgorithm {
    fn to_similar(self) -> Algorithm {
        match self {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Patience => Algorithm::Patience,
            DiffAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

/// Kind of a diff span, from the point of view of the reference text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    /// Present in both texts.
    Unchanged,
    /// Present only in the reference text.
    Inserted,
    /// Present only in the other text.
    Removed,
}

impl SpanKind {
    /// The same span seen from the other text.
    pub fn mirrored(self) -> Self {
        match self {
            SpanKind::Unchanged => SpanKind::Unchanged,
            SpanKind::Inserted => SpanKind::Removed,
            SpanKind::Removed => SpanKind::Inserted,
        }
    }
}

/// A contiguous run of text with a single [`SpanKind`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSpan {
    pub kind: SpanKind,
    pub value: String,
}

impl DiffSpan {
    pub fn new(kind: SpanKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn unchanged(value: impl Into<String>) -> Self {
        Self::new(SpanKind::Unchanged, value)
    }

    pub fn inserted(value: impl Into<String>) -> Self {
        Self::new(SpanKind::Inserted, value)
    }

    pub fn removed(value: impl Into<String>) -> Self {
        Self::new(SpanKind::Removed, value)
    }
}

/// The ordered span sequence produced by diffing two texts.
///
/// Adjacent spans never share a kind and no span is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordDiff {
    spans: Vec<DiffSpan>,
}

impl WordDiff {
    pub fn spans(&self) -> &[DiffSpan] {
        &self.spans
    }

    pub fn into_spans(self) -> Vec<DiffSpan> {
        self.spans
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Returns `true` if the two texts were identical.
    pub fn is_unchanged(&self) -> bool {
        self.spans.iter().all(|s| s.kind == SpanKind::Unchanged)
    }

    /// Rebuild the reference text.
    pub fn reference_text(&self) -> String {
        self.collect_text(SpanKind::Removed)
    }

    /// Rebuild the other text.
    pub fn other_text(&self) -> String {
        self.collect_text(SpanKind::Inserted)
    }

    /// Number of words present only in the reference text.
    pub fn inserted_words(&self) -> usize {
        self.count_words(SpanKind::Inserted)
    }

    /// Number of words present only in the other text.
    pub fn removed_words(&self) -> usize {
        self.count_words(SpanKind::Removed)
    }

    /// The diff as seen with the two texts swapped.
    pub fn mirrored(&self) -> WordDiff {
        WordDiff {
            spans: self
                .spans
                .iter()
                .map(|s| DiffSpan::new(s.kind.mirrored(), s.value.clone()))
                .collect(),
        }
    }

    fn collect_text(&self, skip: SpanKind) -> String {
        self.spans
            .iter()
            .filter(|s| s.kind != skip)
            .map(|s| s.value.as_str())
            .collect()
    }

    fn count_words(&self, kind: SpanKind) -> usize {
        self.spans
            .iter()
            .filter(|s| s.kind == kind)
            .map(|s| s.value.split_whitespace().count())
            .sum()
    }

    /// Append a token, merging it into the previous span when kinds match.
    fn push(&mut self, kind: SpanKind, value: &str) {
        if value.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.kind == kind => last.value.push_str(value),
            _ => self.spans.push(DiffSpan::new(kind, value)),
        }
    }
}

/// Compute the word diff of `reference` against `other` with Myers' algorithm.
///
/// Words present only in `reference` are [`SpanKind::Inserted`]; words
/// present only in `other` are [`SpanKind::Removed`].
pub fn diff_words(reference: &str, other: &str) -> WordDiff {
    diff_words_with(reference, other, DiffAlgorithm::default())
}

/// Compute the word diff of `reference` against `other` with the given algorithm.
pub fn diff_words_with(reference: &str, other: &str, algorithm: DiffAlgorithm) -> WordDiff {
    let mut diff = WordDiff::default();

    // Identical texts never reach the sequence diff.
    if reference == other {
        diff.push(SpanKind::Unchanged, reference);
        return diff;
    }
    if other.is_empty() {
        diff.push(SpanKind::Inserted, reference);
        return diff;
    }
    if reference.is_empty() {
        diff.push(SpanKind::Removed, other);
        return diff;
    }

    let text_diff = TextDiff::configure()
        .algorithm(algorithm.to_similar())
        .diff_words(other, reference);

    for change in text_diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => SpanKind::Unchanged,
            ChangeTag::Insert => SpanKind::Inserted,
            ChangeTag::Delete => SpanKind::Removed,
        };
        diff.push(kind, change.value());
    }

    tracing::trace!(
        spans = diff.len(),
        inserted = diff.inserted_words(),
        removed = diff.removed_words(),
        "word diff computed"
    );
    diff
}
