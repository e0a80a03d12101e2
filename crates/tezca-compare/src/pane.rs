//! Render models of the two comparison panes.
//!
//! The render mode of every article is decided once, when both documents are
//! loaded: identical matched articles render as plain text, differing matched
//! articles carry a word diff, and unplaced articles carry an "only here"
//! marker for their side.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tezca_diff::{align, diff_words_with, AlignmentResult, WordDiff};
use tezca_types::{Article, DocumentId, DocumentSnapshot, Side};

use crate::config::CompareConfig;
use crate::outline::{render_outline, OutlineEntry};

/// Badge attached to an article header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "side")]
pub enum Marker {
    /// Matched in both documents with different text.
    Differences,
    /// Present only in the document on this side.
    OnlyHere(Side),
}

/// Visual treatment of a [`Marker`].
///
/// Left-unique and right-unique articles always get distinct styles so the
/// two directions can be told apart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    Changed,
    LeftUnique,
    RightUnique,
}

impl MarkerStyle {
    pub fn for_marker(marker: Marker) -> Self {
        match marker {
            Marker::Differences => MarkerStyle::Changed,
            Marker::OnlyHere(Side::Left) => MarkerStyle::LeftUnique,
            Marker::OnlyHere(Side::Right) => MarkerStyle::RightUnique,
        }
    }
}

/// How an article body is painted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "body")]
pub enum RenderMode {
    Plain(String),
    /// Word diff from this pane's point of view: inserted spans exist only
    /// on this side, removed spans only on the other.
    Diffed(WordDiff),
}

/// One article as it appears in a pane.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleView {
    pub article_id: String,
    pub mode: RenderMode,
    pub marker: Option<Marker>,
}

impl ArticleView {
    pub fn marker_style(&self) -> Option<MarkerStyle> {
        self.marker.map(MarkerStyle::for_marker)
    }

    pub fn is_diffed(&self) -> bool {
        matches!(self.mode, RenderMode::Diffed(_))
    }
}

/// Everything one pane shows: header badges, outline sidebar, and articles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneModel {
    pub side: Side,
    pub document_id: DocumentId,
    pub display_name: String,
    /// Articles received and shown.
    pub article_count: usize,
    /// Article total reported by the source, or `article_count` if none was.
    pub total_articles: usize,
    pub matched_count: usize,
    pub unique_count: usize,
    pub outline: Vec<OutlineEntry>,
    pub articles: Vec<ArticleView>,
}

/// A fully built comparison of two documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    pub left: PaneModel,
    pub right: PaneModel,
    pub alignment: AlignmentResult,
}

impl Comparison {
    pub fn pane(&self, side: Side) -> &PaneModel {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Number of matched articles whose texts differ.
    pub fn differing_count(&self) -> usize {
        self.left.articles.iter().filter(|a| a.is_diffed()).count()
    }
}

/// Words in matched articles whose texts differ, across both documents.
///
/// This is the input size of the diff work a comparison needs.
pub fn pending_diff_words(left: &DocumentSnapshot, right: &DocumentSnapshot) -> usize {
    differing_pairs(left, right)
        .map(|(l, r)| l.word_count() + r.word_count())
        .sum()
}

/// Build both panes. Never cancelled.
pub fn build_comparison(
    left: &DocumentSnapshot,
    right: &DocumentSnapshot,
    config: &CompareConfig,
) -> Comparison {
    let diffs: HashMap<&str, WordDiff> = differing_pairs(left, right)
        .map(|(l, r)| {
            let diff = diff_words_with(&l.text, &r.text, config.diff_algorithm);
            (l.article_id.as_str(), diff)
        })
        .collect();
    assemble(left, right, config, &diffs)
}

/// Build both panes, checking `is_cancelled` before every diff.
///
/// Returns `None` as soon as cancellation is observed; partial work is dropped.
pub fn build_comparison_until(
    left: &DocumentSnapshot,
    right: &DocumentSnapshot,
    config: &CompareConfig,
    is_cancelled: &dyn Fn() -> bool,
) -> Option<Comparison> {
    let mut diffs = HashMap::new();
    for (l, r) in differing_pairs(left, right) {
        if is_cancelled() {
            return None;
        }
        let diff = diff_words_with(&l.text, &r.text, config.diff_algorithm);
        diffs.insert(l.article_id.as_str(), diff);
    }
    Some(assemble(left, right, config, &diffs))
}

/// Matched article pairs whose texts differ, in left display order.
fn differing_pairs<'a>(
    left: &'a DocumentSnapshot,
    right: &'a DocumentSnapshot,
) -> impl Iterator<Item = (&'a Article, &'a Article)> + 'a {
    let right_by_id: HashMap<&str, &Article> = right
        .articles()
        .iter()
        .map(|a| (a.article_id.as_str(), a))
        .collect();
    left.articles()
        .iter()
        .filter_map(move |l| right_by_id.get(l.article_id.as_str()).map(|r| (l, *r)))
        .filter(|(l, r)| l.text != r.text)
}

/// Lay out both panes. `diffs` holds one diff per differing pair, keyed by
/// article id, with the left text as reference.
fn assemble(
    left: &DocumentSnapshot,
    right: &DocumentSnapshot,
    config: &CompareConfig,
    diffs: &HashMap<&str, WordDiff>,
) -> Comparison {
    let alignment = align(left.articles(), right.articles());
    let left_articles = article_views(Side::Left, left.articles(), &alignment, diffs);
    let right_articles = article_views(Side::Right, right.articles(), &alignment, diffs);
    Comparison {
        left: pane(Side::Left, left, &alignment, left_articles, config),
        right: pane(Side::Right, right, &alignment, right_articles, config),
        alignment,
    }
}

fn article_views(
    side: Side,
    articles: &[Article],
    alignment: &AlignmentResult,
    diffs: &HashMap<&str, WordDiff>,
) -> Vec<ArticleView> {
    articles
        .iter()
        .map(|article| match diffs.get(article.article_id.as_str()) {
            Some(diff) => ArticleView {
                article_id: article.article_id.clone(),
                mode: RenderMode::Diffed(match side {
                    Side::Left => diff.clone(),
                    Side::Right => diff.mirrored(),
                }),
                marker: Some(Marker::Differences),
            },
            None if alignment.is_matched(&article.article_id) => plain(article, None),
            None => plain(article, Some(Marker::OnlyHere(side))),
        })
        .collect()
}

fn plain(article: &Article, marker: Option<Marker>) -> ArticleView {
    ArticleView {
        article_id: article.article_id.clone(),
        mode: RenderMode::Plain(article.text.clone()),
        marker,
    }
}

fn pane(
    side: Side,
    snapshot: &DocumentSnapshot,
    alignment: &AlignmentResult,
    articles: Vec<ArticleView>,
    config: &CompareConfig,
) -> PaneModel {
    PaneModel {
        side,
        document_id: snapshot.document_id().clone(),
        display_name: snapshot.display_name().to_string(),
        article_count: snapshot.len(),
        total_articles: snapshot.total(),
        matched_count: alignment.matched_ids.len(),
        unique_count: alignment.unique_to(side).len(),
        outline: render_outline(snapshot.outline(), 0, &config.outline),
        articles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tezca_diff::DiffSpan;
    use tezca_types::OutlineNode;

    fn snapshot(id: &str, articles: &[(&str, &str)]) -> DocumentSnapshot {
        DocumentSnapshot::new(
            DocumentId::new(id).unwrap(),
            format!("Ley {id}"),
            articles.iter().map(|(a, t)| Article::new(*a, *t)).collect(),
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn identical_matched_article_is_plain() {
        let left = snapshot("a", &[("1", "Hello world")]);
        let right = snapshot("b", &[("1", "Hello world")]);
        let c = build_comparison(&left, &right, &CompareConfig::default());
        for side in [Side::Left, Side::Right] {
            let view = &c.pane(side).articles[0];
            assert_eq!(view.mode, RenderMode::Plain("Hello world".into()));
            assert!(view.marker.is_none());
        }
        assert_eq!(c.differing_count(), 0);
    }

    #[test]
    fn differing_matched_article_is_diffed_both_ways() {
        let left = snapshot("a", &[("Art 1", "Text 1")]);
        let right = snapshot("b", &[("Art 1", "Text 1 modified")]);
        let c = build_comparison(&left, &right, &CompareConfig::default());

        let l = &c.left.articles[0];
        assert_eq!(l.marker, Some(Marker::Differences));
        assert_eq!(l.marker_style(), Some(MarkerStyle::Changed));
        match &l.mode {
            RenderMode::Diffed(diff) => assert_eq!(
                diff.spans(),
                &[DiffSpan::unchanged("Text 1"), DiffSpan::removed(" modified")]
            ),
            other => panic!("expected diff, got {other:?}"),
        }

        let r = &c.right.articles[0];
        assert_eq!(r.marker, Some(Marker::Differences));
        match &r.mode {
            RenderMode::Diffed(diff) => assert_eq!(
                diff.spans(),
                &[DiffSpan::unchanged("Text 1"), DiffSpan::inserted(" modified")]
            ),
            other => panic!("expected diff, got {other:?}"),
        }
        assert_eq!(c.differing_count(), 1);
    }

    #[test]
    fn unique_articles_have_side_markers() {
        let left = snapshot("a", &[("1", "A")]);
        let right = snapshot("b", &[("2", "B")]);
        let c = build_comparison(&left, &right, &CompareConfig::default());
        let l = &c.left.articles[0];
        let r = &c.right.articles[0];
        assert_eq!(l.marker, Some(Marker::OnlyHere(Side::Left)));
        assert_eq!(r.marker, Some(Marker::OnlyHere(Side::Right)));
        assert_eq!(l.mode, RenderMode::Plain("A".into()));
        assert_ne!(l.marker_style(), r.marker_style());
    }

    #[test]
    fn header_counts() {
        let left = snapshot("a", &[("1", "x"), ("2", "y"), ("3", "z")]);
        let right = snapshot("b", &[("2", "y"), ("4", "w")]);
        let c = build_comparison(&left, &right, &CompareConfig::default());
        assert_eq!(c.left.article_count, 3);
        assert_eq!(c.left.matched_count, 1);
        assert_eq!(c.left.unique_count, 2);
        assert_eq!(c.right.article_count, 2);
        assert_eq!(c.right.unique_count, 1);
        assert_eq!(c.left.display_name, "Ley a");
    }

    #[test]
    fn header_shows_declared_total() {
        let left = snapshot("a", &[("1", "x")]).with_declared_total(Some(1054));
        let right = snapshot("b", &[("1", "x")]);
        let c = build_comparison(&left, &right, &CompareConfig::default());
        assert_eq!(c.left.article_count, 1);
        assert_eq!(c.left.total_articles, 1054);
        assert_eq!(c.right.total_articles, 1);
    }

    #[test]
    fn cancellable_build_matches_plain_build() {
        let left = snapshot("a", &[("1", "uno dos"), ("2", "solo"), ("3", "tres")]);
        let right = snapshot("b", &[("3", "tres cuatro"), ("1", "uno"), ("4", "otro")]);
        let config = CompareConfig::default();
        let until = build_comparison_until(&left, &right, &config, &|| false).unwrap();
        assert_eq!(until, build_comparison(&left, &right, &config));
    }

    #[test]
    fn articles_keep_source_order() {
        let left = snapshot("a", &[("3", "c"), ("1", "a")]);
        let right = snapshot("b", &[("1", "a"), ("9", "q"), ("3", "c")]);
        let c = build_comparison(&left, &right, &CompareConfig::default());
        let ids: Vec<&str> = c.right.articles.iter().map(|a| a.article_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "9", "3"]);
    }

    #[test]
    fn empty_documents() {
        let (left, right) = (snapshot("a", &[]), snapshot("b", &[]));
        let c = build_comparison(&left, &right, &CompareConfig::default());
        assert!(c.left.articles.is_empty());
        assert!(c.right.articles.is_empty());
        assert_eq!(c.left.outline, vec![OutlineEntry::Placeholder]);
        assert_eq!(c.alignment, AlignmentResult::default());
    }

    #[test]
    fn outline_rendered_per_side() {
        let left = DocumentSnapshot::new(
            DocumentId::new("a").unwrap(),
            "A",
            vec![],
            vec![OutlineNode::leaf("Book I")],
        )
        .unwrap();
        let c = build_comparison(&left, &snapshot("b", &[]), &CompareConfig::default());
        assert_eq!(c.left.outline.len(), 1);
        assert_eq!(c.right.outline, vec![OutlineEntry::Placeholder]);
    }

    #[test]
    fn identical_texts_skip_diffing() {
        let left = snapshot("a", &[("1", "same"), ("2", "left text")]);
        let right = snapshot("b", &[("1", "same"), ("2", "right text")]);
        let checks = Cell::new(0);
        let c = build_comparison_until(&left, &right, &CompareConfig::default(), &|| {
            checks.set(checks.get() + 1);
            false
        })
        .unwrap();
        assert_eq!(checks.get(), 1);
        assert_eq!(c.differing_count(), 1);
    }

    #[test]
    fn cancellation_drops_work() {
        let left = snapshot("a", &[("1", "uno"), ("2", "dos")]);
        let right = snapshot("b", &[("1", "one"), ("2", "two")]);
        let config = CompareConfig::default();
        assert!(build_comparison_until(&left, &right, &config, &|| true).is_none());
    }

    #[test]
    fn pending_words_counts_only_differing_pairs() {
        let left = snapshot("a", &[("1", "same text"), ("2", "a b c"), ("3", "only left")]);
        let right = snapshot("b", &[("1", "same text"), ("2", "a b")]);
        assert_eq!(pending_diff_words(&left, &right), 5);
    }
}
