//! Article alignment: match the articles of two documents by identifier.
//!
//! Article identifiers are official numberings that stay stable across the
//! documents being compared, so alignment is an exact set intersection. No
//! positional or similarity heuristic is applied.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tezca_types::{Article, Side};

/// How a single article id relates to the two documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "side")]
pub enum Classification {
    /// Present in both documents.
    Matched,
    /// Present only in the document on the given side.
    Unique(Side),
}

/// The matched and unique article ids of a document pair.
///
/// Every left id is either matched or unique to the left, every right id is
/// either matched or unique to the right, and no id is unique to both sides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub matched_ids: BTreeSet<String>,
    pub unique_to_left: BTreeSet<String>,
    pub unique_to_right: BTreeSet<String>,
}

impl AlignmentResult {
    pub fn is_matched(&self, article_id: &str) -> bool {
        self.matched_ids.contains(article_id)
    }

    /// Ids present only on `side`.
    pub fn unique_to(&self, side: Side) -> &BTreeSet<String> {
        match side {
            Side::Left => &self.unique_to_left,
            Side::Right => &self.unique_to_right,
        }
    }

    /// Classify an id found on `side`.
    ///
    /// An id is reported as unique to `side` whenever it is not matched; the
    /// caller is responsible for only asking about ids of that side.
    pub fn classify(&self, side: Side, article_id: &str) -> Classification {
        if self.is_matched(article_id) {
            Classification::Matched
        } else {
            Classification::Unique(side)
        }
    }

    /// Number of distinct ids across both documents.
    pub fn total_ids(&self) -> usize {
        self.matched_ids.len() + self.unique_to_left.len() + self.unique_to_right.len()
    }

    /// Returns `true` if the documents share no article id.
    pub fn is_disjoint(&self) -> bool {
        self.matched_ids.is_empty()
    }
}

/// Align two article lists by `article_id`.
///
/// Runs in O(n + m). Empty inputs yield empty sets.
pub fn align(left: &[Article], right: &[Article]) -> AlignmentResult {
    let left_ids: HashSet<&str> = left.iter().map(|a| a.article_id.as_str()).collect();
    let right_ids: HashSet<&str> = right.iter().map(|a| a.article_id.as_str()).collect();

    let mut result = AlignmentResult::default();

    for id in &left_ids {
        if right_ids.contains(id) {
            result.matched_ids.insert((*id).to_string());
        } else {
            result.unique_to_left.insert((*id).to_string());
        }
    }

    for id in &right_ids {
        if !left_ids.contains(id) {
            result.unique_to_right.insert((*id).to_string());
        }
    }

    tracing::debug!(
        matched = result.matched_ids.len(),
        unique_left = result.unique_to_left.len(),
        unique_right = result.unique_to_right.len(),
        "articles aligned"
    );
    result
}
