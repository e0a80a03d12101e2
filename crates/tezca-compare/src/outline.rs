//! Outline rendering: flatten a document's structure tree into a navigation list.
//!
//! Rendering is a pure function of the tree. Entries come out in pre-order,
//! each tagged with its depth, so a presentation layer can indent, collapse,
//! and truncate without walking the tree again.

use std::fmt;

use serde::{Deserialize, Serialize};
use tezca_types::OutlineNode;

const ELLIPSIS: char = '…';

/// Presentation limits of the outline navigation list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineOptions {
    /// Labels longer than this many characters are shortened with an
    /// ellipsis. `0` disables truncation.
    pub max_label_chars: usize,
    /// Deepest depth rendered, if any. Nodes below it are not listed.
    pub max_depth: Option<usize>,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            max_label_chars: 80,
            max_depth: None,
        }
    }
}

/// One line of the rendered outline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutlineEntry {
    /// Shown in place of an empty outline.
    Placeholder,
    Node {
        depth: usize,
        /// Display label, possibly truncated.
        label: String,
        /// Full label.
        title: String,
        /// The node has children that may be collapsed.
        collapsible: bool,
    },
}

impl OutlineEntry {
    pub fn depth(&self) -> usize {
        match self {
            OutlineEntry::Placeholder => 0,
            OutlineEntry::Node { depth, .. } => *depth,
        }
    }
}

impl fmt::Display for OutlineEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineEntry::Placeholder => f.write_str("(no structure available)"),
            OutlineEntry::Node { depth, label, .. } => {
                write!(f, "{:indent$}{label}", "", indent = depth * 2)
            }
        }
    }
}

/// Render `nodes` as found at `depth`.
///
/// An empty outline at depth 0 yields a single [`OutlineEntry::Placeholder`];
/// empty children below the root yield nothing.
pub fn render_outline(
    nodes: &[OutlineNode],
    depth: usize,
    options: &OutlineOptions,
) -> Vec<OutlineEntry> {
    if nodes.is_empty() {
        return if depth == 0 {
            vec![OutlineEntry::Placeholder]
        } else {
            Vec::new()
        };
    }
    let mut entries = Vec::new();
    render_into(nodes, depth, options, &mut entries);
    entries
}

fn render_into(
    nodes: &[OutlineNode],
    depth: usize,
    options: &OutlineOptions,
    out: &mut Vec<OutlineEntry>,
) {
    if options.max_depth.is_some_and(|max| depth > max) {
        return;
    }
    for node in nodes {
        out.push(OutlineEntry::Node {
            depth,
            label: truncate_label(&node.label, options.max_label_chars),
            title: node.label.clone(),
            collapsible: !node.children.is_empty(),
        });
        render_into(&node.children, depth + 1, options, out);
    }
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if max_chars == 0 || label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut short: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    short.push(ELLIPSIS);
    short
}
