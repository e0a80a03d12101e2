use serde::{Deserialize, Serialize};

/// One identified article of a legal document.
///
/// `article_id` is the official numbering of the article ("1", "5 bis",
/// "Transitorio Primero"). It is unique within a document and stable across
/// the documents being compared.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: String,
    pub text: String,
}

impl Article {
    pub fn new(article_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            article_id: article_id.into(),
            text: text.into(),
        }
    }

    /// Number of whitespace-delimited words in the article text.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// A node of a document's structural outline (book, title, chapter, ...).
///
/// Labels are not required to be unique among siblings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub label: String,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// A node without children.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<OutlineNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::node_count).sum::<usize>()
    }

    /// Height of this subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(OutlineNode::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_ignores_whitespace_runs() {
        let article = Article::new("1", "  Todo  individuo\tgozará\n de garantías ");
        assert_eq!(article.word_count(), 5);
        assert_eq!(Article::new("2", "").word_count(), 0);
    }

    #[test]
    fn outline_children_default_to_empty() {
        let node: OutlineNode = serde_json::from_str(r#"{"label":"Libro Primero"}"#).unwrap();
        assert_eq!(node.label, "Libro Primero");
        assert!(node.is_leaf());
    }

    #[test]
    fn outline_counts() {
        let tree = OutlineNode::with_children(
            "Título I",
            vec![
                OutlineNode::with_children("Capítulo I", vec![OutlineNode::leaf("Sección 1")]),
                OutlineNode::leaf("Capítulo II"),
            ],
        );
        assert_eq!(tree.node_count(), 4);
        assert_eq!(tree.depth(), 3);
        assert_eq!(OutlineNode::leaf("x").depth(), 1);
    }
}
