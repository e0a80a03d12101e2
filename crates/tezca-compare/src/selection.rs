use tezca_types::DocumentId;

/// Maximum number of documents compared at once.
pub const MAX_SELECTED: usize = 2;

/// The documents a reader has picked for comparison, oldest first.
///
/// Selecting a third document evicts the oldest one, so the selection always
/// holds the two most recent picks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComparisonSelection {
    ids: Vec<DocumentId>,
}

impl ComparisonSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deselect `id` if selected, otherwise select it.
    pub fn toggle(&mut self, id: DocumentId) {
        if let Some(pos) = self.ids.iter().position(|selected| *selected == id) {
            self.ids.remove(pos);
            return;
        }
        if self.ids.len() >= MAX_SELECTED {
            self.ids.remove(0);
        }
        self.ids.push(id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[DocumentId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The `(left, right)` pair, once two documents are selected.
    pub fn pair(&self) -> Option<(&DocumentId, &DocumentId)> {
        match self.ids.as_slice() {
            [left, right] => Some((left, right)),
            _ => None,
        }
    }
}
