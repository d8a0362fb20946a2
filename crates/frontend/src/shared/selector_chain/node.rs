use contracts::domain::common::OptionItem;

/// Per-level selection state. Mutated only by `SelectorChain`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionNode {
    pub key: &'static str,
    pub search_text: String,
    pub selected: Option<OptionItem>,
    pub options: Vec<OptionItem>,
    pub is_loading: bool,
    /// Last fetch failure for this level
    pub error: Option<String>,
}

impl SelectionNode {
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            ..Default::default()
        }
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn set_options(&mut self, items: Vec<OptionItem>) {
        self.options = items;
        self.error = None;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn set_error(&mut self, message: String) {
        self.options.clear();
        self.error = Some(message);
    }

    /// Commit a choice; the input text follows the committed label.
    pub fn select(&mut self, item: Option<OptionItem>) {
        self.search_text = item.as_ref().map(|i| i.label.clone()).unwrap_or_default();
        self.selected = item;
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.key);
    }

    pub fn is_selected(&self) -> bool {
        self.selected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_mirrors_label_into_search_text() {
        let mut node = SelectionNode::new("country");
        node.set_search_text("afg");
        node.select(Some(OptionItem::new(1, "Afghanistan")));
        assert_eq!(node.search_text, "Afghanistan");

        node.select(None);
        assert_eq!(node.search_text, "");
        assert!(!node.is_selected());
    }

    #[test]
    fn test_error_empties_options() {
        let mut node = SelectionNode::new("city");
        node.set_options(vec![OptionItem::new(1, "Kabul")]);
        node.set_error("Request failed: 500".into());
        assert!(node.options.is_empty());

        node.set_options(vec![OptionItem::new(2, "Herat")]);
        assert_eq!(node.error, None);
    }
}
