use contracts::domain::common::OptionItem;

use super::chain::{ChainEvent, SelectorChain};
use super::error::{ChainError, FetchError};
use super::source::DebounceTicket;

/// Render-ready state of one level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelView {
    pub index: usize,
    pub key: &'static str,
    pub title: &'static str,
    pub search_text: String,
    pub selected: Option<OptionItem>,
    /// Options after the client-side text filter
    pub options: Vec<OptionItem>,
    pub is_loading: bool,
    pub is_open: bool,
    pub error: Option<String>,
    /// False while the level's parent is unresolved
    pub enabled: bool,
}

/// Translates dropdown UI events into chain operations and keeps the
/// per-level open/closed flags. Several dropdowns may be open at once.
#[derive(Debug, Clone)]
pub struct ChainController {
    chain: SelectorChain,
    open: Vec<bool>,
}

impl ChainController {
    pub fn new(chain: SelectorChain) -> Self {
        let open = vec![false; chain.len()];
        Self { chain, open }
    }

    pub fn chain(&self) -> &SelectorChain {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    pub fn path(&self) -> Vec<OptionItem> {
        self.chain.path()
    }

    pub fn is_enabled(&self, level: usize) -> bool {
        match self.chain.level(level) {
            Some(spec) => !spec.requires_parent() || self.chain.parent_id(level).is_some(),
            None => false,
        }
    }

    pub fn view(&self, level: usize) -> Option<LevelView> {
        let spec = self.chain.level(level)?;
        let node = self.chain.node(level)?;

        // The committed label is not treated as a filter
        let filter = match &node.selected {
            Some(item) if item.label == node.search_text => "",
            _ => node.search_text.as_str(),
        };
        let options = node
            .options
            .iter()
            .filter(|o| o.matches(filter))
            .cloned()
            .collect();

        Some(LevelView {
            index: level,
            key: spec.key,
            title: spec.title,
            search_text: node.search_text.clone(),
            selected: node.selected.clone(),
            options,
            is_loading: node.is_loading,
            is_open: self.open.get(level).copied().unwrap_or(false),
            error: node.error.clone(),
            enabled: self.is_enabled(level),
        })
    }

    pub fn views(&self) -> Vec<LevelView> {
        (0..self.chain.len()).filter_map(|i| self.view(i)).collect()
    }

    pub fn on_text_change(&mut self, level: usize, text: &str) -> Vec<ChainEvent> {
        if !self.is_enabled(level) {
            return Vec::new();
        }
        self.set_open(level, true);
        Self::or_log(self.chain.set_search_text_at(level, text))
    }

    /// Opens the dropdown; an empty or failed level is refetched.
    pub fn on_focus(&mut self, level: usize) -> Vec<ChainEvent> {
        if !self.is_enabled(level) {
            return Vec::new();
        }
        self.set_open(level, true);
        match self.chain.node(level) {
            Some(node) if node.options.is_empty() && !node.is_loading => {
                Self::or_log(self.chain.refresh_at(level))
            }
            _ => Vec::new(),
        }
    }

    pub fn on_select(&mut self, level: usize, item: OptionItem) -> Vec<ChainEvent> {
        self.set_open(level, false);
        Self::or_log(self.chain.select_at(level, Some(item)))
    }

    pub fn on_clear(&mut self, level: usize) -> Vec<ChainEvent> {
        for open in self.open.iter_mut().skip(level + 1) {
            *open = false;
        }
        Self::or_log(self.chain.select_at(level, None))
    }

    /// Closes the dropdown without touching the selection. Returns whether
    /// the level was open.
    pub fn on_outside_click(&mut self, level: usize) -> bool {
        match self.open.get_mut(level) {
            Some(open) if *open => {
                *open = false;
                true
            }
            _ => false,
        }
    }

    pub fn hydrate(&mut self, items: Vec<OptionItem>) -> Result<Vec<ChainEvent>, ChainError> {
        self.close_all();
        self.chain.initialize_from_path(items)
    }

    pub fn reset(&mut self) {
        self.close_all();
        self.chain.reset();
    }

    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Vec<ChainEvent> {
        self.chain.debounce_elapsed(ticket)
    }

    pub fn resolve(
        &mut self,
        level: usize,
        seq: u64,
        result: Result<Vec<OptionItem>, FetchError>,
    ) -> bool {
        self.chain.resolve(level, seq, result)
    }

    pub fn dispose(&mut self) {
        self.chain.dispose();
    }

    fn set_open(&mut self, level: usize, value: bool) {
        if let Some(open) = self.open.get_mut(level) {
            *open = value;
        }
    }

    fn close_all(&mut self) {
        self.open.iter_mut().for_each(|o| *o = false);
    }

    fn or_log(result: Result<Vec<ChainEvent>, ChainError>) -> Vec<ChainEvent> {
        result.unwrap_or_else(|e| {
            log::warn!("selector chain: {}", e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::presets::location_levels;
    use super::*;

    fn controller() -> ChainController {
        ChainController::new(SelectorChain::new(location_levels(4), 500).unwrap())
    }

    fn item(id: i64, label: &str) -> OptionItem {
        OptionItem::new(id, label)
    }

    fn fetch_seq(events: &[ChainEvent]) -> u64 {
        events
            .iter()
            .find_map(|e| match e {
                ChainEvent::Fetch(r) => Some(r.seq),
                _ => None,
            })
            .expect("expected a fetch")
    }

    #[test]
    fn test_focus_fetches_root_once() {
        let mut c = controller();
        let events = c.on_focus(0);
        let seq = fetch_seq(&events);
        assert!(c.view(0).unwrap().is_open);
        assert!(c.view(0).unwrap().is_loading);

        // Still loading: re-focus does not stack another request
        assert!(c.on_focus(0).is_empty());

        assert!(c.resolve(0, seq, Ok(vec![item(1, "Afghanistan"), item(2, "Pakistan")])));
        assert!(c.on_focus(0).is_empty());
    }

    #[test]
    fn test_dependent_levels_are_disabled() {
        let mut c = controller();
        assert!(!c.view(1).unwrap().enabled);
        assert!(c.on_focus(1).is_empty());
        assert!(c.on_text_change(2, "kab").is_empty());
        assert!(!c.view(1).unwrap().is_open);
    }

    #[test]
    fn test_client_side_filter() {
        let mut c = controller();
        let seq = fetch_seq(&c.on_focus(0));
        c.resolve(0, seq, Ok(vec![item(1, "Afghanistan"), item(2, "Pakistan"), item(3, "Iran")]));

        c.on_text_change(0, "STAN");
        let labels: Vec<_> = c.view(0).unwrap().options.into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Afghanistan", "Pakistan"]);

        // After committing, the full list is offered again
        c.on_select(0, item(3, "Iran"));
        let view = c.view(0).unwrap();
        assert_eq!(view.search_text, "Iran");
        assert_eq!(view.options.len(), 3);
        assert!(!view.is_open);
    }

    #[test]
    fn test_outside_click_keeps_selection() {
        let mut c = controller();
        c.on_select(0, item(1, "Afghanistan"));
        c.on_focus(1);
        c.on_focus(0);
        // Multiple dropdowns may be open together
        assert!(c.view(0).unwrap().is_open && c.view(1).unwrap().is_open);

        assert!(c.on_outside_click(1));
        assert!(!c.on_outside_click(1));
        assert!(c.view(0).unwrap().is_open);
        assert_eq!(c.path(), vec![item(1, "Afghanistan")]);
    }

    #[test]
    fn test_clear_closes_deeper_dropdowns() {
        let mut c = controller();
        c.hydrate(vec![item(1, "Afghanistan"), item(10, "Kabul")]).unwrap();
        c.on_focus(2);
        assert!(c.view(2).unwrap().is_open);

        let events = c.on_clear(0);
        assert!(matches!(events.last(), Some(ChainEvent::PathChanged(p)) if p.is_empty()));
        assert!(!c.view(2).unwrap().is_open);
        assert!(!c.view(1).unwrap().enabled);
    }

    #[test]
    fn test_reset_closes_everything() {
        let mut c = controller();
        c.on_focus(0);
        c.reset();
        assert!(c.views().iter().all(|v| !v.is_open && v.selected.is_none()));
    }
}
