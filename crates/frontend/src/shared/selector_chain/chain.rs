use contracts::domain::common::{Identifier, OptionItem};

use super::error::{ChainError, FetchError};
use super::level::LevelSpec;
use super::node::SelectionNode;
use super::source::{DebounceTicket, FetchRequest, RemoteOptionSource, SourceAction};

/// Side effect requested by a chain operation. The chain itself never awaits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    Fetch(FetchRequest),
    Debounce(DebounceTicket),
    /// Resolved prefix of the chain after a selection change
    PathChanged(Vec<OptionItem>),
}

/// Ordered dependent selection levels.
///
/// Invariant: a node can only hold a selection if every node above it does.
/// Any selection change wipes all deeper nodes and refetches the next level only.
#[derive(Debug, Clone)]
pub struct SelectorChain {
    levels: Vec<LevelSpec>,
    /// Index of the level each level depends on
    parents: Vec<Option<usize>>,
    nodes: Vec<SelectionNode>,
    sources: Vec<RemoteOptionSource>,
    disposed: bool,
}

impl SelectorChain {
    pub fn new(levels: Vec<LevelSpec>, debounce_ms: u32) -> Result<Self, ChainError> {
        if levels.is_empty() {
            return Err(ChainError::NoLevels);
        }

        let mut parents = Vec::with_capacity(levels.len());
        for (i, spec) in levels.iter().enumerate() {
            if levels[..i].iter().any(|l| l.key == spec.key) {
                return Err(ChainError::DuplicateKey(spec.key));
            }
            let parent = match spec.depends_on {
                Some(parent_key) => Some(
                    levels[..i]
                        .iter()
                        .position(|l| l.key == parent_key)
                        .ok_or(ChainError::InvalidDependency {
                            level: spec.key,
                            parent: parent_key,
                        })?,
                ),
                None => None,
            };
            parents.push(parent);
        }

        let nodes = levels.iter().map(|l| SelectionNode::new(l.key)).collect();
        let sources = levels
            .iter()
            .enumerate()
            .map(|(i, l)| RemoteOptionSource::new(i, l, debounce_ms))
            .collect();

        Ok(Self {
            levels,
            parents,
            nodes,
            sources,
            disposed: false,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn level(&self, index: usize) -> Option<&LevelSpec> {
        self.levels.get(index)
    }

    pub fn node(&self, index: usize) -> Option<&SelectionNode> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[SelectionNode] {
        &self.nodes
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.key == key)
    }

    /// Selected items from the top down to the first unresolved level
    pub fn path(&self) -> Vec<OptionItem> {
        self.nodes.iter().map_while(|n| n.selected.clone()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.nodes.iter().all(SelectionNode::is_selected)
    }

    /// Id the fetch of `level` is filtered by, if its parent is resolved
    pub fn parent_id(&self, level: usize) -> Option<Identifier> {
        let parent = self.parents.get(level).copied().flatten()?;
        self.nodes[parent].selected.as_ref().map(|i| i.id)
    }

    fn parent_resolved(&self, level: usize) -> bool {
        !self.levels[level].requires_parent() || self.parent_id(level).is_some()
    }

    fn check(&self, level: usize) -> Result<(), ChainError> {
        if level < self.nodes.len() {
            Ok(())
        } else {
            Err(ChainError::OutOfRange(level))
        }
    }

    /// Commit `item` (or clear with `None`) at `level`.
    pub fn select_at(
        &mut self,
        level: usize,
        item: Option<OptionItem>,
    ) -> Result<Vec<ChainEvent>, ChainError> {
        self.check(level)?;
        if item.is_some() && level > 0 && !self.nodes[level - 1].is_selected() {
            return Err(ChainError::UnresolvedAncestor(self.levels[level].key));
        }

        self.sources[level].cancel_pending();
        self.nodes[level].select(item);
        for j in level + 1..self.nodes.len() {
            self.nodes[j].clear();
            self.sources[j].invalidate();
        }

        let mut events = Vec::with_capacity(2);
        let next = level + 1;
        if next < self.nodes.len() {
            let parent_id = self.parent_id(next);
            let action = self.sources[next].request_now(parent_id, "");
            events.extend(self.apply(next, action));
        }
        events.push(ChainEvent::PathChanged(self.path()));
        Ok(events)
    }

    /// Update the picker text of `level`; refetches (debounced) only when the
    /// level's parent is resolved.
    pub fn set_search_text_at(
        &mut self,
        level: usize,
        text: &str,
    ) -> Result<Vec<ChainEvent>, ChainError> {
        self.check(level)?;
        self.nodes[level].set_search_text(text);
        if !self.parent_resolved(level) {
            return Ok(Vec::new());
        }
        let parent_id = self.parent_id(level);
        let action = self.sources[level].request(parent_id, text);
        Ok(self.apply(level, action).into_iter().collect())
    }

    /// Refetch `level` immediately with its current text. Used when the user
    /// re-focuses a level whose options are empty or failed.
    pub fn refresh_at(&mut self, level: usize) -> Result<Vec<ChainEvent>, ChainError> {
        self.check(level)?;
        if !self.parent_resolved(level) {
            return Ok(Vec::new());
        }
        let node = &self.nodes[level];
        // A committed label is not a search
        let text = match &node.selected {
            Some(item) if item.label == node.search_text => String::new(),
            _ => node.search_text.clone(),
        };
        let parent_id = self.parent_id(level);
        let action = self.sources[level].request_now(parent_id, &text);
        Ok(self.apply(level, action).into_iter().collect())
    }

    /// Edit-mode hydration: selects `items` top-down without intermediate
    /// path notifications, then emits a single `PathChanged`. Only the first
    /// unresolved level (if any) is fetched.
    pub fn initialize_from_path(
        &mut self,
        items: Vec<OptionItem>,
    ) -> Result<Vec<ChainEvent>, ChainError> {
        if items.len() > self.nodes.len() {
            return Err(ChainError::PathTooLong {
                given: items.len(),
                len: self.nodes.len(),
            });
        }

        self.clear_all();
        let resolved = items.len();
        for (node, item) in self.nodes.iter_mut().zip(items) {
            node.select(Some(item));
        }

        let mut events = Vec::with_capacity(2);
        if resolved < self.nodes.len() {
            let parent_id = self.parent_id(resolved);
            let action = self.sources[resolved].request_now(parent_id, "");
            events.extend(self.apply(resolved, action));
        }
        events.push(ChainEvent::PathChanged(self.path()));
        Ok(events)
    }

    /// Back to the initial empty state. Root options are not refetched.
    pub fn reset(&mut self) {
        self.clear_all();
    }

    /// Debounce window of `ticket` elapsed.
    pub fn debounce_elapsed(&mut self, ticket: DebounceTicket) -> Vec<ChainEvent> {
        if self.disposed || ticket.level >= self.sources.len() {
            return Vec::new();
        }
        match self.sources[ticket.level].elapse(ticket.ticket) {
            Some(request) => self
                .apply(ticket.level, SourceAction::Fetch(request))
                .into_iter()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Deliver the outcome of a fetch. Returns false when the response was
    /// stale (superseded, invalidated, or the chain was disposed).
    pub fn resolve(
        &mut self,
        level: usize,
        seq: u64,
        result: Result<Vec<OptionItem>, FetchError>,
    ) -> bool {
        if self.disposed || level >= self.sources.len() {
            return false;
        }
        if !self.sources[level].accept(seq) {
            log::debug!(
                "discarding stale response #{} for level `{}`",
                seq,
                self.levels[level].key
            );
            return false;
        }

        let node = &mut self.nodes[level];
        node.set_loading(false);
        match result {
            Ok(items) => node.set_options(items),
            Err(e) => {
                log::warn!("fetch for level `{}` failed: {}", node.key, e);
                node.set_error(e.to_string());
            }
        }
        true
    }

    /// Unmount guard: every later resolution or debounce is ignored.
    pub fn dispose(&mut self) {
        self.disposed = true;
        for source in &mut self.sources {
            source.invalidate();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn clear_all(&mut self) {
        for node in &mut self.nodes {
            node.clear();
        }
        for source in &mut self.sources {
            source.invalidate();
        }
    }

    fn apply(&mut self, level: usize, action: SourceAction) -> Option<ChainEvent> {
        let node = &mut self.nodes[level];
        match action {
            SourceAction::Fetch(request) => {
                node.set_loading(true);
                Some(ChainEvent::Fetch(request))
            }
            SourceAction::Debounce(ticket) => Some(ChainEvent::Debounce(ticket)),
            SourceAction::Empty => {
                node.set_loading(false);
                node.options.clear();
                None
            }
            SourceAction::Unchanged => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::presets::location_levels;
    use super::super::source::DEFAULT_DEBOUNCE_MS;
    use super::*;
    use contracts::shared::list_resource::ListResource;

    fn chain() -> SelectorChain {
        SelectorChain::new(location_levels(4), DEFAULT_DEBOUNCE_MS).unwrap()
    }

    fn item(id: i64, label: &str) -> OptionItem {
        OptionItem::new(id, label)
    }

    fn fetches(events: &[ChainEvent]) -> Vec<&FetchRequest> {
        events
            .iter()
            .filter_map(|e| match e {
                ChainEvent::Fetch(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn first_fetch(events: &[ChainEvent]) -> FetchRequest {
        fetches(events)
            .first()
            .map(|r| (*r).clone())
            .expect("expected a fetch request")
    }

    fn paths(events: &[ChainEvent]) -> Vec<&Vec<OptionItem>> {
        events
            .iter()
            .filter_map(|e| match e {
                ChainEvent::PathChanged(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn resolved_chain() -> SelectorChain {
        let mut c = chain();
        c.initialize_from_path(vec![
            item(1, "Afghanistan"),
            item(10, "Kabul"),
            item(100, "Kabul City"),
            item(1000, "Central"),
        ])
        .unwrap();
        c
    }

    fn assert_no_orphans(c: &SelectorChain) {
        let nodes = c.nodes();
        for i in 0..nodes.len() {
            if nodes[i].selected.is_none() {
                assert!(
                    nodes[i + 1..].iter().all(|n| n.selected.is_none()),
                    "orphaned selection below level {}",
                    i
                );
            }
        }
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert_eq!(
            SelectorChain::new(vec![], 500).err(),
            Some(ChainError::NoLevels)
        );

        let levels = vec![
            LevelSpec::root("country", "Country", ListResource::Countries),
            LevelSpec::child("city", "City", ListResource::Cities, "province"),
        ];
        assert_eq!(
            SelectorChain::new(levels, 500).err(),
            Some(ChainError::InvalidDependency {
                level: "city",
                parent: "province"
            })
        );

        let levels = vec![
            LevelSpec::root("country", "Country", ListResource::Countries),
            LevelSpec::root("country", "Country", ListResource::Countries),
        ];
        assert_eq!(
            SelectorChain::new(levels, 500).err(),
            Some(ChainError::DuplicateKey("country"))
        );
    }

    #[test]
    fn test_no_orphaned_descendants() {
        let mut c = resolved_chain();
        assert_no_orphans(&c);

        c.select_at(2, None).unwrap();
        assert_no_orphans(&c);
        assert_eq!(c.path().len(), 2);

        // Cannot jump below the cleared level
        assert_eq!(
            c.select_at(3, Some(item(1001, "North"))),
            Err(ChainError::UnresolvedAncestor("station"))
        );
        assert_no_orphans(&c);

        c.select_at(0, Some(item(2, "Pakistan"))).unwrap();
        assert_no_orphans(&c);
        c.select_at(1, Some(item(20, "Punjab"))).unwrap();
        assert_no_orphans(&c);
        c.select_at(0, None).unwrap();
        assert_no_orphans(&c);
        assert!(c.path().is_empty());
    }

    #[test]
    fn test_reset_cascade_on_upstream_change() {
        let mut c = resolved_chain();
        let events = c.select_at(0, Some(item(2, "Pakistan"))).unwrap();

        for level in 1..4 {
            let node = c.node(level).unwrap();
            assert_eq!(node.selected, None);
            assert_eq!(node.search_text, "");
        }
        assert!(c.node(2).unwrap().options.is_empty());

        let fetched = fetches(&events);
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].level, 1);
        assert_eq!(fetched[0].parent_id, Some(2));
        assert_eq!(fetched[0].search_text, "");
        assert!(c.node(1).unwrap().is_loading);

        assert_eq!(paths(&events), vec![&vec![item(2, "Pakistan")]]);
    }

    #[test]
    fn test_search_is_debounced_to_last_text() {
        let mut c = chain();
        c.select_at(0, Some(item(1, "Afghanistan"))).unwrap();

        let mut tickets = Vec::new();
        for text in ["a", "ab", "abc"] {
            let events = c.set_search_text_at(1, text).unwrap();
            assert!(fetches(&events).is_empty());
            for e in events {
                if let ChainEvent::Debounce(t) = e {
                    assert_eq!(t.delay_ms, 500);
                    tickets.push(t);
                }
            }
        }
        assert_eq!(tickets.len(), 3);

        let mut issued = Vec::new();
        for t in tickets {
            issued.extend(c.debounce_elapsed(t));
        }
        let fetched = fetches(&issued);
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].search_text, "abc");
        assert_eq!(fetched[0].parent_id, Some(1));
        assert_eq!(c.node(1).unwrap().search_text, "abc");
    }

    #[test]
    fn test_search_without_parent_does_not_fetch() {
        let mut c = chain();
        let events = c.set_search_text_at(2, "kab").unwrap();
        assert!(events.is_empty());
        assert_eq!(c.node(2).unwrap().search_text, "kab");
    }

    #[test]
    fn test_root_search_is_debounced() {
        let mut c = chain();
        let first = c.refresh_at(0).unwrap();
        assert_eq!(fetches(&first).len(), 1);

        let events = c.set_search_text_at(0, "af").unwrap();
        assert!(matches!(events.as_slice(), [ChainEvent::Debounce(_)]));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut c = chain();
        let events = c.select_at(0, Some(item(1, "Afghanistan"))).unwrap();
        let provinces = first_fetch(&events);
        assert!(c.resolve(1, provinces.seq, Ok(vec![item(10, "Kabul"), item(11, "Herat")])));

        let req_a = first_fetch(&c.select_at(1, Some(item(10, "Kabul"))).unwrap());
        let req_b = first_fetch(&c.select_at(1, Some(item(11, "Herat"))).unwrap());
        assert!(req_b.seq > req_a.seq);

        assert!(c.resolve(2, req_b.seq, Ok(vec![item(110, "Herat City")])));
        assert!(!c.resolve(2, req_a.seq, Ok(vec![item(100, "Kabul City")])));

        let city = c.node(2).unwrap();
        assert_eq!(city.options, vec![item(110, "Herat City")]);
        assert!(!city.is_loading);
    }

    #[test]
    fn test_loading_tracks_outstanding_fetch() {
        let mut c = chain();
        let first = first_fetch(&c.select_at(0, Some(item(1, "Afghanistan"))).unwrap());
        assert!(c.node(1).unwrap().is_loading);

        // Superseded response leaves the level loading
        let second = first_fetch(&c.select_at(0, Some(item(2, "Pakistan"))).unwrap());
        assert!(!c.resolve(1, first.seq, Ok(vec![])));
        assert!(c.node(1).unwrap().is_loading);

        assert!(c.resolve(1, second.seq, Ok(vec![item(20, "Punjab")])));
        assert!(!c.node(1).unwrap().is_loading);
    }

    #[test]
    fn test_clearing_upstream_stops_loading_below() {
        let mut c = chain();
        let req = first_fetch(&c.select_at(0, Some(item(1, "Afghanistan"))).unwrap());
        let events = c.select_at(0, None).unwrap();

        assert!(fetches(&events).is_empty());
        let province = c.node(1).unwrap();
        assert!(!province.is_loading);
        assert!(province.options.is_empty());
        assert!(!c.resolve(1, req.seq, Ok(vec![item(10, "Kabul")])));
    }

    #[test]
    fn test_fetch_failure_keeps_upstream_selection() {
        let mut c = chain();
        let req = first_fetch(&c.select_at(0, Some(item(1, "Afghanistan"))).unwrap());
        assert!(c.resolve(1, req.seq, Err(FetchError::Status(500))));

        let province = c.node(1).unwrap();
        assert!(province.options.is_empty());
        assert_eq!(province.error.as_deref(), Some("Request failed: 500"));
        assert!(!province.is_loading);
        assert_eq!(c.path(), vec![item(1, "Afghanistan")]);

        // Re-focus retries
        let retry = first_fetch(&c.refresh_at(1).unwrap());
        assert_eq!(retry.parent_id, Some(1));
        assert!(c.node(1).unwrap().is_loading);
    }

    #[test]
    fn test_hydration_emits_single_path_change() {
        let mut c = chain();
        let path = vec![
            item(1, "Afghanistan"),
            item(10, "Kabul"),
            item(100, "Kabul City"),
            item(1000, "Central"),
        ];
        let events = c.initialize_from_path(path.clone()).unwrap();

        assert_eq!(events, vec![ChainEvent::PathChanged(path.clone())]);
        assert!(c.is_complete());
        for (node, expected) in c.nodes().iter().zip(&path) {
            assert_eq!(node.selected.as_ref(), Some(expected));
            assert_eq!(node.search_text, expected.label);
        }
    }

    #[test]
    fn test_partial_hydration_fetches_next_level() {
        let mut c = chain();
        let events = c
            .initialize_from_path(vec![item(1, "Afghanistan"), item(10, "Kabul")])
            .unwrap();

        let fetched = fetches(&events);
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].level, 2);
        assert_eq!(fetched[0].parent_id, Some(10));
        assert_eq!(paths(&events).len(), 1);

        let too_long = c.initialize_from_path(vec![item(1, "a"); 5]);
        assert_eq!(too_long, Err(ChainError::PathTooLong { given: 5, len: 4 }));
    }

    #[test]
    fn test_country_province_city_scenario() {
        let mut c = chain();

        let events = c.select_at(0, Some(item(1, "Afghanistan"))).unwrap();
        let req = fetches(&events)[0].clone();
        assert_eq!((req.level, req.parent_id), (1, Some(1)));
        assert_eq!(req.resource, ListResource::Provinces);

        assert!(c.resolve(1, req.seq, Ok(vec![item(10, "Kabul")])));
        assert_eq!(c.node(1).unwrap().options, vec![item(10, "Kabul")]);

        let events = c.select_at(1, Some(item(10, "Kabul"))).unwrap();
        let req = fetches(&events)[0].clone();
        assert_eq!((req.level, req.parent_id), (2, Some(10)));
        assert_eq!(req.resource, ListResource::Cities);
        assert_eq!(c.node(3).unwrap().selected, None);
    }

    #[test]
    fn test_reset_and_dispose() {
        let mut c = resolved_chain();
        c.reset();
        assert!(c.path().is_empty());
        assert!(c.nodes().iter().all(|n| n.options.is_empty() && !n.is_loading));

        first_fetch(&c.refresh_at(0).unwrap());
        let req = first_fetch(&c.select_at(0, Some(item(1, "Afghanistan"))).unwrap());
        let ticket = match c.set_search_text_at(0, "pak").unwrap().pop() {
            Some(ChainEvent::Debounce(t)) => t,
            other => panic!("expected debounce, got {:?}", other),
        };

        c.dispose();
        assert!(c.is_disposed());
        assert!(!c.resolve(1, req.seq, Ok(vec![item(10, "Kabul")])));
        assert!(c.debounce_elapsed(ticket).is_empty());
        assert!(c.node(1).unwrap().options.is_empty());
    }

    #[test]
    fn test_typing_after_hydration_is_debounced() {
        let mut c = resolved_chain();

        let mut events = Vec::new();
        for text in ["a", "ab", "abc"] {
            events.extend(c.set_search_text_at(1, text).unwrap());
        }
        assert!(fetches(&events).is_empty());

        let mut issued = Vec::new();
        for e in events {
            if let ChainEvent::Debounce(t) = e {
                issued.extend(c.debounce_elapsed(t));
            }
        }
        let fetched = fetches(&issued);
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].search_text, "abc");
        assert_eq!(fetched[0].parent_id, Some(1));
    }

    #[test]
    fn test_typing_at_root_after_reset_is_debounced() {
        let mut c = resolved_chain();
        c.reset();
        let events = c.set_search_text_at(0, "a").unwrap();
        assert!(matches!(events.as_slice(), [ChainEvent::Debounce(_)]));
    }

    #[test]
    fn test_search_cancelled_by_selection_runs_when_retyped() {
        let mut c = chain();
        let req = first_fetch(&c.select_at(0, Some(item(1, "Afghanistan"))).unwrap());
        assert!(c.resolve(1, req.seq, Ok(vec![item(10, "Kabul"), item(11, "Herat")])));

        let events = c.set_search_text_at(1, "ka").unwrap();
        assert!(matches!(events.as_slice(), [ChainEvent::Debounce(_)]));
        c.select_at(1, Some(item(10, "Kabul"))).unwrap();

        let ticket = match c.set_search_text_at(1, "ka").unwrap().as_slice() {
            [ChainEvent::Debounce(t)] => *t,
            other => panic!("expected debounce, got {:?}", other),
        };
        let retry = first_fetch(&c.debounce_elapsed(ticket));
        assert_eq!((retry.level, retry.search_text.as_str()), (1, "ka"));
    }
}
