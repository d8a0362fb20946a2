//! Per-level fetch bookkeeping: debounce tickets and request sequence numbers.
//!
//! Nothing here performs I/O. The source decides *whether* and *when* a fetch
//! should be issued and later tells whether a response is still current.

use contracts::domain::common::Identifier;
use contracts::shared::list_resource::{ListQuery, ListResource};

use super::level::LevelSpec;

/// Default quiescence window for search-driven refetches
pub const DEFAULT_DEBOUNCE_MS: u32 = 500;

/// A fetch the host must perform and report back through `SelectorChain::resolve`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub level: usize,
    pub seq: u64,
    pub resource: ListResource,
    pub parent_id: Option<Identifier>,
    pub search_text: String,
}

impl FetchRequest {
    pub fn query(&self, page_size: usize) -> ListQuery {
        ListQuery::new(self.parent_id, &self.search_text, page_size)
    }
}

/// A delayed fetch; the host sleeps `delay_ms` and hands the ticket back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket {
    pub level: usize,
    pub ticket: u64,
    pub delay_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceAction {
    /// Parent is required but missing: options are empty, no network call.
    Empty,
    Fetch(FetchRequest),
    Debounce(DebounceTicket),
    /// Same parent and same text as the last request.
    Unchanged,
}

#[derive(Debug, Clone)]
struct PendingSearch {
    ticket: u64,
    parent_id: Option<Identifier>,
    search_text: String,
}

#[derive(Debug, Clone)]
pub struct RemoteOptionSource {
    level: usize,
    resource: ListResource,
    requires_parent: bool,
    debounce_ms: u32,
    /// Sequence number of the latest issued request
    seq: u64,
    in_flight: bool,
    next_ticket: u64,
    pending: Option<PendingSearch>,
    /// Parent and text of the latest issued request
    issued: Option<(Option<Identifier>, String)>,
}

impl RemoteOptionSource {
    pub fn new(level: usize, spec: &LevelSpec, debounce_ms: u32) -> Self {
        Self {
            level,
            resource: spec.resource,
            requires_parent: spec.requires_parent(),
            debounce_ms,
            seq: 0,
            in_flight: false,
            next_ticket: 0,
            pending: None,
            issued: None,
        }
    }

    /// Search-driven request: immediate when the parent changed since the
    /// last issued request, debounced otherwise.
    pub fn request(&mut self, parent_id: Option<Identifier>, search_text: &str) -> SourceAction {
        if self.requires_parent && parent_id.is_none() {
            self.invalidate();
            return SourceAction::Empty;
        }

        if let Some(pending) = &self.pending {
            if pending.parent_id == parent_id && pending.search_text == search_text {
                return SourceAction::Unchanged;
            }
        }

        match &self.issued {
            Some((last_parent, _)) if *last_parent != parent_id => {
                self.request_now(parent_id, search_text)
            }
            // Typed back to what is already loaded or loading
            Some((_, last_text)) if last_text == search_text => {
                self.pending = None;
                SourceAction::Unchanged
            }
            _ => {
                self.next_ticket += 1;
                self.pending = Some(PendingSearch {
                    ticket: self.next_ticket,
                    parent_id,
                    search_text: search_text.to_string(),
                });
                SourceAction::Debounce(DebounceTicket {
                    level: self.level,
                    ticket: self.next_ticket,
                    delay_ms: self.debounce_ms,
                })
            }
        }
    }

    /// Structural request: bypasses the debounce and supersedes anything
    /// pending or in flight.
    pub fn request_now(
        &mut self,
        parent_id: Option<Identifier>,
        search_text: &str,
    ) -> SourceAction {
        if self.requires_parent && parent_id.is_none() {
            self.invalidate();
            return SourceAction::Empty;
        }
        self.pending = None;
        SourceAction::Fetch(self.issue(parent_id, search_text.to_string()))
    }

    /// Debounce window for `ticket` has passed. Returns the fetch to issue if
    /// the ticket was not superseded or cancelled in the meantime.
    pub fn elapse(&mut self, ticket: u64) -> Option<FetchRequest> {
        match self.pending.take() {
            Some(pending) if pending.ticket == ticket => {
                Some(self.issue(pending.parent_id, pending.search_text))
            }
            other => {
                self.pending = other;
                None
            }
        }
    }

    /// True if `seq` is the latest issued request and still outstanding.
    /// Consumes the in-flight slot on success.
    pub fn accept(&mut self, seq: u64) -> bool {
        if self.in_flight && seq == self.seq {
            self.in_flight = false;
            true
        } else {
            false
        }
    }

    /// Drops the pending search. Later requests compare against the last
    /// issued one.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Drops pending and in-flight work; later responses are discarded.
    pub fn invalidate(&mut self) {
        self.seq += 1;
        self.in_flight = false;
        self.pending = None;
        self.issued = None;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn issue(&mut self, parent_id: Option<Identifier>, search_text: String) -> FetchRequest {
        self.seq += 1;
        self.in_flight = true;
        self.issued = Some((parent_id, search_text.clone()));
        FetchRequest {
            level: self.level,
            seq: self.seq,
            resource: self.resource,
            parent_id,
            search_text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provinces() -> RemoteOptionSource {
        let spec = LevelSpec::child("province", "Province", ListResource::Provinces, "country");
        RemoteOptionSource::new(1, &spec, DEFAULT_DEBOUNCE_MS)
    }

    fn fetched(action: SourceAction) -> FetchRequest {
        match action {
            SourceAction::Fetch(req) => req,
            other => panic!("expected fetch, got {:?}", other),
        }
    }

    fn debounced(action: SourceAction) -> DebounceTicket {
        match action {
            SourceAction::Debounce(t) => t,
            other => panic!("expected debounce, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_parent_skips_network() {
        let mut source = provinces();
        assert_eq!(source.request(None, "ka"), SourceAction::Empty);
        assert_eq!(source.request_now(None, ""), SourceAction::Empty);
        assert!(!source.is_in_flight());
    }

    #[test]
    fn test_parent_change_bypasses_debounce() {
        let mut source = provinces();
        let first = fetched(source.request_now(Some(1), ""));
        assert_eq!(first.seq, 1);

        // Text change under the same parent waits for the window
        let ticket = debounced(source.request(Some(1), "ka"));
        assert_eq!(ticket.delay_ms, 500);

        // New parent fires immediately and drops the pending search
        let second = fetched(source.request(Some(2), "ka"));
        assert_eq!(second.parent_id, Some(2));
        assert_eq!(source.elapse(ticket.ticket), None);
    }

    #[test]
    fn test_same_text_is_unchanged() {
        let mut source = provinces();
        fetched(source.request_now(Some(1), ""));
        assert_eq!(source.request(Some(1), ""), SourceAction::Unchanged);
    }

    #[test]
    fn test_only_latest_seq_is_accepted() {
        let mut source = provinces();
        let a = fetched(source.request_now(Some(1), ""));
        let b = fetched(source.request_now(Some(2), ""));

        assert!(source.accept(b.seq));
        assert!(!source.accept(a.seq));
        // Second delivery of the same response is ignored too
        assert!(!source.accept(b.seq));
    }

    #[test]
    fn test_invalidate_discards_in_flight() {
        let mut source = provinces();
        let a = fetched(source.request_now(Some(1), ""));
        source.invalidate();
        assert!(!source.accept(a.seq));
    }

    #[test]
    fn test_root_level_fetches_without_parent() {
        let spec = LevelSpec::root("trip", "Trip", ListResource::Trips);
        let mut source = RemoteOptionSource::new(0, &spec, 300);
        let req = fetched(source.request_now(None, ""));
        assert_eq!(req.parent_id, None);
        assert_eq!(req.resource, ListResource::Trips);
        assert_eq!(req.query(20).page_size, 20);

        // No parent to change, so searches always wait
        assert_eq!(debounced(source.request(None, "kab")).delay_ms, 300);
    }

    #[test]
    fn test_text_change_after_invalidate_is_debounced() {
        let mut source = provinces();
        fetched(source.request_now(Some(1), ""));
        source.invalidate();

        let ticket = debounced(source.request(Some(1), "a"));
        let req = source.elapse(ticket.ticket).unwrap();
        assert_eq!(req.search_text, "a");
    }

    #[test]
    fn test_cancelled_search_can_be_requested_again() {
        let mut source = provinces();
        let first = fetched(source.request_now(Some(1), ""));
        assert!(source.accept(first.seq));

        let cancelled = debounced(source.request(Some(1), "ka"));
        source.cancel_pending();
        assert_eq!(source.elapse(cancelled.ticket), None);

        let retry = debounced(source.request(Some(1), "ka"));
        let req = source.elapse(retry.ticket).unwrap();
        assert_eq!(req.search_text, "ka");
    }

    #[test]
    fn test_typing_back_to_issued_text_drops_pending() {
        let mut source = provinces();
        fetched(source.request_now(Some(1), ""));
        let ticket = debounced(source.request(Some(1), "k"));

        assert_eq!(source.request(Some(1), ""), SourceAction::Unchanged);
        assert!(!source.has_pending());
        assert_eq!(source.elapse(ticket.ticket), None);
    }
}
