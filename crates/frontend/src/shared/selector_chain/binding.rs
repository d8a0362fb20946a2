use contracts::domain::common::OptionItem;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use super::chain::{ChainEvent, SelectorChain};
use super::controller::{ChainController, LevelView};
use super::error::ChainError;
use super::fetcher::OptionFetcher;
use super::level::LevelSpec;
use super::source::{DebounceTicket, FetchRequest};
use crate::shared::config::AppConfig;

/// Reactive owner of one `ChainController`.
///
/// Executes the controller's events: fetches run on `spawn_local`, debounce
/// tickets sleep on a timer, path changes go to the host callback. Once the
/// owning component is cleaned up the chain is disposed and every pending
/// resolution becomes a no-op.
#[derive(Clone, Copy)]
pub struct ChainHandle {
    state: RwSignal<ChainController>,
    fetcher: StoredValue<Rc<dyn OptionFetcher>, LocalStorage>,
    on_path: StoredValue<Option<Callback<Vec<OptionItem>>>>,
    page_size: usize,
}

impl ChainHandle {
    pub fn new(
        levels: Vec<LevelSpec>,
        fetcher: Rc<dyn OptionFetcher>,
        config: &AppConfig,
        on_path: Option<Callback<Vec<OptionItem>>>,
    ) -> Result<Self, ChainError> {
        let chain = SelectorChain::new(levels, config.debounce_ms).map_err(|e| {
            log::error!("invalid selector chain: {}", e);
            e
        })?;
        let state = RwSignal::new(ChainController::new(chain));

        on_cleanup(move || {
            state.try_update_untracked(|c| c.dispose());
        });

        Ok(Self {
            state,
            fetcher: StoredValue::new_local(fetcher),
            on_path: StoredValue::new(on_path),
            page_size: config.page_size,
        })
    }

    pub fn len(&self) -> usize {
        self.state.with_untracked(|c| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tracked view of `level`
    pub fn view(&self, level: usize) -> Option<LevelView> {
        self.state.with(|c| c.view(level))
    }

    pub fn path(&self) -> Vec<OptionItem> {
        self.state.with(|c| c.path())
    }

    pub fn text_change(&self, level: usize, text: String) {
        let events = self.state.try_update(|c| c.on_text_change(level, &text));
        self.dispatch(events.unwrap_or_default());
    }

    pub fn focus(&self, level: usize) {
        let events = self.state.try_update(|c| c.on_focus(level));
        self.dispatch(events.unwrap_or_default());
    }

    pub fn select(&self, level: usize, item: OptionItem) {
        let events = self.state.try_update(|c| c.on_select(level, item));
        self.dispatch(events.unwrap_or_default());
    }

    pub fn clear(&self, level: usize) {
        let events = self.state.try_update(|c| c.on_clear(level));
        self.dispatch(events.unwrap_or_default());
    }

    pub fn outside_click(&self, level: usize) {
        // Only notify subscribers when something actually closed
        let open = self
            .state
            .with_untracked(|c| c.view(level).map(|v| v.is_open).unwrap_or(false));
        if open {
            self.state.update(|c| {
                c.on_outside_click(level);
            });
        }
    }

    /// Edit-mode hydration from an existing record's path
    pub fn hydrate(&self, items: Vec<OptionItem>) {
        let result = self.state.try_update(|c| c.hydrate(items));
        match result {
            Some(Ok(events)) => self.dispatch(events),
            Some(Err(e)) => log::error!("cannot hydrate selector chain: {}", e),
            None => {}
        }
    }

    pub fn reset(&self) {
        self.state.try_update(|c| c.reset());
    }

    fn dispatch(self, events: Vec<ChainEvent>) {
        for event in events {
            match event {
                ChainEvent::Fetch(request) => self.spawn_fetch(request),
                ChainEvent::Debounce(ticket) => self.spawn_debounce(ticket),
                ChainEvent::PathChanged(path) => {
                    if let Some(Some(callback)) = self.on_path.try_get_value() {
                        callback.run(path);
                    }
                }
            }
        }
    }

    fn spawn_fetch(self, request: FetchRequest) {
        let Some(fetcher) = self.fetcher.try_get_value() else {
            return;
        };
        let query = request.query(self.page_size);
        spawn_local(async move {
            let result = fetcher
                .fetch(request.resource, query)
                .await
                .map(|page| page.items);
            // Unmounted chains drop the response
            let _ = self
                .state
                .try_update(|c| c.resolve(request.level, request.seq, result));
        });
    }

    fn spawn_debounce(self, ticket: DebounceTicket) {
        spawn_local(async move {
            TimeoutFuture::new(ticket.delay_ms).await;
            if let Some(events) = self.state.try_update(|c| c.debounce_elapsed(ticket)) {
                self.dispatch(events);
            }
        });
    }
}
