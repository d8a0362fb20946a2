//! Dependent selector chain
//!
//! Cascading dropdowns where each level is filtered by the selection above it
//! (country → province → city → station, trip → seat).
//!
//! - `SelectorChain` holds the pure state machine and its invariants.
//! - `ChainController` adds dropdown visibility and a render-ready view.
//! - `ChainHandle` and `ChainSelect` bind the controller to Leptos.
//!
//! ```ignore
//! let handle = ChainHandle::new(
//!     location_levels(4),
//!     fetcher,
//!     &config,
//!     Some(Callback::new(move |path| set_filter.set(path))),
//! )?;
//! view! { <ChainSelect handle=handle /> }
//! ```

pub mod binding;
pub mod chain;
pub mod component;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod level;
pub mod node;
pub mod presets;
pub mod source;

pub use binding::ChainHandle;
pub use chain::{ChainEvent, SelectorChain};
pub use component::ChainSelect;
pub use controller::{ChainController, LevelView};
pub use error::{ChainError, FetchError};
pub use fetcher::{ApiOptionFetcher, OptionFetcher};
pub use level::LevelSpec;
pub use node::SelectionNode;
pub use source::{DebounceTicket, FetchRequest, DEFAULT_DEBOUNCE_MS};
