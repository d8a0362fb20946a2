//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod option_item;

// Re-exports
pub use aggregate_id::AggregateId;
pub use option_item::{Identifier, OptionItem};
