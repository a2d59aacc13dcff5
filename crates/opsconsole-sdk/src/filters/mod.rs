//! Shared facet filters
//!
//! Clicking a badge anywhere on a page adds a filter that the shared toolbar
//! renders. The list is owned by one [`FilterStore`] per page session;
//! consumers read it and dispatch mutations through the store only.

mod store;

pub use store::{try_use_filters, use_filters, Filter, FilterStore};
