//! Per-user preferences with optimistic local updates
//!
//! The local cache answers reads synchronously and is updated before any
//! remote write resolves. A failed write is reported but not rolled back;
//! the next [`PreferenceSync::load_all`] resynchronizes with the server.

mod defaults;
mod export;
mod sync;

pub use defaults::default_preferences;
pub use export::{PreferenceExport, EXPORT_VERSION};
pub use sync::{
    CacheSource, LoadState, PendingUpdate, PreferenceState, PreferenceSync, UpdateOutcome,
};
