//! Opsconsole SDK - client-side state for the operations console
//!
//! Three independent pieces of state, each owned by one instance per page
//! session:
//!
//! - **FilterStore**: shared, de-duplicated facet filters read by every
//!   component of a page
//! - **PreferenceSync**: per-user preferences with optimistic local writes
//!   and a baked-in default table when the server is unreachable
//! - **SettingsReconciler**: the admin settings table with buffered edits,
//!   dirty-key tracking, masking of credentials and one bulk save
//!
//! Remote calls go through the [`PreferenceBackend`] and [`SettingsBackend`]
//! traits, implemented for [`opsconsole_client::ConsoleClient`] and for the
//! in-memory [`MockBackend`]. Failures are reported to a [`Notifier`].
//!
//! # Example
//!
//! ```rust,ignore
//! use opsconsole_sdk::{PreferenceSync, SettingsReconciler};
//! use std::sync::Arc;
//!
//! let client = Arc::new(ConsoleClient::new(config, token_store)?);
//!
//! let prefs = PreferenceSync::new(client.clone()).with_module("dashboard");
//! prefs.load_all().await?;
//! let theme = prefs.get_str("theme", "system");
//!
//! let mut settings = SettingsReconciler::new(client);
//! settings.load_settings().await?;
//! settings.commit_edit("email_port", 2525.into())?;
//! settings.save_all().await?;
//! ```

// Remote persistence seams
pub mod backend;

// Error types
pub mod error;

// Shared facet filters
pub mod filters;

// Operator notices
pub mod notify;

// Per-user preferences
pub mod preferences;

// Admin settings table
pub mod settings;

pub use backend::{MockBackend, MockCall, PreferenceBackend, SettingsBackend};
pub use error::{Result, SdkError};
pub use filters::{try_use_filters, use_filters, Filter, FilterStore};
pub use notify::{CollectingNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use preferences::{
    default_preferences, CacheSource, LoadState, PendingUpdate, PreferenceExport,
    PreferenceState, PreferenceSync, UpdateOutcome, EXPORT_VERSION,
};
pub use settings::{
    is_sensitive_key, project, unmanaged_keys, FieldView, SettingField, SettingKind,
    SettingsFilter, SettingsReconciler, MASK, SETTINGS_CATALOG,
};

// Re-export the wire types consumers need alongside the SDK
pub use opsconsole_client::{PreferenceEntry, PreferenceMap, PreferenceType, SettingsObject};
