//! Server configuration table

mod catalog;
mod field;
mod projection;
mod query;
mod reconciler;
mod sensitivity;

pub use catalog::{find_entry, lookup, CatalogEntry, SETTINGS_CATALOG};
pub use field::{FieldView, SettingField, SettingKind};
pub use projection::{project, project_with, unmanaged_keys};
pub use query::SettingsFilter;
pub use reconciler::{EditSession, SettingsReconciler};
pub use sensitivity::{is_sensitive_key, MASK};
