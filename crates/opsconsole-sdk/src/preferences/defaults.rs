//! Baked-in preferences used when the backend cannot be reached

use opsconsole_client::{PreferenceEntry, PreferenceMap, PreferenceType};
use serde_json::json;

/// The fallback preference table
pub fn default_preferences() -> PreferenceMap {
    [
        ("theme", json!("system"), PreferenceType::String),
        ("colorScheme", json!("zinc"), PreferenceType::String),
        ("sidebarCollapsed", json!(false), PreferenceType::Boolean),
        ("compactMode", json!(false), PreferenceType::Boolean),
        ("defaultView", json!("grid"), PreferenceType::String),
        ("itemsPerPage", json!(25), PreferenceType::Number),
        ("language", json!("fr"), PreferenceType::String),
        ("timezone", json!("Africa/Douala"), PreferenceType::String),
        ("emailNotifications", json!(true), PreferenceType::Boolean),
        ("pushNotifications", json!(true), PreferenceType::Boolean),
    ]
    .into_iter()
    .map(|(key, value, kind)| (key.to_string(), PreferenceEntry::new(value, kind)))
    .collect()
}
