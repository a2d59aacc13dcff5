//! Which settings must never be shown in cleartext

/// Placeholder rendered instead of a sensitive value
pub const MASK: &str = "\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}\u{2022}";

/// Substrings that mark a key as sensitive (case-insensitive)
pub const SENSITIVE_SUBSTRINGS: &[&str] = &[
    "password",
    "token",
    "secret",
    "key",
    "api_key",
    "auth_token",
];

/// Keys holding credentials without a telltale substring
pub const SENSITIVE_KEYS: &[&str] = &[
    "database_url",
    "celery_broker_url",
    "celery_result_backend",
    "sentry_dsn",
    "slack_webhook_url",
];

/// Whether a setting key holds a credential
pub fn is_sensitive_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_KEYS.contains(&key.as_str())
        || SENSITIVE_SUBSTRINGS.iter().any(|s| key.contains(s))
}
