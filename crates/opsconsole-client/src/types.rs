//! Wire types for the console REST API

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Declared type of a stored preference value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum PreferenceType {
    #[default]
    String,
    Number,
    Boolean,
    Json,
}

impl PreferenceType {
    /// Pick the declared type that matches a JSON value
    pub fn infer(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(_) => Self::Boolean,
            serde_json::Value::Number(_) => Self::Number,
            serde_json::Value::String(_) => Self::String,
            _ => Self::Json,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Json => "json",
        }
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" | "bool" => Some(Self::Boolean),
            "json" | "object" => Some(Self::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for PreferenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single preference as returned by `GET /user-preferences/all`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct PreferenceEntry {
    pub value: serde_json::Value,
    #[serde(rename = "type", default)]
    pub kind: PreferenceType,
}

impl PreferenceEntry {
    pub fn new(value: serde_json::Value, kind: PreferenceType) -> Self {
        Self { value, kind }
    }
}

/// Preferences keyed by preference key
pub type PreferenceMap = BTreeMap<String, PreferenceEntry>;

/// Body of `POST /user-preferences/` (single upsert)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct UpsertPreferenceRequest {
    pub preference_key: String,
    pub preference_value: serde_json::Value,
    pub preference_type: PreferenceType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
}

/// Body of `POST /user-preferences/bulk`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct BulkPreferencesRequest {
    pub preferences: PreferenceMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
}

/// Response from `POST /user-preferences/bulk`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct BulkUpdateResponse {
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub total: u64,
}

/// Response from `POST /user-preferences/reset`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
pub struct ResetResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub count: u64,
}

/// Flat settings object keyed by setting name
pub type SettingsObject = serde_json::Map<String, serde_json::Value>;

/// Response from `PATCH /settings`
///
/// Deployments answer either with a bare acknowledgement or with the full
/// updated settings object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingsPatchResponse {
    Ack {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Settings(SettingsObject),
}

impl SettingsPatchResponse {
    /// Whether the backend reported the patch as applied
    pub fn is_success(&self) -> bool {
        match self {
            Self::Ack { success, .. } => *success,
            Self::Settings(_) => true,
        }
    }
}
