//! Portable preference snapshots

use chrono::{DateTime, Utc};
use opsconsole_client::PreferenceMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SdkError};

/// Current export format version
pub const EXPORT_VERSION: u32 = 1;

/// A user's preferences as written to an export file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceExport {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
    pub preferences: PreferenceMap,
}

impl PreferenceExport {
    pub fn new(module_id: Option<String>, preferences: PreferenceMap) -> Self {
        Self {
            version: EXPORT_VERSION,
            exported_at: Utc::now(),
            module_id,
            preferences,
        }
    }

    /// Pretty-printed JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and version-check an export document
    pub fn from_json(input: &str) -> Result<Self> {
        let export: Self = serde_json::from_str(input)?;
        if export.version != EXPORT_VERSION {
            return Err(SdkError::UnsupportedExport(export.version));
        }
        Ok(export)
    }
}
