//! Core traits for console backends.

use async_trait::async_trait;
use opsconsole_client::{
    BulkPreferencesRequest, BulkUpdateResponse, PreferenceMap, ResetResponse,
    SettingsObject, SettingsPatchResponse, UpsertPreferenceRequest,
};

use crate::error::Result;

/// Per-user preference storage.
#[async_trait]
pub trait PreferenceBackend: Send + Sync {
    /// Every preference in scope (`None` = user-wide).
    async fn load_all(&self, module_id: Option<&str>) -> Result<PreferenceMap>;

    /// Create or replace one preference.
    async fn upsert(&self, request: &UpsertPreferenceRequest) -> Result<()>;

    /// Replace many preferences in a single round trip.
    async fn bulk_update(&self, request: &BulkPreferencesRequest) -> Result<BulkUpdateResponse>;

    /// Soft-delete every preference in scope.
    async fn reset(&self, module_id: Option<&str>) -> Result<ResetResponse>;
}

/// Admin configuration storage.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// The flat settings object, keyed by setting name.
    async fn fetch_settings(&self) -> Result<SettingsObject>;

    /// Apply a partial object containing only changed keys.
    async fn apply_changes(&self, changes: &SettingsObject) -> Result<SettingsPatchResponse>;
}
