//! HTTP implementation of the backend traits over [`ConsoleClient`].

use async_trait::async_trait;
use opsconsole_client::{
    BulkPreferencesRequest, BulkUpdateResponse, ConsoleClient, PreferenceMap, ResetResponse,
    SettingsObject, SettingsPatchResponse, UpsertPreferenceRequest,
};

use super::traits::{PreferenceBackend, SettingsBackend};
use crate::error::Result;

#[async_trait]
impl PreferenceBackend for ConsoleClient {
    async fn load_all(&self, module_id: Option<&str>) -> Result<PreferenceMap> {
        Ok(self.get_all_preferences(module_id).await?)
    }

    async fn upsert(&self, request: &UpsertPreferenceRequest) -> Result<()> {
        self.upsert_preference(request).await?;
        Ok(())
    }

    async fn bulk_update(&self, request: &BulkPreferencesRequest) -> Result<BulkUpdateResponse> {
        Ok(self.bulk_update_preferences(request).await?)
    }

    async fn reset(&self, module_id: Option<&str>) -> Result<ResetResponse> {
        Ok(self.reset_preferences(module_id).await?)
    }
}

#[async_trait]
impl SettingsBackend for ConsoleClient {
    async fn fetch_settings(&self) -> Result<SettingsObject> {
        Ok(self.get_settings().await?)
    }

    async fn apply_changes(&self, changes: &SettingsObject) -> Result<SettingsPatchResponse> {
        Ok(self.patch_settings(changes).await?)
    }
}
