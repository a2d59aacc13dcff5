//! HTTP client for the console preference and settings API

use crate::auth::TokenSource;
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::types::*;
use reqwest::{header, Client, RequestBuilder, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// HTTP client for the console REST API
///
/// # Example
///
/// ```rust,no_run
/// use opsconsole_client::{ClientConfig, ConsoleClient, FileTokenStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::default();
/// let tokens = FileTokenStore::new(config.token_path());
/// let client = ConsoleClient::new(config, tokens)?;
///
/// let reset = client.reset_preferences(Some("dashboard")).await?;
/// println!("removed {} preferences", reset.count);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ConsoleClient {
    config: ClientConfig,
    client: Client,
    tokens: Arc<dyn TokenSource>,
}

impl ConsoleClient {
    /// Create a new console client
    pub fn new(config: ClientConfig, tokens: impl TokenSource + 'static) -> Result<Self> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder.build()?;

        Ok(Self {
            config,
            client,
            tokens: Arc::new(tokens),
        })
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ==================== Preferences API ====================

    /// Get every preference for the current user, optionally scoped to a module
    pub async fn get_all_preferences(&self, module_id: Option<&str>) -> Result<PreferenceMap> {
        let url = with_module_query(
            format!("{}/user-preferences/all", self.config.api_root()),
            module_id,
        );

        debug!(%url, "Fetching preferences");
        let response = self.authorized(self.client.get(&url))?.send().await?;
        self.handle_response(response).await
    }

    /// Create or replace a single preference
    pub async fn upsert_preference(
        &self,
        request: &UpsertPreferenceRequest,
    ) -> Result<serde_json::Value> {
        let url = format!("{}/user-preferences/", self.config.api_root());

        debug!(key = %request.preference_key, "Upserting preference");
        let response = self
            .authorized(self.client.post(&url))?
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let response = self.check_status(response).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Replace many preferences in one round trip
    pub async fn bulk_update_preferences(
        &self,
        request: &BulkPreferencesRequest,
    ) -> Result<BulkUpdateResponse> {
        let url = format!("{}/user-preferences/bulk", self.config.api_root());

        debug!(count = request.preferences.len(), "Bulk updating preferences");
        let response = self
            .authorized(self.client.post(&url))?
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Soft-delete every preference in scope
    pub async fn reset_preferences(&self, module_id: Option<&str>) -> Result<ResetResponse> {
        let url = with_module_query(
            format!("{}/user-preferences/reset", self.config.api_root()),
            module_id,
        );

        debug!(%url, "Resetting preferences");
        let response = self.authorized(self.client.post(&url))?.send().await?;
        self.handle_response(response).await
    }

    // ==================== Settings API ====================

    /// Get the raw admin settings object
    pub async fn get_settings(&self) -> Result<SettingsObject> {
        let url = format!("{}/settings", self.config.api_root());

        let response = self.authorized(self.client.get(&url))?.send().await?;
        self.handle_response(response).await
    }

    /// Apply a partial settings update containing only changed keys
    pub async fn patch_settings(&self, changes: &SettingsObject) -> Result<SettingsPatchResponse> {
        let url = format!("{}/settings", self.config.api_root());

        debug!(count = changes.len(), "Patching settings");
        let response = self
            .authorized(self.client.patch(&url))?
            .header(header::CONTENT_TYPE, "application/json")
            .json(changes)
            .send()
            .await?;

        // A 2xx without a body means the patch was applied
        let response = self.check_status(response).await?;
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(SettingsPatchResponse::Ack {
                success: true,
                message: None,
            });
        }
        serde_json::from_str(&body).map_err(|e| {
            ClientError::InvalidResponse(format!("{} (body: {})", e, truncate(&body, 200)))
        })
    }

    // ==================== Helper Methods ====================

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match self.tokens.token() {
            Some(token) => Ok(request.header(header::AUTHORIZATION, format!("Bearer {}", token))),
            None => {
                error!("Refusing to send request without an authentication token");
                Err(ClientError::MissingToken)
            }
        }
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            body
        };
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let response = self.check_status(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Err(ClientError::InvalidResponse(
                "Expected a JSON body, got 204 No Content".to_string(),
            ));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            ClientError::InvalidResponse(format!("{} (body: {})", e, truncate(&body, 200)))
        })
    }
}

fn with_module_query(mut url: String, module_id: Option<&str>) -> String {
    if let Some(module_id) = module_id {
        url.push_str("?module_id=");
        url.push_str(&urlencoding::encode(module_id));
    }
    url
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_query_is_encoded() {
        assert_eq!(
            with_module_query("http://x/user-preferences/all".into(), Some("moc requests")),
            "http://x/user-preferences/all?module_id=moc%20requests"
        );
        assert_eq!(
            with_module_query("http://x/user-preferences/all".into(), None),
            "http://x/user-preferences/all"
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
    }
}
