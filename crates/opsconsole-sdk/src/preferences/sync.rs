//! Preference cache with optimistic writes and default fallback

use opsconsole_client::{
    BulkPreferencesRequest, BulkUpdateResponse, PreferenceEntry, PreferenceMap, PreferenceType,
    UpsertPreferenceRequest,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use super::defaults::default_preferences;
use super::export::PreferenceExport;
use crate::backend::PreferenceBackend;
use crate::error::{Result, SdkError};
use crate::notify::{Notice, Notifier, TracingNotifier};

/// Lifecycle of the local cache.
///
/// `NotLoaded -> Loading -> Ready`. `Ready` is terminal for the session:
/// later loads keep the cache readable and re-enter `Ready` without leaving
/// it. There is no error state; a failed load still ends in `Ready`, backed
/// by defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Ready,
}

/// Where the current cache contents came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheSource {
    #[default]
    Empty,
    Remote,
    Defaults,
}

/// Observable state of a [`PreferenceSync`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceState {
    pub load_state: LoadState,
    pub source: CacheSource,
    pub preferences: PreferenceMap,
}

/// Result of the remote half of an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The server accepted the write; local and remote agree.
    Confirmed,
    /// The server write failed. The local value stays in place until the
    /// next load or a successful retry.
    Failed(String),
}

impl UpdateOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, UpdateOutcome::Confirmed)
    }
}

/// A preference already committed locally, waiting for its remote write.
///
/// Dropping it without calling [`commit`](Self::commit) leaves the local
/// value in place and never contacts the server.
#[must_use = "the remote write only happens on commit()"]
pub struct PendingUpdate {
    backend: Arc<dyn PreferenceBackend>,
    notifier: Arc<dyn Notifier>,
    request: UpsertPreferenceRequest,
}

impl PendingUpdate {
    /// Key being written
    pub fn key(&self) -> &str {
        &self.request.preference_key
    }

    /// Issue the remote upsert. Failures are notified, never rolled back.
    pub async fn commit(self) -> UpdateOutcome {
        match self.backend.upsert(&self.request).await {
            Ok(()) => {
                debug!(key = %self.request.preference_key, "Preference persisted");
                UpdateOutcome::Confirmed
            }
            Err(e) => {
                error!(
                    key = %self.request.preference_key,
                    error = %e,
                    "Failed to persist preference; keeping local value"
                );
                self.notifier.notify(Notice::error(
                    "Preference not saved",
                    format!(
                        "Could not save \"{}\": {}",
                        self.request.preference_key, e
                    ),
                ));
                UpdateOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Per-user preference cache synchronized with the backend.
///
/// Clones share the same cache, so one instance per session can be handed
/// to every consumer.
///
/// # Example
///
/// ```rust,ignore
/// use opsconsole_sdk::PreferenceSync;
/// use opsconsole_client::PreferenceType;
///
/// let prefs = PreferenceSync::new(backend).with_module("dashboard");
/// prefs.load_all().await?;
///
/// // Visible immediately, persisted in the background
/// let pending = prefs.stage("compactMode", true.into(), PreferenceType::Boolean);
/// assert_eq!(prefs.get_bool("compactMode", false), true);
/// pending.commit().await;
/// ```
#[derive(Clone)]
pub struct PreferenceSync {
    backend: Arc<dyn PreferenceBackend>,
    notifier: Arc<dyn Notifier>,
    module_id: Option<String>,
    state: Arc<watch::Sender<PreferenceState>>,
}

impl PreferenceSync {
    /// Create a user-wide preference cache
    pub fn new(backend: Arc<dyn PreferenceBackend>) -> Self {
        let (tx, _) = watch::channel(PreferenceState::default());
        Self {
            backend,
            notifier: Arc::new(TracingNotifier),
            module_id: None,
            state: Arc::new(tx),
        }
    }

    /// Scope every operation to a module
    pub fn with_module(mut self, module_id: impl Into<String>) -> Self {
        self.module_id = Some(module_id.into());
        self
    }

    /// Route failure and success notices to `notifier`
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Module scope, if any
    pub fn module_id(&self) -> Option<&str> {
        self.module_id.as_deref()
    }

    // === Loading ===

    /// Replace the cache with the server's preferences.
    ///
    /// A transport failure fills the cache with [`default_preferences`] and
    /// still ends in [`LoadState::Ready`]. A precondition failure (no token)
    /// also unblocks the UI with defaults but is returned as an error.
    ///
    /// Only the first load is observable as [`LoadState::Loading`]; a reload
    /// serves the current cache until the response replaces it.
    pub async fn load_all(&self) -> Result<CacheSource> {
        self.state.send_if_modified(|state| {
            if state.load_state == LoadState::NotLoaded {
                state.load_state = LoadState::Loading;
                true
            } else {
                false
            }
        });

        match self.backend.load_all(self.module_id()).await {
            Ok(preferences) => {
                info!(
                    module_id = ?self.module_id,
                    count = preferences.len(),
                    "Preferences loaded"
                );
                self.finish_load(preferences, CacheSource::Remote);
                Ok(CacheSource::Remote)
            }
            Err(e) if e.is_precondition() => {
                error!(module_id = ?self.module_id, error = %e, "Cannot load preferences");
                self.finish_load(default_preferences(), CacheSource::Defaults);
                self.notifier
                    .notify(Notice::error("Preferences unavailable", e.to_string()));
                Err(e)
            }
            Err(e) => {
                warn!(
                    module_id = ?self.module_id,
                    error = %e,
                    "Preference load failed; using defaults"
                );
                self.finish_load(default_preferences(), CacheSource::Defaults);
                self.notifier.notify(Notice::warning(
                    "Preferences unavailable",
                    "Using default preferences until the server is reachable",
                ));
                Ok(CacheSource::Defaults)
            }
        }
    }

    fn finish_load(&self, preferences: PreferenceMap, source: CacheSource) {
        self.state.send_modify(|state| {
            state.preferences = preferences;
            state.source = source;
            state.load_state = LoadState::Ready;
        });
    }

    pub fn load_state(&self) -> LoadState {
        self.state.borrow().load_state
    }

    pub fn is_ready(&self) -> bool {
        self.load_state() == LoadState::Ready
    }

    /// Origin of the current cache contents
    pub fn source(&self) -> CacheSource {
        self.state.borrow().source
    }

    /// Receiver notified after every cache or load-state change
    pub fn subscribe(&self) -> watch::Receiver<PreferenceState> {
        self.state.subscribe()
    }

    // === Reads ===

    /// Cached value for `key`, or `default` when absent. Never fails.
    pub fn get(&self, key: &str, default: Value) -> Value {
        self.state
            .borrow()
            .preferences
            .get(key)
            .map(|entry| entry.value.clone())
            .unwrap_or(default)
    }

    /// Cached value decoded as `T`, or `default` when absent or mistyped
    pub fn get_as<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let state = self.state.borrow();
        match state.preferences.get(key) {
            Some(entry) => serde_json::from_value(entry.value.clone()).unwrap_or(default),
            None => default,
        }
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_as(key, default)
    }

    pub fn get_str(&self, key: &str, default: &str) -> String {
        self.get_as(key, default.to_string())
    }

    /// Cached entry including its declared type
    pub fn entry(&self, key: &str) -> Option<PreferenceEntry> {
        self.state.borrow().preferences.get(key).cloned()
    }

    /// Copy of the whole cache
    pub fn snapshot(&self) -> PreferenceMap {
        self.state.borrow().preferences.clone()
    }

    // === Writes ===

    /// Commit a value locally and return the pending remote write.
    ///
    /// Readers observe the new value as soon as this returns.
    pub fn stage(
        &self,
        key: impl Into<String>,
        value: Value,
        kind: PreferenceType,
    ) -> PendingUpdate {
        let key = key.into();
        self.state.send_modify(|state| {
            state
                .preferences
                .insert(key.clone(), PreferenceEntry::new(value.clone(), kind));
        });
        debug!(%key, "Preference staged locally");

        PendingUpdate {
            backend: Arc::clone(&self.backend),
            notifier: Arc::clone(&self.notifier),
            request: UpsertPreferenceRequest {
                preference_key: key,
                preference_value: value,
                preference_type: kind,
                module_id: self.module_id.clone(),
            },
        }
    }

    /// Optimistic update: local commit, then remote upsert.
    ///
    /// Concurrent updates of the same key are not serialized; the last
    /// response to arrive wins on the server.
    pub async fn update(
        &self,
        key: impl Into<String>,
        value: Value,
        kind: PreferenceType,
    ) -> UpdateOutcome {
        self.stage(key, value, kind).commit().await
    }

    /// Write many preferences in one request.
    ///
    /// The cache is only touched once the whole batch succeeds.
    pub async fn bulk_update(&self, preferences: PreferenceMap) -> Result<BulkUpdateResponse> {
        let request = BulkPreferencesRequest {
            preferences,
            module_id: self.module_id.clone(),
        };

        match self.backend.bulk_update(&request).await {
            Ok(counts) => {
                info!(
                    updated = counts.updated,
                    created = counts.created,
                    "Preferences bulk updated"
                );
                self.state.send_modify(|state| {
                    state.preferences.extend(request.preferences);
                });
                self.notifier.notify(Notice::success(
                    "Preferences saved",
                    format!("{} updated, {} created", counts.updated, counts.created),
                ));
                Ok(counts)
            }
            Err(e) => {
                error!(
                    count = request.preferences.len(),
                    error = %e,
                    "Bulk preference update failed"
                );
                self.notifier
                    .notify(Notice::error("Preferences not saved", e.to_string()));
                Err(e)
            }
        }
    }

    /// Soft-delete every preference in scope on the server.
    ///
    /// The cache is left as is; call [`load_all`](Self::load_all) afterwards
    /// to resynchronize.
    pub async fn reset(&self) -> Result<u64> {
        let outcome = match self.backend.reset(self.module_id()).await {
            Ok(response) if response.success => Ok(response.count),
            Ok(response) => Err(SdkError::Backend(if response.message.is_empty() {
                "reset rejected by server".to_string()
            } else {
                response.message
            })),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(count) => {
                info!(module_id = ?self.module_id, count, "Preferences reset");
                self.notifier.notify(Notice::success(
                    "Preferences reset",
                    format!("{} preferences restored to defaults", count),
                ));
                Ok(count)
            }
            Err(e) => {
                error!(module_id = ?self.module_id, error = %e, "Preference reset failed");
                self.notifier
                    .notify(Notice::error("Preferences not reset", e.to_string()));
                Err(e)
            }
        }
    }

    /// [`reset`](Self::reset) behind a confirmation gate.
    ///
    /// Returns `Ok(None)` without any network call when `confirm` declines.
    pub async fn reset_confirmed(&self, confirm: impl FnOnce() -> bool) -> Result<Option<u64>> {
        if !confirm() {
            debug!(module_id = ?self.module_id, "Preference reset declined");
            return Ok(None);
        }
        self.reset().await.map(Some)
    }

    // === Import / export ===

    /// Snapshot of the cache for writing to a file
    pub fn export(&self) -> PreferenceExport {
        PreferenceExport::new(self.module_id.clone(), self.snapshot())
    }

    /// Push an exported snapshot to the server with one bulk update.
    pub async fn import(&self, export: PreferenceExport) -> Result<BulkUpdateResponse> {
        if export.module_id != self.module_id {
            warn!(
                from = ?export.module_id,
                into = ?self.module_id,
                "Importing preferences across module scopes"
            );
        }
        self.bulk_update(export.preferences).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use serde_json::json;

    #[tokio::test]
    async fn test_initial_state() {
        let prefs = PreferenceSync::new(Arc::new(MockBackend::new()));
        assert_eq!(prefs.load_state(), LoadState::NotLoaded);
        assert_eq!(prefs.source(), CacheSource::Empty);
        assert_eq!(prefs.get("theme", json!("light")), json!("light"));
    }

    #[tokio::test]
    async fn test_get_as_falls_back_on_type_mismatch() {
        let prefs = PreferenceSync::new(Arc::new(MockBackend::new()));
        let _pending = prefs.stage("itemsPerPage", json!("lots"), PreferenceType::String);
        assert_eq!(prefs.get_as::<u32>("itemsPerPage", 25), 25);
        assert_eq!(prefs.get_str("itemsPerPage", "10"), "lots");
    }

    #[tokio::test]
    async fn test_loading_state_is_observable() {
        let backend = Arc::new(MockBackend::new());
        let prefs = PreferenceSync::new(backend);
        let mut rx = prefs.subscribe();

        prefs.load_all().await.unwrap();

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert_eq!(state.load_state, LoadState::Ready);
        assert_eq!(state.source, CacheSource::Remote);
    }

    #[test]
    fn test_commit_stays_pending_while_write_is_held() {
        let backend = Arc::new(MockBackend::new());
        backend.hold_writes();
        let prefs = PreferenceSync::new(backend.clone());

        let pending = prefs.stage("compactMode", json!(true), PreferenceType::Boolean);
        let mut commit = tokio_test::task::spawn(pending.commit());
        tokio_test::assert_pending!(commit.poll());
        assert!(prefs.get_bool("compactMode", false));

        backend.release_writes();
        assert!(commit.is_woken());
        let outcome = tokio_test::assert_ready!(commit.poll());
        assert_eq!(outcome, UpdateOutcome::Confirmed);
    }

    #[test]
    fn test_reload_stays_ready_while_in_flight() {
        let backend = Arc::new(MockBackend::new());
        let prefs = PreferenceSync::new(backend.clone());

        let mut first = tokio_test::task::spawn(prefs.load_all());
        tokio_test::assert_ready!(first.poll()).unwrap();
        drop(first);
        assert_eq!(prefs.load_state(), LoadState::Ready);

        backend.hold_reads();
        let mut reload = tokio_test::task::spawn(prefs.load_all());
        tokio_test::assert_pending!(reload.poll());
        assert_eq!(prefs.load_state(), LoadState::Ready);
        assert!(prefs.is_ready());

        backend.release_reads();
        let source = tokio_test::assert_ready!(reload.poll()).unwrap();
        assert_eq!(source, CacheSource::Remote);
        assert_eq!(prefs.load_state(), LoadState::Ready);
    }

    #[test]
    fn test_first_load_is_observable_as_loading() {
        let backend = Arc::new(MockBackend::new());
        backend.hold_reads();
        let prefs = PreferenceSync::new(backend.clone());

        let mut load = tokio_test::task::spawn(prefs.load_all());
        tokio_test::assert_pending!(load.poll());
        assert_eq!(prefs.load_state(), LoadState::Loading);

        backend.release_reads();
        tokio_test::assert_ready!(load.poll()).unwrap();
        assert_eq!(prefs.load_state(), LoadState::Ready);
    }
}
