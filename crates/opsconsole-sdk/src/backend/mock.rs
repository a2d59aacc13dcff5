//! In-memory backend for testing.

use async_trait::async_trait;
use opsconsole_client::{
    BulkPreferencesRequest, BulkUpdateResponse, PreferenceEntry, PreferenceMap, ResetResponse,
    SettingsObject, SettingsPatchResponse, UpsertPreferenceRequest,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Semaphore;

use super::traits::{PreferenceBackend, SettingsBackend};
use crate::error::{Result, SdkError};

/// A call observed by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    LoadAll { module_id: Option<String> },
    Upsert(UpsertPreferenceRequest),
    BulkUpdate(BulkPreferencesRequest),
    Reset { module_id: Option<String> },
    FetchSettings,
    ApplyChanges(SettingsObject),
}

#[derive(Default)]
struct MockState {
    preferences: HashMap<Option<String>, PreferenceMap>,
    settings: SettingsObject,
    calls: Vec<MockCall>,
}

/// Mock backend for testing.
///
/// Stores preferences per module scope and a flat settings object. Reads and
/// writes can be made to fail independently, and preference upserts
/// and loads can be held open to observe the optimistic and reload windows.
pub struct MockBackend {
    state: Mutex<MockState>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    precondition_failure: AtomicBool,
    write_gate: Gate,
    read_gate: Gate,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create an empty mock backend.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            precondition_failure: AtomicBool::new(false),
            write_gate: Mutex::new(None),
            read_gate: Mutex::new(None),
        }
    }

    /// Seed a preference in the given scope.
    pub fn with_preference(
        self,
        module_id: Option<&str>,
        key: impl Into<String>,
        entry: PreferenceEntry,
    ) -> Self {
        self.lock()
            .preferences
            .entry(module_id.map(String::from))
            .or_default()
            .insert(key.into(), entry);
        self
    }

    /// Seed the raw settings object.
    pub fn with_settings(self, settings: SettingsObject) -> Self {
        self.lock().settings = settings;
        self
    }

    /// Make every read fail with a transport error.
    pub fn with_failing_reads(self, fail: bool) -> Self {
        self.set_failing_reads(fail);
        self
    }

    /// Make every write fail with a transport error.
    pub fn with_failing_writes(self, fail: bool) -> Self {
        self.set_failing_writes(fail);
        self
    }

    /// Make every call fail as if no auth token were available.
    pub fn with_missing_token(self) -> Self {
        self.precondition_failure.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_failing_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_failing_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Hold preference upserts until [`release_writes`](Self::release_writes).
    pub fn hold_writes(&self) {
        hold(&self.write_gate);
    }

    /// Let held and future upserts through.
    pub fn release_writes(&self) {
        release(&self.write_gate);
    }

    /// Hold preference loads until [`release_reads`](Self::release_reads).
    pub fn hold_reads(&self) {
        hold(&self.read_gate);
    }

    /// Let held and future preference loads through.
    pub fn release_reads(&self) {
        release(&self.read_gate);
    }

    /// All calls received so far.
    pub fn calls(&self) -> Vec<MockCall> {
        self.lock().calls.clone()
    }

    /// Number of calls received so far.
    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Stored preferences for a scope.
    pub fn stored_preferences(&self, module_id: Option<&str>) -> PreferenceMap {
        self.lock()
            .preferences
            .get(&module_id.map(String::from))
            .cloned()
            .unwrap_or_default()
    }

    /// Stored settings object.
    pub fn stored_settings(&self) -> SettingsObject {
        self.lock().settings.clone()
    }

    /// Overwrite one raw setting, as another operator would.
    pub fn put_setting(&self, key: impl Into<String>, value: serde_json::Value) {
        self.lock().settings.insert(key.into(), value);
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }


    fn record(&self, call: MockCall) {
        self.lock().calls.push(call);
    }

    fn check_read(&self) -> Result<()> {
        self.check_precondition()?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SdkError::Backend("mock read failure".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<()> {
        self.check_precondition()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SdkError::Backend("mock write failure".to_string()));
        }
        Ok(())
    }

    fn check_precondition(&self) -> Result<()> {
        if self.precondition_failure.load(Ordering::SeqCst) {
            return Err(SdkError::Precondition(
                "No authentication token available".to_string(),
            ));
        }
        Ok(())
    }
}

type Gate = Mutex<Option<Arc<Semaphore>>>;

fn lock_gate(gate: &Gate) -> MutexGuard<'_, Option<Arc<Semaphore>>> {
    gate.lock().unwrap_or_else(|e| e.into_inner())
}

fn hold(gate: &Gate) {
    *lock_gate(gate) = Some(Arc::new(Semaphore::new(0)));
}

fn release(gate: &Gate) {
    if let Some(semaphore) = lock_gate(gate).take() {
        semaphore.close();
    }
}

async fn pass_gate(gate: &Gate) {
    let semaphore = lock_gate(gate).clone();
    if let Some(semaphore) = semaphore {
        // A closed gate releases every waiter
        let _ = semaphore.acquire().await;
    }
}

#[async_trait]
impl PreferenceBackend for MockBackend {
    async fn load_all(&self, module_id: Option<&str>) -> Result<PreferenceMap> {
        self.record(MockCall::LoadAll {
            module_id: module_id.map(String::from),
        });
        pass_gate(&self.read_gate).await;
        self.check_read()?;
        Ok(self.stored_preferences(module_id))
    }

    async fn upsert(&self, request: &UpsertPreferenceRequest) -> Result<()> {
        self.record(MockCall::Upsert(request.clone()));

        pass_gate(&self.write_gate).await;

        self.check_write()?;
        self.lock()
            .preferences
            .entry(request.module_id.clone())
            .or_default()
            .insert(
                request.preference_key.clone(),
                PreferenceEntry::new(request.preference_value.clone(), request.preference_type),
            );
        Ok(())
    }

    async fn bulk_update(&self, request: &BulkPreferencesRequest) -> Result<BulkUpdateResponse> {
        self.record(MockCall::BulkUpdate(request.clone()));
        self.check_write()?;

        let mut state = self.lock();
        let scope = state
            .preferences
            .entry(request.module_id.clone())
            .or_default();

        let mut response = BulkUpdateResponse::default();
        for (key, entry) in &request.preferences {
            if scope.insert(key.clone(), entry.clone()).is_some() {
                response.updated += 1;
            } else {
                response.created += 1;
            }
        }
        response.total = response.updated + response.created;
        Ok(response)
    }

    async fn reset(&self, module_id: Option<&str>) -> Result<ResetResponse> {
        self.record(MockCall::Reset {
            module_id: module_id.map(String::from),
        });
        self.check_write()?;

        let removed = self
            .lock()
            .preferences
            .remove(&module_id.map(String::from))
            .map(|prefs| prefs.len() as u64)
            .unwrap_or(0);

        Ok(ResetResponse {
            success: true,
            message: format!("{} preferences reset", removed),
            count: removed,
        })
    }
}

#[async_trait]
impl SettingsBackend for MockBackend {
    async fn fetch_settings(&self) -> Result<SettingsObject> {
        self.record(MockCall::FetchSettings);
        self.check_read()?;
        Ok(self.stored_settings())
    }

    async fn apply_changes(&self, changes: &SettingsObject) -> Result<SettingsPatchResponse> {
        self.record(MockCall::ApplyChanges(changes.clone()));
        self.check_write()?;

        let mut state = self.lock();
        for (key, value) in changes {
            state.settings.insert(key.clone(), value.clone());
        }
        Ok(SettingsPatchResponse::Ack {
            success: true,
            message: None,
        })
    }
}
