//! Admin settings table with buffered edits and a single bulk save

use opsconsole_client::SettingsObject;
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::field::SettingField;
use super::projection::project;
use super::query::SettingsFilter;
use crate::backend::SettingsBackend;
use crate::error::{Result, SdkError};
use crate::notify::{Notice, Notifier, TracingNotifier};

/// The inline edit currently open, if any
#[derive(Clone, PartialEq)]
pub struct EditSession {
    pub key: String,
    /// Uncommitted value. Starts empty for sensitive fields.
    pub draft: Value,
    pub sensitive: bool,
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("EditSession");
        s.field("key", &self.key);
        if self.sensitive {
            s.field("draft", &"<redacted>");
        } else {
            s.field("draft", &self.draft);
        }
        s.field("sensitive", &self.sensitive).finish()
    }
}

/// Local view of the server's settings.
///
/// Edits land in the projected field list and mark their key as modified;
/// [`save_all`](Self::save_all) sends exactly the modified keys in one
/// request. A reconciler is owned by a single settings view and is not
/// shared.
pub struct SettingsReconciler {
    backend: Arc<dyn SettingsBackend>,
    notifier: Arc<dyn Notifier>,
    fields: Vec<SettingField>,
    modified: BTreeSet<String>,
    editing: Option<EditSession>,
    last_error: Option<String>,
}

impl SettingsReconciler {
    pub fn new(backend: Arc<dyn SettingsBackend>) -> Self {
        Self {
            backend,
            notifier: Arc::new(TracingNotifier),
            fields: Vec::new(),
            modified: BTreeSet::new(),
            editing: None,
            last_error: None,
        }
    }

    /// Route failure and success notices to `notifier`
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    // === Loading ===

    /// Fetch and project the server settings.
    ///
    /// A successful load replaces the field list and discards unsaved edits.
    /// On failure the current table is kept, the error is exposed through
    /// [`last_error`](Self::last_error) and returned.
    pub async fn load_settings(&mut self) -> Result<()> {
        match self.backend.fetch_settings().await {
            Ok(raw) => {
                self.fields = project(&raw);
                if !self.modified.is_empty() {
                    debug!(discarded = self.modified.len(), "Reload discarded unsaved edits");
                }
                self.modified.clear();
                self.editing = None;
                self.last_error = None;
                info!(
                    received = raw.len(),
                    shown = self.fields.len(),
                    "Settings loaded"
                );
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to load settings");
                self.last_error = Some(e.to_string());
                self.notifier
                    .notify(Notice::error("Settings unavailable", e.to_string()));
                Err(e)
            }
        }
    }

    // === Editing ===

    /// Open the inline editor for `key`.
    ///
    /// Returns `false` and does nothing for unknown or read-only fields.
    /// Sensitive fields open with an empty draft so the stored value never
    /// reaches the editor.
    pub fn begin_edit(&mut self, key: &str) -> bool {
        let Some(field) = self.field(key) else {
            return false;
        };
        if !field.editable {
            return false;
        }

        let sensitive = field.is_sensitive();
        let draft = if sensitive {
            Value::String(String::new())
        } else {
            field.value.clone()
        };
        self.editing = Some(EditSession {
            key: key.to_string(),
            draft,
            sensitive,
        });
        true
    }

    /// Replace the draft of the open edit session.
    ///
    /// Returns `false` when no session is open.
    pub fn set_draft(&mut self, value: Value) -> bool {
        match self.editing.as_mut() {
            Some(session) => {
                session.draft = value;
                true
            }
            None => false,
        }
    }

    /// Commit the open session's draft. `Ok(false)` when nothing was open.
    pub fn commit_draft(&mut self) -> Result<bool> {
        match self.editing.take() {
            Some(session) => self.commit_edit(&session.key, session.draft).map(|()| true),
            None => Ok(false),
        }
    }

    /// Write `value` into the local field and mark it modified.
    ///
    /// Closes any open edit session. Marking is idempotent: a key edited
    /// several times is sent once, with its latest value.
    pub fn commit_edit(&mut self, key: &str, value: Value) -> Result<()> {
        let field = self
            .fields
            .iter_mut()
            .find(|f| f.key == key)
            .ok_or_else(|| SdkError::UnknownField(key.to_string()))?;
        if !field.editable {
            return Err(SdkError::ReadOnlyField(key.to_string()));
        }

        field.value = value;
        self.modified.insert(key.to_string());
        self.editing = None;
        debug!(%key, modified = self.modified.len(), "Setting edited locally");
        Ok(())
    }

    /// Drop the uncommitted draft. Committed edits are untouched.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    // === Saving ===

    /// Partial update holding only the modified keys
    pub fn pending_changes(&self) -> SettingsObject {
        self.fields
            .iter()
            .filter(|f| self.modified.contains(&f.key))
            .map(|f| (f.key.clone(), f.value.clone()))
            .collect()
    }

    /// Send every modified key in one PATCH, then reload.
    ///
    /// Returns the number of keys sent. With nothing modified no request is
    /// made. On failure the modified set is kept so the same edits can be
    /// retried. A reload failure after an accepted save is reported through
    /// [`last_error`](Self::last_error) but does not fail the save.
    pub async fn save_all(&mut self) -> Result<usize> {
        if self.modified.is_empty() {
            debug!("No modified settings to save");
            return Ok(0);
        }

        let changes = self.pending_changes();
        let outcome = match self.backend.apply_changes(&changes).await {
            Ok(response) if response.is_success() => Ok(()),
            Ok(_) => Err(SdkError::Backend("settings update rejected by server".to_string())),
            Err(e) => Err(e),
        };

        if let Err(e) = outcome {
            error!(
                keys = ?self.modified,
                error = %e,
                "Failed to save settings; edits kept for retry"
            );
            self.notifier
                .notify(Notice::error("Settings not saved", e.to_string()));
            return Err(e);
        }

        let saved = changes.len();
        info!(count = saved, "Settings saved");
        self.modified.clear();
        self.notifier.notify(Notice::success(
            "Settings saved",
            format!("{} setting(s) updated", saved),
        ));

        if let Err(e) = self.load_settings().await {
            warn!(error = %e, "Settings saved but reload failed");
        }
        Ok(saved)
    }

    // === Reads ===

    /// Projected fields, ordered by category then label
    pub fn fields(&self) -> &[SettingField] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&SettingField> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn modified_keys(&self) -> &BTreeSet<String> {
        &self.modified
    }

    pub fn is_dirty(&self) -> bool {
        !self.modified.is_empty()
    }

    pub fn editing(&self) -> Option<&EditSession> {
        self.editing.as_ref()
    }

    /// Distinct categories in display order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.fields
            .iter()
            .map(|f| f.category.as_str())
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Fields passing `filter`. Never touches the backend.
    pub fn visible<'a>(
        &'a self,
        filter: &'a SettingsFilter,
    ) -> impl Iterator<Item = &'a SettingField> {
        self.fields.iter().filter(move |f| filter.matches(f))
    }

    /// Message of the last failed load, for an inline banner
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
