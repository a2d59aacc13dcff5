//! Projected setting fields

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sensitivity::{is_sensitive_key, MASK};

/// Input type of a setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    Text,
    Number,
    Boolean,
    Email,
    Url,
    Password,
    List,
}

/// A server setting joined with its catalog metadata.
///
/// `Debug` output redacts sensitive values; there is deliberately no
/// `Serialize` impl so the raw value cannot leak into a rendered view. Use
/// [`SettingField::view`] for display.
#[derive(Clone, PartialEq)]
pub struct SettingField {
    pub key: String,
    pub label: String,
    pub value: Value,
    pub kind: SettingKind,
    pub category: String,
    pub description: String,
    pub editable: bool,
}

impl SettingField {
    /// Credential that must never be displayed
    pub fn is_sensitive(&self) -> bool {
        self.kind == SettingKind::Password || is_sensitive_key(&self.key)
    }

    /// Whether the field holds anything worth showing
    pub fn has_value(&self) -> bool {
        match &self.value {
            Value::Null => false,
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            _ => true,
        }
    }

    /// Text rendered in the settings table.
    ///
    /// Sensitive fields with a value always render as [`MASK`].
    pub fn display_value(&self) -> String {
        if self.is_sensitive() && self.has_value() {
            return MASK.to_string();
        }
        render(&self.value)
    }

    /// Display-safe view of this field
    pub fn view(&self) -> FieldView {
        FieldView {
            key: self.key.clone(),
            label: self.label.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            kind: self.kind,
            display: self.display_value(),
            editable: self.editable,
            sensitive: self.is_sensitive(),
        }
    }
}

impl std::fmt::Debug for SettingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value: &dyn std::fmt::Debug = if self.is_sensitive() && self.has_value() {
            &MASK
        } else {
            &self.value
        };
        f.debug_struct("SettingField")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("value", value)
            .field("kind", &self.kind)
            .field("category", &self.category)
            .field("editable", &self.editable)
            .finish()
    }
}

/// What the settings table shows for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    pub key: String,
    pub label: String,
    pub category: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SettingKind,
    pub display: String,
    pub editable: bool,
    pub sensitive: bool,
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
