//! Join of raw server settings against the catalog

use opsconsole_client::SettingsObject;

use super::catalog::{find_entry, lookup, CatalogEntry, SETTINGS_CATALOG};
use super::field::SettingField;

/// Project raw settings through the built-in catalog.
///
/// Keys without a catalog entry are dropped. The result is ordered by
/// `(category, label)`.
pub fn project(raw: &SettingsObject) -> Vec<SettingField> {
    project_with(raw, SETTINGS_CATALOG)
}

/// Project raw settings through an arbitrary catalog
pub fn project_with(raw: &SettingsObject, catalog: &[CatalogEntry]) -> Vec<SettingField> {
    let mut fields: Vec<SettingField> = raw
        .iter()
        .filter_map(|(key, value)| {
            find_entry(catalog, key).map(|entry| SettingField {
                key: key.clone(),
                label: entry.label.to_string(),
                value: value.clone(),
                kind: entry.kind,
                category: entry.category.to_string(),
                description: entry.description.to_string(),
                editable: entry.editable,
            })
        })
        .collect();

    fields.sort_by(|a, b| {
        (&a.category, &a.label, &a.key).cmp(&(&b.category, &b.label, &b.key))
    });
    fields
}

/// Raw keys the catalog does not know about.
///
/// [`project`] drops these without a trace; this is for diagnostics only.
pub fn unmanaged_keys(raw: &SettingsObject) -> Vec<String> {
    raw.keys()
        .filter(|key| lookup(key.as_str()).is_none())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::field::SettingKind;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> SettingsObject {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let settings = raw(json!({
            "app_name": "Ops Console",
            "legacy_flag": true
        }));
        let fields = project(&settings);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].key, "app_name");
        assert_eq!(unmanaged_keys(&settings), vec!["legacy_flag".to_string()]);
    }

    #[test]
    fn test_sorted_by_category_then_label() {
        let catalog = [
            CatalogEntry::new("smtp_port", "Port", "Email", SettingKind::Number, true, ""),
            CatalogEntry::new("smtp_host", "Host", "Email", SettingKind::Text, true, ""),
            CatalogEntry::new("app_name", "Name", "Application", SettingKind::Text, true, ""),
        ];
        let settings = raw(json!({"smtp_port": 25, "smtp_host": "mail", "app_name": "Ops"}));

        let labels: Vec<_> = project_with(&settings, &catalog)
            .into_iter()
            .map(|f| f.label)
            .collect();
        assert_eq!(labels, vec!["Name", "Host", "Port"]);
    }

    #[test]
    fn test_metadata_comes_from_catalog() {
        let fields = project(&raw(json!({"database_url": "postgres://u:p@db/ops"})));
        assert_eq!(fields[0].category, "Maintenance");
        assert!(!fields[0].editable);
        assert!(fields[0].is_sensitive());
    }
}
