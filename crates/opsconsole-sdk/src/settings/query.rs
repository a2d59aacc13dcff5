//! Local filtering of the projected field list

use super::field::SettingField;

/// Category filter and free-text search, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsFilter {
    /// Exact category, or `None` for all categories
    pub category: Option<String>,
    /// Case-insensitive needle matched against key, label, description and category
    pub search: String,
}

impl SettingsFilter {
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn matches(&self, field: &SettingField) -> bool {
        if let Some(category) = &self.category {
            if &field.category != category {
                return false;
            }
        }

        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }

        [&field.key, &field.label, &field.description, &field.category]
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::field::SettingKind;
    use serde_json::json;

    fn field(key: &str, label: &str, category: &str, description: &str) -> SettingField {
        SettingField {
            key: key.into(),
            label: label.into(),
            value: json!(null),
            kind: SettingKind::Text,
            category: category.into(),
            description: description.into(),
            editable: true,
        }
    }

    #[test]
    fn test_search_fields_case_insensitive() {
        let f = field("email_host", "Host", "Email", "SMTP server hostname");
        assert!(SettingsFilter::default().search("smtp").matches(&f));
        assert!(SettingsFilter::default().search("EMAIL_").matches(&f));
        assert!(SettingsFilter::default().search("email").matches(&f));
        assert!(!SettingsFilter::default().search("celery").matches(&f));
    }

    #[test]
    fn test_category_and_search_combine() {
        let f = field("email_host", "Host", "Email", "SMTP server hostname");
        assert!(SettingsFilter::default().category("Email").search("host").matches(&f));
        assert!(!SettingsFilter::default().category("Security").search("host").matches(&f));
        assert!(!SettingsFilter::default().category("Email").search("port").matches(&f));
    }
}
