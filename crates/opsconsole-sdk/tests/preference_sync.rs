//! PreferenceSync against the in-memory backend

use opsconsole_sdk::*;
use serde_json::json;
use std::sync::Arc;

fn notifier() -> Arc<CollectingNotifier> {
    Arc::new(CollectingNotifier::new())
}

#[tokio::test]
async fn test_failed_load_falls_back_to_defaults() {
    let backend = Arc::new(MockBackend::new().with_failing_reads(true));
    let notices = notifier();
    let prefs = PreferenceSync::new(backend).with_notifier(notices.clone());

    let source = prefs.load_all().await.unwrap();

    assert_eq!(source, CacheSource::Defaults);
    assert_eq!(prefs.load_state(), LoadState::Ready);
    assert_eq!(prefs.get("theme", json!(null)), json!("system"));
    assert_eq!(prefs.get("itemsPerPage", json!(null)), json!(25));
    assert_eq!(prefs.get("timezone", json!(null)), json!("Africa/Douala"));
    assert_eq!(prefs.get("nonexistentKey", json!("fallback")), json!("fallback"));
    assert_eq!(notices.count(NoticeLevel::Warning), 1);
}

#[tokio::test]
async fn test_missing_token_is_loud_but_unblocks() {
    let backend = Arc::new(MockBackend::new().with_missing_token());
    let notices = notifier();
    let prefs = PreferenceSync::new(backend).with_notifier(notices.clone());

    let err = prefs.load_all().await.unwrap_err();

    assert!(err.is_precondition());
    assert!(prefs.is_ready());
    assert_eq!(prefs.get_str("language", "en"), "fr");
    assert_eq!(notices.count(NoticeLevel::Error), 1);
}

#[tokio::test]
async fn test_successful_load_replaces_cache() {
    let backend = Arc::new(MockBackend::new().with_preference(
        Some("dashboard"),
        "defaultView",
        PreferenceEntry::new(json!("list"), PreferenceType::String),
    ));
    let prefs = PreferenceSync::new(backend).with_module("dashboard");
    let _ = prefs.stage("stale", json!(1), PreferenceType::Number);

    assert_eq!(prefs.load_all().await.unwrap(), CacheSource::Remote);

    assert_eq!(prefs.get_str("defaultView", "grid"), "list");
    assert_eq!(prefs.get("stale", json!(null)), json!(null));
    // Remote data does not mix with the default table
    assert_eq!(prefs.get("theme", json!(null)), json!(null));
}

#[tokio::test]
async fn test_update_is_visible_before_remote_write_resolves() {
    let backend = Arc::new(MockBackend::new());
    backend.hold_writes();
    let prefs = PreferenceSync::new(backend.clone());

    let pending = prefs.stage("compactMode", json!(true), PreferenceType::Boolean);
    assert!(prefs.get_bool("compactMode", false));

    let write = tokio::spawn(pending.commit());
    tokio::task::yield_now().await;
    assert!(!write.is_finished());
    assert!(prefs.get_bool("compactMode", false));
    assert!(backend.stored_preferences(None).is_empty());

    backend.release_writes();
    assert_eq!(write.await.unwrap(), UpdateOutcome::Confirmed);
    assert_eq!(
        backend.stored_preferences(None)["compactMode"].value,
        json!(true)
    );
}

#[tokio::test]
async fn test_failed_write_keeps_local_value_and_notifies() {
    let backend = Arc::new(MockBackend::new().with_failing_writes(true));
    let notices = notifier();
    let prefs = PreferenceSync::new(backend.clone()).with_notifier(notices.clone());

    let outcome = prefs
        .update("sidebarCollapsed", json!(true), PreferenceType::Boolean)
        .await;

    assert!(!outcome.is_confirmed());
    assert!(prefs.get_bool("sidebarCollapsed", false));
    assert_eq!(notices.count(NoticeLevel::Error), 1);

    // A successful retry closes the inconsistency window
    backend.set_failing_writes(false);
    let retry = prefs
        .update("sidebarCollapsed", json!(true), PreferenceType::Boolean)
        .await;
    assert!(retry.is_confirmed());
    assert_eq!(
        backend.stored_preferences(None)["sidebarCollapsed"].value,
        json!(true)
    );
}

#[tokio::test]
async fn test_update_carries_module_scope() {
    let backend = Arc::new(MockBackend::new());
    let prefs = PreferenceSync::new(backend.clone()).with_module("moc");

    prefs
        .update("itemsPerPage", json!(50), PreferenceType::Number)
        .await;

    assert_eq!(backend.stored_preferences(Some("moc")).len(), 1);
    assert!(backend.stored_preferences(None).is_empty());
}

#[tokio::test]
async fn test_bulk_update_is_all_or_nothing() {
    let backend = Arc::new(MockBackend::new().with_preference(
        None,
        "theme",
        PreferenceEntry::new(json!("light"), PreferenceType::String),
    ));
    let prefs = PreferenceSync::new(backend.clone());

    let mut batch = PreferenceMap::new();
    batch.insert("theme".into(), PreferenceEntry::new(json!("dark"), PreferenceType::String));
    batch.insert("language".into(), PreferenceEntry::new(json!("en"), PreferenceType::String));

    backend.set_failing_writes(true);
    assert!(prefs.bulk_update(batch.clone()).await.is_err());
    assert_eq!(prefs.get("language", json!(null)), json!(null));

    backend.set_failing_writes(false);
    let counts = prefs.bulk_update(batch).await.unwrap();
    assert_eq!((counts.updated, counts.created, counts.total), (1, 1, 2));
    assert_eq!(prefs.get_str("theme", "system"), "dark");
}

#[tokio::test]
async fn test_reset_does_not_reload() {
    let backend = Arc::new(MockBackend::new().with_preference(
        None,
        "theme",
        PreferenceEntry::new(json!("dark"), PreferenceType::String),
    ));
    let prefs = PreferenceSync::new(backend.clone());
    prefs.load_all().await.unwrap();

    assert_eq!(prefs.reset().await.unwrap(), 1);
    assert_eq!(prefs.get_str("theme", "system"), "dark");

    prefs.load_all().await.unwrap();
    assert_eq!(prefs.get_str("theme", "system"), "system");
}

#[tokio::test]
async fn test_declined_reset_makes_no_call() {
    let backend = Arc::new(MockBackend::new());
    let prefs = PreferenceSync::new(backend.clone());

    assert_eq!(prefs.reset_confirmed(|| false).await.unwrap(), None);
    assert_eq!(backend.call_count(), 0);

    assert_eq!(prefs.reset_confirmed(|| true).await.unwrap(), Some(0));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_export_import_between_scopes() {
    let source = Arc::new(MockBackend::new().with_preference(
        Some("dashboard"),
        "defaultView",
        PreferenceEntry::new(json!("list"), PreferenceType::String),
    ));
    let prefs = PreferenceSync::new(source).with_module("dashboard");
    prefs.load_all().await.unwrap();
    let file = prefs.export().to_json().unwrap();

    let target = Arc::new(MockBackend::new());
    let restored = PreferenceSync::new(target.clone()).with_module("dashboard");
    let counts = restored
        .import(PreferenceExport::from_json(&file).unwrap())
        .await
        .unwrap();

    assert_eq!(counts.created, 1);
    assert_eq!(
        target.stored_preferences(Some("dashboard"))["defaultView"].value,
        json!("list")
    );
    assert_eq!(restored.get_str("defaultView", "grid"), "list");
}
