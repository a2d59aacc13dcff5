//! HTTP contract tests against a mock backend
//!
//! Each test pins the path, method, headers and body the console backend
//! expects for one endpoint.

use opsconsole_client::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "test-token";

fn client_for(server: &MockServer) -> ConsoleClient {
    ConsoleClient::new(
        ClientConfig {
            base_url: server.uri(),
            ..Default::default()
        },
        StaticToken::new(TOKEN),
    )
    .unwrap()
}

#[tokio::test]
async fn test_get_all_preferences_with_module_scope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user-preferences/all"))
        .and(query_param("module_id", "shipments"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "theme": {"value": "dark", "type": "string"},
            "itemsPerPage": {"value": 50, "type": "number"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let prefs = client_for(&server)
        .get_all_preferences(Some("shipments"))
        .await
        .unwrap();

    assert_eq!(prefs.len(), 2);
    assert_eq!(prefs["theme"].value, json!("dark"));
    assert_eq!(prefs["itemsPerPage"].kind, PreferenceType::Number);
}

#[tokio::test]
async fn test_upsert_preference_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user-preferences/"))
        .and(body_json(json!({
            "preference_key": "compactMode",
            "preference_value": true,
            "preference_type": "boolean",
            "module_id": "dashboard"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server)
        .upsert_preference(&UpsertPreferenceRequest {
            preference_key: "compactMode".into(),
            preference_value: json!(true),
            preference_type: PreferenceType::Boolean,
            module_id: Some("dashboard".into()),
        })
        .await
        .unwrap();

    assert_eq!(body["id"], 7);
}

#[tokio::test]
async fn test_upsert_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user-preferences/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let body = client_for(&server)
        .upsert_preference(&UpsertPreferenceRequest {
            preference_key: "language".into(),
            preference_value: json!("en"),
            preference_type: PreferenceType::String,
            module_id: None,
        })
        .await
        .unwrap();

    assert!(body.is_null());
}

#[tokio::test]
async fn test_bulk_update_counts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user-preferences/bulk"))
        .and(body_json(json!({
            "preferences": {
                "language": {"value": "en", "type": "string"},
                "sidebarCollapsed": {"value": true, "type": "boolean"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updated": 1,
            "created": 1,
            "total": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut preferences = PreferenceMap::new();
    preferences.insert(
        "language".into(),
        PreferenceEntry::new(json!("en"), PreferenceType::String),
    );
    preferences.insert(
        "sidebarCollapsed".into(),
        PreferenceEntry::new(json!(true), PreferenceType::Boolean),
    );

    let counts = client_for(&server)
        .bulk_update_preferences(&BulkPreferencesRequest {
            preferences,
            module_id: None,
        })
        .await
        .unwrap();

    assert_eq!(
        counts,
        BulkUpdateResponse {
            updated: 1,
            created: 1,
            total: 2
        }
    );
}

#[tokio::test]
async fn test_reset_preferences() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user-preferences/reset"))
        .and(query_param("module_id", "moc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "3 preferences reset",
            "count": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reset = client_for(&server)
        .reset_preferences(Some("moc"))
        .await
        .unwrap();
    assert!(reset.success);
    assert_eq!(reset.count, 3);
}

#[tokio::test]
async fn test_settings_get_and_patch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "app_name": "Ops Console",
            "smtp_port": 587
        })))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/settings"))
        .and(body_json(json!({"smtp_port": 2525})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let settings = client.get_settings().await.unwrap();
    assert_eq!(settings["app_name"], "Ops Console");

    let mut changes = SettingsObject::new();
    changes.insert("smtp_port".into(), json!(2525));
    let response = client.patch_settings(&changes).await.unwrap();
    assert!(response.is_success());
}

#[tokio::test]
async fn test_patch_without_body_is_an_ack() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut changes = SettingsObject::new();
    changes.insert("smtp_port".into(), json!(2525));
    let response = client_for(&server).patch_settings(&changes).await.unwrap();

    assert_eq!(
        response,
        SettingsPatchResponse::Ack {
            success: true,
            message: None
        }
    );
}

#[tokio::test]
async fn test_missing_token_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = ConsoleClient::new(
        ClientConfig {
            base_url: server.uri(),
            ..Default::default()
        },
        NoToken,
    )
    .unwrap();

    let err = client.get_settings().await.unwrap_err();
    assert!(matches!(err, ClientError::MissingToken));
    assert!(err.is_precondition());
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(422).set_body_string("smtp_port must be positive"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .patch_settings(&SettingsObject::new())
        .await
        .unwrap_err();

    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 422);
            assert_eq!(message, "smtp_port must be positive");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_settings().await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}
