//! HTTP-level tests for the config editor API.
//!
//! Each test runs the full router against a temporary config directory.

#![cfg(feature = "server")]

use std::sync::Arc;

use axum::body::Body;
use fanvil_cfg::api::build_router;
use fanvil_cfg::phone_cfg::{format_dss_block, format_sip_block};
use fanvil_cfg::{DssKey, LocalConfigStore, SipAccount};
use http_body_util::BodyExt;
use hyper::{Request, StatusCode};
use tempfile::TempDir;
use tower::ServiceExt;

// ── Fixtures ───────────────────────────────────────────────────

const DESK_CFG: &str = "<GLOBAL CONFIG MODULE>\n\
Time Zone      :+1\n\
\n\
<DSSKEY CONFIG MODULE>\n\
--Dsskey Config1--\n\
Fkey1 Type    :1\n\
Fkey1 Value   :100\n\
Fkey1 Title   :One\n\
Fkey1 ICON    :Red\n\
\n\
<NET CONFIG MODULE>\n\
WAN Type       :DHCP\n\
\n\
<SIP CONFIG MODULE>\n\
SIP1 Phone Number     :100\n\
SIP1 Display Name     :Front Desk\n\
SIP1 Register Addr    :pbx.example.net\n\
SIP1 Register Port    :5060\n\
SIP1 Register User    :100\n\
SIP1 Register Password:s3cret\n\
SIP1 Register TTL     :3600\n\
SIP1 Enable Reg       :1\n\
<<END OF FILE>>";

fn test_app() -> (TempDir, axum::Router) {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    std::fs::write(temp_dir.path().join("desk.cfg"), DESK_CFG).unwrap();
    std::fs::write(temp_dir.path().join("lobby.cfg"), "").unwrap();
    std::fs::write(temp_dir.path().join("README.md"), "not a config").unwrap();

    let store = LocalConfigStore::new(temp_dir.path());
    (temp_dir, build_router(Arc::new(store)))
}

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap_or_else(
        |_| serde_json::json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
    )
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn sip_json(phone: &str) -> serde_json::Value {
    serde_json::json!({
        "phone_number": phone,
        "display_name": "Lobby",
        "register_addr": "pbx.example.net",
        "register_port": "5060",
        "register_user": phone,
        "register_password": "pw",
        "register_ttl": "1800",
        "enable_reg": "1"
    })
}

// ── Tests ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_health() {
    let (_dir, app) = test_app();
    let resp = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["status"], "healthy");
}

#[tokio::test]
async fn test_list_configs() {
    let (_dir, app) = test_app();
    let resp = app.oneshot(get("/api/configs")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!(["desk.cfg", "lobby.cfg"])
    );
}

#[tokio::test]
async fn test_get_config() {
    let (_dir, app) = test_app();
    let resp = app.oneshot(get("/api/config/desk.cfg")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(
        body["dss_keys"],
        serde_json::json!([{
            "index": 1,
            "key_type": 1,
            "value": "100",
            "label": "One",
            "icon": "Red"
        }])
    );
    assert_eq!(body["sip_account"]["phone_number"], "100");
    assert_eq!(body["sip_account"]["register_password"], "s3cret");
    assert_eq!(body["raw_config"], DESK_CFG);
}

#[tokio::test]
async fn test_get_config_without_blocks() {
    let (_dir, app) = test_app();
    let resp = app.oneshot(get("/api/config/lobby.cfg")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["dss_keys"], serde_json::json!([]));
    assert_eq!(body["sip_account"]["phone_number"], "");
    assert_eq!(body["sip_account"]["enable_reg"], "");
}

#[tokio::test]
async fn test_get_missing_config_is_404() {
    let (_dir, app) = test_app();
    let resp = app.oneshot(get("/api/config/absent.cfg")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert!(
        body["error"].as_str().unwrap_or("").contains("absent.cfg"),
        "Expected not-found message, got: {body}"
    );
}

#[tokio::test]
async fn test_path_escape_is_rejected() {
    let (_dir, app) = test_app();
    let resp = app
        .oneshot(get("/api/config/..%2Fdesk.cfg"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_save_unchanged_data_reproduces_file() {
    let (dir, app) = test_app();
    let loaded = body_json(app.clone().oneshot(get("/api/config/desk.cfg")).await.unwrap()).await;

    let resp = app
        .oneshot(post_json("/api/config/desk.cfg", &loaded))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["message"], "Config updated");

    let written = std::fs::read_to_string(dir.path().join("desk.cfg")).unwrap();
    assert_eq!(written, DESK_CFG);
}

#[tokio::test]
async fn test_save_replaces_blocks_and_keeps_foreign_modules() {
    let (dir, app) = test_app();
    let body = serde_json::json!({
        "dss_keys": [
            { "index": 1, "key_type": "2", "value": "*97", "label": "Voicemail" },
            { "index": 4, "key_type": 1, "value": "104", "label": "Four", "icon": "Blue" }
        ],
        "sip_account": sip_json("200"),
        "raw_config": DESK_CFG
    });

    let resp = app
        .oneshot(post_json("/api/config/desk.cfg", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let keys = vec![
        DssKey::new(1, 2, "*97", "Voicemail"),
        DssKey::new(4, 1, "104", "Four").with_icon("Blue"),
    ];
    let sip: SipAccount = serde_json::from_value(sip_json("200")).unwrap();
    let expected = format!(
        "<GLOBAL CONFIG MODULE>\nTime Zone      :+1\n\n{}\n<NET CONFIG MODULE>\nWAN Type       :DHCP\n\n{}",
        format_dss_block(&keys),
        format_sip_block(&sip)
    );
    let written = std::fs::read_to_string(dir.path().join("desk.cfg")).unwrap();
    assert_eq!(written, expected);
}

#[tokio::test]
async fn test_save_new_file_then_read_back() {
    let (_dir, app) = test_app();
    let body = serde_json::json!({
        "dss_keys": [{ "index": 2, "key_type": 1, "value": "102", "label": "Two" }],
        "sip_account": sip_json("102"),
        "raw_config": "<GLOBAL CONFIG MODULE>\nTime Zone      :+1\n"
    });

    let resp = app
        .clone()
        .oneshot(post_json("/api/config/fresh.cfg", &body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let loaded = body_json(app.oneshot(get("/api/config/fresh.cfg")).await.unwrap()).await;
    assert_eq!(
        loaded["dss_keys"],
        serde_json::json!([{
            "index": 2,
            "key_type": 1,
            "value": "102",
            "label": "Two",
            "icon": "Green"
        }])
    );
    assert_eq!(loaded["sip_account"], sip_json("102"));
    let raw = loaded["raw_config"].as_str().unwrap();
    assert!(raw.starts_with("<DSSKEY CONFIG MODULE>\n"));
    assert!(raw.contains("\n<GLOBAL CONFIG MODULE>\nTime Zone      :+1\n<SIP CONFIG MODULE>\n"));
    assert!(raw.ends_with("<<END OF FILE>>"));
}

#[tokio::test]
async fn test_save_rejects_malformed_body() {
    let (_dir, app) = test_app();
    let body = serde_json::json!({
        "dss_keys": [],
        "sip_account": { "phone_number": "100" },
        "raw_config": ""
    });
    let resp = app
        .oneshot(post_json("/api/config/desk.cfg", &body))
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let (_dir, app) = test_app();
    let resp = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/config/desk.cfg")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
