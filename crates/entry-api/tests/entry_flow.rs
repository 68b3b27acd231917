//! Register, sign in, and work with entries using the issued token.

mod helpers;

use axum::http::StatusCode;
use axum::http::header::LOCATION;
use serde_json::{Value, json};

use helpers::{memory_app, send, test_config};

const PASSWORD: &str = "violet-kettle-harbor-93";

fn library() -> Value {
    json!({
        "name": "Belize Literacy Council",
        "level": "primary",
        "contact": "Jo Smith",
        "phone": "(501) 822-1234",
        "email": "jo@example.org",
        "website": "https://example.org",
        "address": "4 Hummingbird Highway",
        "mode": ["online", "in-person"],
    })
}

async fn sign_in(app: &axum::Router, email: &str) -> String {
    let registered = send(
        app,
        "POST",
        "/v1/users",
        Some(json!({"name": "Alice", "email": email, "password": PASSWORD})),
        None,
        &[],
    )
    .await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.body["data"]["user"]["email"], email);
    assert!(registered.body["data"]["user"].get("password_hash").is_none());

    let issued = send(
        app,
        "POST",
        "/v1/tokens/authentication",
        Some(json!({"email": email, "password": PASSWORD})),
        None,
        &[],
    )
    .await;
    assert_eq!(issued.status, StatusCode::CREATED);
    issued.body["data"]["authentication_token"]["token"]
        .as_str()
        .expect("token string")
        .to_string()
}

#[tokio::test]
async fn test_issued_token_reads_with_default_permissions() {
    let app = memory_app(test_config());
    let token = sign_in(&app, "reader@example.com").await;

    let listed = send(&app, "GET", "/v1/entries", None, Some(&token), &[]).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"]["entries"], json!([]));
    assert_eq!(listed.body["data"]["metadata"], json!({}));

    let denied = send(&app, "POST", "/v1/entries", Some(library()), Some(&token), &[]).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_entry_lifecycle_with_issued_token() {
    let mut config = test_config();
    config.auth.default_permissions = vec!["entries:read".into(), "entries:write".into()];
    let app = memory_app(config);
    let token = sign_in(&app, "editor@example.com").await;

    let created = send(&app, "POST", "/v1/entries", Some(library()), Some(&token), &[]).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.headers[LOCATION], "/v1/entries/1");
    assert_eq!(created.body["data"]["entry"]["version"], 1);

    let listed = send(
        &app,
        "GET",
        "/v1/entries?mode=online&page_size=5",
        None,
        Some(&token),
        &[],
    )
    .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"]["metadata"]["total_records"], 1);
    assert_eq!(listed.body["data"]["metadata"]["page_size"], 5);

    let shown = send(&app, "GET", "/v1/entries/1", None, Some(&token), &[]).await;
    assert_eq!(shown.status, StatusCode::OK);
    assert_eq!(shown.body["data"]["entry"]["name"], "Belize Literacy Council");

    let patched = send(
        &app,
        "PATCH",
        "/v1/entries/1",
        Some(json!({"level": "secondary"})),
        Some(&token),
        &[("x-expected-version", "1")],
    )
    .await;
    assert_eq!(patched.status, StatusCode::OK);
    assert_eq!(patched.body["data"]["entry"]["level"], "secondary");
    assert_eq!(patched.body["data"]["entry"]["version"], 2);

    let stale = send(
        &app,
        "PATCH",
        "/v1/entries/1",
        Some(json!({"level": "tertiary"})),
        Some(&token),
        &[("x-expected-version", "1")],
    )
    .await;
    assert_eq!(stale.status, StatusCode::CONFLICT);
    assert_eq!(stale.body["error"], "EDIT_CONFLICT");

    let deleted = send(&app, "DELETE", "/v1/entries/1", None, Some(&token), &[]).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["message"], "entry successfully deleted");

    let again = send(&app, "DELETE", "/v1/entries/1", None, Some(&token), &[]).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}
