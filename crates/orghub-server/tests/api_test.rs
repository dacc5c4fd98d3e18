//! End-to-end API tests: the full router driven in-process against
//! in-memory SurrealDB.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use orghub_auth::AuthConfig;
use orghub_server::routes;
use orghub_server::state::AppState;
use serde_json::{json, Value};
use surrealdb::engine::local::Mem;
use surrealdb::Surreal;
use tower::ServiceExt;

fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret-not-for-production".into(),
        jwt_issuer: "orghub-test".into(),
        token_lifetime_secs: 1800,
    }
}

async fn setup_app() -> Router {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    orghub_db::run_migrations(&db).await.unwrap();
    routes::app(AppState::new(db, test_auth_config()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn create_body(name: &str, email: &str) -> Value {
    json!({
        "organization_name": name,
        "email": email,
        "password": "Abcd1234",
    })
}

#[tokio::test]
async fn health_endpoint() {
    let app = setup_app().await;
    let (status, body) = send(
        &app,
        Request::get("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn full_organization_lifecycle() {
    let app = setup_app().await;

    // Create.
    let (status, body) = send(
        &app,
        json_request("POST", "/org/create", create_body("acme", "a@x.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["organization_name"], "acme");
    assert_eq!(body["collection_name"], "org_acme");
    assert_eq!(body["admin_email"], "a@x.com");

    // Get.
    let (status, body) = send(
        &app,
        Request::get("/org/get?organization_name=acme")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["organization_name"], "acme");

    // Login.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/admin/login",
            json!({"email": "a@x.com", "password": "Abcd1234"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["expires_in"], 1800);
    let token = body["access_token"].as_str().unwrap().to_string();

    // Me.
    let (status, body) = send(&app, authed_request("GET", "/admin/me", &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@x.com");

    // Delete.
    let (status, body) = send(
        &app,
        authed_request("DELETE", "/org/delete?organization_name=acme", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // Gone.
    let (status, _body) = send(
        &app,
        Request::get("/org/get?organization_name=acme")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_create_returns_400() {
    let app = setup_app().await;

    let (status, _) = send(
        &app,
        json_request("POST", "/org/create", create_body("acme", "a@x.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        json_request("POST", "/org/create", create_body("acme", "b@x.com")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "already_exists");
}

#[tokio::test]
async fn validation_failures_return_422() {
    let app = setup_app().await;

    // Weak password.
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/org/create",
            json!({"organization_name": "acme", "email": "a@x.com", "password": "weak"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");

    // Malformed organization name.
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/org/create",
            json!({"organization_name": "invalid name!", "email": "a@x.com", "password": "Abcd1234"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn mixed_case_name_is_normalized() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        json_request("POST", "/org/create", create_body("Acme_1", "a@x.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["organization_name"], "acme_1");
    assert_eq!(body["collection_name"], "org_acme_1");
}

#[tokio::test]
async fn protected_routes_without_credentials_return_403() {
    let app = setup_app().await;

    let (status, body) = send(
        &app,
        Request::delete("/org/delete?organization_name=acme")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "not_authenticated");
}

#[tokio::test]
async fn invalid_token_returns_401_with_www_authenticate() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(authed_request("GET", "/admin/me", "garbage-token", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
}

#[tokio::test]
async fn login_with_bad_credentials_returns_401() {
    let app = setup_app().await;
    send(
        &app,
        json_request("POST", "/org/create", create_body("acme", "a@x.com")),
    )
    .await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/admin/login",
            json!({"email": "a@x.com", "password": "Wrong1234"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthenticated");
}

#[tokio::test]
async fn foreign_admin_cannot_update_or_delete() {
    let app = setup_app().await;

    send(
        &app,
        json_request("POST", "/org/create", create_body("acme", "a@x.com")),
    )
    .await;
    send(
        &app,
        json_request("POST", "/org/create", create_body("globex", "b@x.com")),
    )
    .await;

    // Log in as globex's admin.
    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/admin/login",
            json!({"email": "b@x.com", "password": "Abcd1234"}),
        ),
    )
    .await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        authed_request(
            "PUT",
            "/org/update?old_org_name=acme",
            &token,
            Some(json!({"organization_name": "evilcorp", "email": "b@x.com"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");

    let (status, _) = send(
        &app,
        authed_request("DELETE", "/org/delete?organization_name=acme", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn rename_via_http_returns_refreshed_view() {
    let app = setup_app().await;

    send(
        &app,
        json_request("POST", "/org/create", create_body("acme", "a@x.com")),
    )
    .await;
    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/admin/login",
            json!({"email": "a@x.com", "password": "Abcd1234"}),
        ),
    )
    .await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        authed_request(
            "PUT",
            "/org/update?old_org_name=acme",
            &token,
            Some(json!({"organization_name": "globex", "email": "a@x.com"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["organization_name"], "globex");
    assert_eq!(body["collection_name"], "org_globex");
    assert!(body["updated_at"].is_string());

    // The old name is gone, the new one resolves.
    let (status, _) = send(
        &app,
        Request::get("/org/get?organization_name=acme")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        Request::get("/org/get?organization_name=globex")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
