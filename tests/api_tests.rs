use axum::{
    body::Body,
    extract::FromRef,
    http::{header::AUTHORIZATION, header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use alumnet::{app::build_app, auth::jwt::JwtKeys, state::AppState};

// Surface behavior that does not need a live database: routing, auth
// rejection, and path/body validation all run before any query is issued.

fn test_app() -> (Router, JwtKeys) {
    let state = AppState::fake();
    let keys = JwtKeys::from_ref(&state);
    (build_app(state), keys)
}

fn bearer(keys: &JwtKeys) -> String {
    let token = keys.sign_access(Uuid::new_v4()).expect("sign access");
    format!("Bearer {token}")
}

async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.expect("read body").to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn users_list_requires_bearer_token() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Missing Authorization header");
}

#[tokio::test]
async fn invalid_scheme_is_rejected() {
    let (app, keys) = test_app();
    let token = keys.sign_access(Uuid::new_v4()).unwrap();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users")
                .header(AUTHORIZATION, format!("Token {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/notifications")
                .header(AUTHORIZATION, "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_cannot_access_protected_routes() {
    let (app, keys) = test_app();
    let token = keys.sign_refresh(Uuid::new_v4()).unwrap();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users")
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Access token required");
}

#[tokio::test]
async fn malformed_event_id_yields_bad_request() {
    let (app, keys) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/events/not-a-uuid")
                .header(AUTHORIZATION, bearer(&keys))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_user_id_on_privacy_settings_yields_bad_request() {
    let (app, keys) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/12345/privacy-settings")
                .header(AUTHORIZATION, bearer(&keys))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn privacy_settings_update_requires_auth() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::PUT)
                .uri(format!("/api/v1/users/{}/privacy-settings", Uuid::new_v4()))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"showEmail":false}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_positive_donation_is_rejected_before_persistence() {
    let (app, keys) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/v1/donations")
                .header(AUTHORIZATION, bearer(&keys))
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"amountCents":-500}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"], "Amount must be positive");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
