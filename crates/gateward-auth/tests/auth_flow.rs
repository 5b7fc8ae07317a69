//! End-to-end tests for the auth endpoints.
//!
//! Drives the full router in-process: login sets the refresh cookie,
//! the access token authenticates `/auth/me`, the cookie redeems at
//! `/auth/refresh`, and revocation clears the cookie.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use time::OffsetDateTime;
use tower::ServiceExt;
use uuid::Uuid;

use gateward_auth::{
    AppState, Argon2Verifier, AuthService, CookieConfig, JwtService, MemoryUserStore, User,
};

const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

struct TestApp {
    router: Router,
    store: Arc<MemoryUserStore>,
    user_id: Uuid,
}

async fn test_app() -> TestApp {
    let verifier = Argon2Verifier::new();
    let user = User {
        id: Uuid::new_v4(),
        email: "ada@example.com".to_string(),
        username: "ada".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        roles: ["ADMIN", "USER"].iter().map(ToString::to_string).collect(),
        enabled: true,
        password_hash: verifier.hash_password("hunter2").unwrap(),
        created_at: OffsetDateTime::now_utc(),
    };
    let user_id = user.id;

    let store = Arc::new(MemoryUserStore::new());
    store.insert(user).await;

    let jwt = Arc::new(JwtService::new(
        SECRET,
        Duration::from_secs(900),
        Duration::from_secs(604_800),
    ));
    let auth = AuthService::new(jwt, store.clone(), Arc::new(verifier));
    let state = AppState::new(auth, CookieConfig::default());

    TestApp {
        router: gateward_auth::router(state),
        store,
        user_id,
    }
}

fn login_request(email: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(format!(
            r#"{{ "email": "{email}", "password": "{password}" }}"#
        )))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Pulls `name=value` out of a Set-Cookie header.
fn cookie_value(set_cookie: &str, name: &str) -> Option<String> {
    let (first, _) = set_cookie.split_once(';').unwrap_or((set_cookie, ""));
    let (cookie_name, value) = first.split_once('=')?;
    (cookie_name == name).then(|| value.to_string())
}

async fn login(app: &TestApp) -> (String, String) {
    let response = app
        .router
        .clone()
        .oneshot(login_request("ada@example.com", "hunter2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("login must set the refresh cookie")
        .to_str()
        .unwrap()
        .to_string();
    let refresh = cookie_value(&set_cookie, "refresh_token").expect("refresh cookie value");

    let body = json_body(response).await;
    let access = body["access_token"].as_str().unwrap().to_string();
    (access, refresh)
}

#[tokio::test]
async fn login_returns_access_token_and_sets_cookie() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(login_request("ada@example.com", "hunter2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("refresh_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Secure"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/auth/refresh"));
    assert!(set_cookie.contains("Max-Age=604800"));

    let body = json_body(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 900);
    assert!(body["access_token"].as_str().unwrap().contains('.'));
    // The refresh token stays in the cookie, out of the body.
    assert!(body.get("refresh_token").is_none());
}

#[tokio::test]
async fn login_rejects_bad_credentials_identically() {
    let app = test_app().await;

    for (email, password) in [
        ("ada@example.com", "wrong"),
        ("nobody@example.com", "hunter2"),
    ] {
        let response = app
            .router
            .clone()
            .oneshot(login_request(email, password))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = json_body(response).await;
        assert_eq!(body["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn access_token_authenticates_me_endpoint() {
    let app = test_app().await;
    let (access, _) = login(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(AUTHORIZATION, format!("Bearer {access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["id"], app.user_id.to_string());
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["firstName"], "Ada");
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn me_without_token_is_unauthorized() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_for_deleted_account_is_not_found() {
    let app = test_app().await;
    let (access, _) = login(&app).await;

    app.store.remove(app.user_id).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(AUTHORIZATION, format!("Bearer {access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn refresh_cookie_redeems_for_new_access_token() {
    let app = test_app().await;
    let (_, refresh) = login(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/refresh")
                .header(COOKIE, format!("refresh_token={refresh}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert!(body["access_token"].as_str().unwrap().contains('.'));
}

#[tokio::test]
async fn refresh_reflects_role_changes_made_after_login() {
    let app = test_app().await;
    let (_, refresh) = login(&app).await;

    app.store
        .update(app.user_id, |user| {
            user.roles.insert("AUDITOR".to_string());
        })
        .await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/refresh")
                .header(COOKIE, format!("refresh_token={refresh}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The new access token must authorize with the updated role set.
    let body = json_body(response).await;
    let access = body["access_token"].as_str().unwrap();
    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/auth/me")
                .header(AUTHORIZATION, format!("Bearer {access}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    let roles: Vec<&str> = body["roles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_str().unwrap())
        .collect();
    assert!(roles.contains(&"AUDITOR"));
}

#[tokio::test]
async fn refresh_token_survives_repeated_use() {
    let app = test_app().await;
    let (_, refresh) = login(&app).await;

    for _ in 0..2 {
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/auth/refresh")
                    .header(COOKIE, format!("refresh_token={refresh}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn refresh_without_cookie_is_unauthorized() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/refresh")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_with_garbage_cookie_is_unauthorized() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/refresh")
                .header(COOKIE, "refresh_token=garbage")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn revoke_clears_the_cookie() {
    let app = test_app().await;
    let (_, _refresh) = login(&app).await;

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/revoke-refresh-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .expect("revoke must clear the cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("refresh_token="));
    assert!(set_cookie.contains("Path=/auth/refresh"));
    assert!(set_cookie.contains("Max-Age=0"));
}
