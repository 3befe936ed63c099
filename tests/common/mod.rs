#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use learnhub::learnhub_auth::{Claims, Role, UserStatus, create_access_token, sign_claims};
use learnhub::learnhub_config::{CorsConfig, JwtConfig};
use learnhub::modules::users::service::UserService;
use learnhub::modules::users::{CreateUserDto, User};
use learnhub::router::init_router;
use learnhub::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

/// Lowest bcrypt cost, so user creation stays fast.
pub const TEST_PASSWORD_COST: u32 = 4;

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        leeway_seconds: 0,
        access_token_expiry: 3600,
    }
}

pub fn test_state() -> AppState {
    AppState::new(jwt_config(), CorsConfig::default())
        .unwrap()
        .with_password_cost(TEST_PASSWORD_COST)
}

pub fn setup_test_app() -> (Router, AppState) {
    let state = test_state();
    let app = init_router(state.clone()).unwrap();
    (app, state)
}

/// Token for a random subject with the given role.
pub fn token_for(role: Role) -> String {
    token_for_user(&Uuid::new_v4().to_string(), role)
}

pub fn token_for_user(sub: &str, role: Role) -> String {
    create_access_token(sub, role, UserStatus::Active, &jwt_config()).unwrap()
}

/// Token with hand-picked claims, signed with the test secret.
pub fn token_with_claims(role: &str, iat_offset: i64, exp_offset: i64) -> String {
    let now = Utc::now().timestamp();
    sign_claims(
        &Claims {
            sub: Uuid::new_v4().to_string(),
            role: role.to_string(),
            status: None,
            iat: now + iat_offset,
            exp: now + exp_offset,
        },
        &jwt_config(),
    )
    .unwrap()
}

pub fn token_signed_with(secret: &str, role: Role) -> String {
    let config = JwtConfig {
        secret: secret.to_string(),
        ..jwt_config()
    };
    create_access_token(&Uuid::new_v4().to_string(), role, UserStatus::Active, &config).unwrap()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Inserts a user straight into the store.
pub async fn seed_user(state: &AppState, role: Role) -> User {
    let suffix = Uuid::new_v4().simple().to_string();
    UserService::create_user(
        &state.store,
        CreateUserDto {
            name: format!("Test {suffix}"),
            email: format!("test_{suffix}@example.com"),
            password: "password123".to_string(),
        },
        role,
        TEST_PASSWORD_COST,
    )
    .await
    .unwrap()
}

pub fn assert_error_envelope(response: &TestResponse, status: StatusCode, code: &str) {
    assert_eq!(response.status, status, "body: {}", response.body);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["statusCode"], status.as_u16());
    assert_eq!(response.body["errors"]["code"], code);
    assert!(response.body.get("data").is_none());
}
