mod common;

use axum::http::{Method, StatusCode, header};
use data_encoding::BASE64URL_NOPAD;
use serde_json::json;

use common::{
    assert_error_envelope, send, setup_test_app, token_for, token_signed_with, token_with_claims,
};
use learnhub::learnhub_auth::{Claims, Role, sign_claims};
use learnhub::logging::REQUEST_ID_HEADER;

fn content_body() -> serde_json::Value {
    json!({
        "moduleId": "8a0c1e52-3c1f-4c49-9d1c-5b7f3f5f8f01",
        "title": "Ownership basics",
        "contentType": "VIDEO",
        "url": "https://cdn.example.com/ownership.mp4"
    })
}

#[tokio::test]
async fn test_student_cannot_create_content() {
    let (app, state) = setup_test_app();
    let token = token_for(Role::Student);

    let response = send(
        &app,
        Method::POST,
        "/api/content/create-content",
        Some(&token),
        Some(content_body()),
    )
    .await;

    assert_error_envelope(&response, StatusCode::FORBIDDEN, "ROLE_NOT_PERMITTED");
    assert!(state.store.contents.is_empty().await, "handler must not run");
}

#[tokio::test]
async fn test_instructor_creates_content() {
    let (app, state) = setup_test_app();
    let token = token_for(Role::Instructor);

    let response = send(
        &app,
        Method::POST,
        "/api/content/create-content",
        Some(&token),
        Some(content_body()),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED, "body: {}", response.body);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["statusCode"], 201);
    assert_eq!(response.body["data"]["title"], "Ownership basics");
    assert!(response.body.get("errors").is_none());
    assert_eq!(state.store.contents.len().await, 1);
}

#[tokio::test]
async fn test_missing_header_is_unauthorized() {
    let (app, state) = setup_test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/content/create-content",
        None,
        Some(content_body()),
    )
    .await;

    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "MISSING_TOKEN");
    assert_eq!(response.headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    assert!(state.store.contents.is_empty().await);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_missing_token() {
    let (app, _) = setup_test_app();
    let request = axum::http::Request::builder()
        .uri("/api/course")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let (app, _) = setup_test_app();
    let token = token_with_claims("ADMIN", -7200, -3600);

    let response = send(&app, Method::GET, "/api/user", Some(&token), None).await;

    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "EXPIRED_TOKEN");
}

#[tokio::test]
async fn test_token_from_the_future_is_rejected() {
    let (app, _) = setup_test_app();
    let token = token_with_claims("ADMIN", 600, 4200);

    let response = send(&app, Method::GET, "/api/user", Some(&token), None).await;

    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "TOKEN_NOT_YET_VALID");
}

#[tokio::test]
async fn test_tampered_signature_is_rejected() {
    let (app, _) = setup_test_app();
    let token = token_for(Role::Instructor);
    let (unsigned, signature) = token.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { "B" } else { "A" };
    let tampered = format!("{unsigned}.{flipped}{}", &signature[1..]);

    let response = send(&app, Method::GET, "/api/course", Some(&tampered), None).await;

    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "INVALID_SIGNATURE");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let (app, _) = setup_test_app();
    let token = token_signed_with("some-other-secret-that-is-long-enough", Role::SuperAdmin);

    let response = send(&app, Method::GET, "/api/course", Some(&token), None).await;

    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "INVALID_SIGNATURE");
}

#[tokio::test]
async fn test_unsigned_token_is_rejected() {
    let (app, _) = setup_test_app();
    let now = chrono::Utc::now().timestamp();
    let header_segment = BASE64URL_NOPAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload_segment = BASE64URL_NOPAD.encode(
        json!({ "sub": "u1", "role": "SUPER_ADMIN", "iat": now, "exp": now + 3600 })
            .to_string()
            .as_bytes(),
    );
    let token = format!("{header_segment}.{payload_segment}.");

    let response = send(&app, Method::GET, "/api/user", Some(&token), None).await;

    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "INVALID_SIGNATURE");
}

#[tokio::test]
async fn test_garbage_token_is_malformed() {
    let (app, _) = setup_test_app();

    for token in ["not-a-jwt", "a.b", "a.b.c.d", "!!!.???.***"] {
        let response = send(&app, Method::GET, "/api/course", Some(token), None).await;
        assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "MALFORMED_TOKEN");
    }
}

#[tokio::test]
async fn test_unknown_role_is_rejected() {
    let (app, _) = setup_test_app();

    for role in ["TEACHER", "admin", "Super_Admin", ""] {
        let token = token_with_claims(role, 0, 3600);
        let response = send(&app, Method::GET, "/api/course", Some(&token), None).await;
        assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "UNKNOWN_ROLE");
    }
}

#[tokio::test]
async fn test_authentication_runs_before_authorization() {
    let (app, _) = setup_test_app();
    let token = token_with_claims("STUDENT", -7200, -3600);

    // A student would get 403 here; the expired token must win.
    let response = send(
        &app,
        Method::POST,
        "/api/content/create-content",
        Some(&token),
        Some(content_body()),
    )
    .await;

    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "EXPIRED_TOKEN");
}

#[tokio::test]
async fn test_roles_are_not_ranked() {
    let (app, state) = setup_test_app();
    let super_admin = token_for(Role::SuperAdmin);
    let admin = token_for(Role::Admin);

    let response = send(
        &app,
        Method::POST,
        "/api/content/create-content",
        Some(&super_admin),
        Some(content_body()),
    )
    .await;
    assert_error_envelope(&response, StatusCode::FORBIDDEN, "ROLE_NOT_PERMITTED");
    assert!(state.store.contents.is_empty().await);

    let response = send(
        &app,
        Method::PATCH,
        "/api/user/user/role",
        Some(&admin),
        Some(json!({ "userId": uuid::Uuid::new_v4(), "role": "ADMIN" })),
    )
    .await;
    assert_error_envelope(&response, StatusCode::FORBIDDEN, "ROLE_NOT_PERMITTED");
}

#[tokio::test]
async fn test_any_role_may_list_courses() {
    let (app, _) = setup_test_app();

    for role in Role::ALL {
        let token = token_for(role);
        let response = send(&app, Method::GET, "/api/course", Some(&token), None).await;
        assert_eq!(response.status, StatusCode::OK, "{role}");
        assert_eq!(response.body["success"], true);
    }
}

#[tokio::test]
async fn test_status_claim_does_not_affect_gates() {
    let (app, state) = setup_test_app();
    let now = chrono::Utc::now().timestamp();

    for status in ["SUSPENDED", "DELETED", "PENDING", "BANNED", "active"] {
        let token = sign_claims(
            &Claims {
                sub: uuid::Uuid::new_v4().to_string(),
                role: "INSTRUCTOR".to_string(),
                status: Some(status.to_string()),
                iat: now,
                exp: now + 3600,
            },
            &common::jwt_config(),
        )
        .unwrap();

        let response = send(
            &app,
            Method::POST,
            "/api/content/create-content",
            Some(&token),
            Some(content_body()),
        )
        .await;
        assert_eq!(response.status, StatusCode::CREATED, "{status}: {}", response.body);
    }

    assert_eq!(state.store.contents.len().await, 5);
}

#[tokio::test]
async fn test_same_request_same_outcome() {
    let (app, _) = setup_test_app();
    let student = token_for(Role::Student);
    let instructor = token_for(Role::Instructor);

    for _ in 0..3 {
        let denied = send(&app, Method::PATCH, "/api/content/00000000-0000-0000-0000-000000000000", Some(&student), Some(json!({}))).await;
        assert_error_envelope(&denied, StatusCode::FORBIDDEN, "ROLE_NOT_PERMITTED");

        let missing = send(&app, Method::PATCH, "/api/content/00000000-0000-0000-0000-000000000000", Some(&instructor), Some(json!({}))).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_concurrent_requests_do_not_share_identity() {
    let (app, _) = setup_test_app();

    let mut handles = Vec::new();
    for i in 0..32 {
        let app = app.clone();
        let role = if i % 2 == 0 { Role::Admin } else { Role::Student };
        handles.push(tokio::spawn(async move {
            let token = token_for(role);
            let response = send(&app, Method::GET, "/api/user", Some(&token), None).await;
            (role, response.status)
        }));
    }

    for handle in handles {
        let (role, status) = handle.await.unwrap();
        let expected = match role {
            Role::Admin => StatusCode::OK,
            _ => StatusCode::FORBIDDEN,
        };
        assert_eq!(status, expected, "{role}");
    }
}

#[tokio::test]
async fn test_unmatched_route_is_enveloped_404() {
    let (app, _) = setup_test_app();
    let token = token_for(Role::Admin);

    let response = send(&app, Method::GET, "/api/nope", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["statusCode"], 404);
}

#[tokio::test]
async fn test_wrong_method_is_enveloped_405() {
    let (app, _) = setup_test_app();
    let token = token_for(Role::Admin);

    let response = send(&app, Method::DELETE, "/api/course", Some(&token), None).await;

    assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.body["success"], false);
}

#[tokio::test]
async fn test_every_response_carries_request_id() {
    let (app, _) = setup_test_app();

    let rejected = send(&app, Method::GET, "/api/course", None, None).await;
    let accepted = send(&app, Method::GET, "/api/course", Some(&token_for(Role::Student)), None).await;

    let first = rejected.headers.get(REQUEST_ID_HEADER).unwrap();
    let second = accepted.headers.get(REQUEST_ID_HEADER).unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_padded_bearer_token_is_malformed() {
    let (app, _) = setup_test_app();
    let padded = format!("  {}", token_for(Role::Admin));

    let response = send(&app, Method::GET, "/api/course", Some(&padded), None).await;

    assert_error_envelope(&response, StatusCode::UNAUTHORIZED, "MALFORMED_TOKEN");
}
