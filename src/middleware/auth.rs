//! Authentication gate.
//!
//! Reads `Authorization: Bearer <token>`, resolves the token into a
//! [`learnhub_auth::Principal`] and attaches a fresh [`RequestContext`] to the
//! request. Rejections never reach a handler and are rendered as 401 error
//! envelopes.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use learnhub_auth::{AuthError, TokenVerifier};
use learnhub_core::AppError;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::middleware::context::{RequestContext, RequestId};

const BEARER_PREFIX: &str = "Bearer ";

/// Extracts the raw token from the authorization header.
///
/// The token is everything after `Bearer `, untrimmed. A missing header, a
/// non-ASCII header, a scheme other than `Bearer ` and an empty token all
/// count as a missing token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

/// Authenticates one request and returns its context.
///
/// Resolver failures are returned unchanged.
pub fn authenticate(
    headers: &HeaderMap,
    request_id: Uuid,
    verifier: &TokenVerifier,
) -> Result<RequestContext, AuthError> {
    let token = bearer_token(headers)?;
    let principal = verifier.resolve(token)?;
    Ok(RequestContext::authenticated(request_id, principal))
}

/// Middleware running [`authenticate`] in front of every protected route.
pub async fn require_auth(
    State(verifier): State<Arc<TokenVerifier>>,
    mut req: Request,
    next: Next,
) -> Response {
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0)
        .unwrap_or_else(Uuid::new_v4);

    match authenticate(req.headers(), request_id, &verifier) {
        Ok(ctx) => {
            if let Some(principal) = ctx.principal() {
                debug!(
                    request_id = %request_id,
                    user_id = %principal.id(),
                    role = %principal.role(),
                    "Request authenticated"
                );
            }
            req.extensions_mut().insert(ctx);
            next.run(req).await
        }
        Err(err) => {
            warn!(
                request_id = %request_id,
                path = %req.uri().path(),
                code = err.code(),
                "Authentication rejected"
            );
            AppError::from(err).into_response()
        }
    }
}
