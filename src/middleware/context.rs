//! Per-request carriers.
//!
//! A [`RequestContext`] is created by the authentication gate for every
//! request and stored in that request's own extensions, so it is dropped with
//! the request and can never be observed by another one. The authorization
//! gate turns it into an [`AuthorizedUser`], which is the only way a handler
//! can get hold of the caller's identity.

use axum::{extract::FromRequestParts, http::request::Parts};
use learnhub_auth::{AuthError, Principal};
use learnhub_core::AppError;
use uuid::Uuid;

/// Request id assigned by the logging middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: Uuid,
    principal: Option<Principal>,
}

impl RequestContext {
    /// Context of a request that has not been authenticated.
    pub fn new(request_id: Uuid) -> Self {
        Self {
            request_id,
            principal: None,
        }
    }

    pub fn authenticated(request_id: Uuid, principal: Principal) -> Self {
        Self {
            request_id,
            principal: Some(principal),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }
}

/// Identity of a caller that passed both gates for the current route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedUser {
    pub request_id: Uuid,
    pub principal: Principal,
}

impl AuthorizedUser {
    pub fn id(&self) -> &str {
        self.principal.id()
    }
}

impl<S> FromRequestParts<S> for AuthorizedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthorizedUser>().cloned().ok_or_else(|| {
            AuthError::Configuration(format!(
                "handler for {} reached without an authorization gate",
                parts.uri.path()
            ))
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use learnhub_auth::{Role, UserStatus};

    #[test]
    fn test_new_context_is_unauthenticated() {
        let ctx = RequestContext::new(Uuid::new_v4());
        assert!(!ctx.is_authenticated());
        assert!(ctx.principal().is_none());
    }

    #[test]
    fn test_authenticated_context_carries_principal() {
        let request_id = Uuid::new_v4();
        let principal = Principal::new("user-1", Role::Student, UserStatus::Active);
        let ctx = RequestContext::authenticated(request_id, principal.clone());

        assert!(ctx.is_authenticated());
        assert_eq!(ctx.principal(), Some(&principal));
        assert_eq!(ctx.request_id(), request_id);
    }

    #[tokio::test]
    async fn test_authorized_user_missing_is_configuration_error() {
        let (mut parts, _) = Request::builder()
            .uri("/api/course")
            .body(())
            .unwrap()
            .into_parts();

        let err = AuthorizedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_authorized_user_extracted_from_extensions() {
        let user = AuthorizedUser {
            request_id: Uuid::new_v4(),
            principal: Principal::new("user-2", Role::Admin, UserStatus::Active),
        };
        let (mut parts, _) = Request::builder()
            .uri("/api/user")
            .extension(user.clone())
            .body(())
            .unwrap()
            .into_parts();

        let extracted = AuthorizedUser::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(extracted, user);
        assert_eq!(extracted.id(), "user-2");
    }
}
