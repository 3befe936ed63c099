//! Failure taxonomy of the authentication and authorization gates.

use axum::http::StatusCode;
use learnhub_core::AppError;
use tracing::error;

/// Why a request was rejected before reaching its handler.
///
/// Messages are safe to show to clients: they never contain the raw token,
/// the signing key, or decoder internals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication token is missing")]
    MissingToken,

    #[error("Authentication token is malformed")]
    MalformedToken,

    #[error("Authentication token signature is invalid")]
    InvalidSignature,

    #[error("Authentication token has expired")]
    ExpiredToken,

    #[error("Authentication token is not valid yet")]
    TokenNotYetValid,

    #[error("Authentication token carries an unknown role")]
    UnknownRole,

    #[error("You do not have permission to access this resource")]
    RoleNotPermitted,

    /// A programming defect in how gates were wired, never a client fault.
    #[error("authorization misconfigured: {0}")]
    Configuration(String),
}

impl AuthError {
    /// Stable machine readable code, rendered as `errors.code`.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "MISSING_TOKEN",
            AuthError::MalformedToken => "MALFORMED_TOKEN",
            AuthError::InvalidSignature => "INVALID_SIGNATURE",
            AuthError::ExpiredToken => "EXPIRED_TOKEN",
            AuthError::TokenNotYetValid => "TOKEN_NOT_YET_VALID",
            AuthError::UnknownRole => "UNKNOWN_ROLE",
            AuthError::RoleNotPermitted => "ROLE_NOT_PERMITTED",
            AuthError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::RoleNotPermitted => StatusCode::FORBIDDEN,
            AuthError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn is_authentication_failure(&self) -> bool {
        self.status() == StatusCode::UNAUTHORIZED
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Configuration(ref detail) => {
                error!(code = err.code(), detail = %detail, "Authorization gate misconfigured");
                AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
                    .with_code(err.code())
            }
            _ => AppError::new(err.status(), err.to_string()).with_code(err.code()),
        }
    }
}
