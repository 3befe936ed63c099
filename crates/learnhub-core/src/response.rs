//! Uniform response envelopes.
//!
//! Every response leaving the API has one of two shapes, and clients can rely
//! on `success` as the only discriminator between them:
//!
//! ```json
//! { "statusCode": 201, "success": true, "message": "Content created successfully", "data": { ... } }
//! { "statusCode": 403, "success": false, "message": "Access denied", "errors": { "code": "ROLE_NOT_PERMITTED" } }
//! ```
//!
//! [`render`] and [`render_error`] are the only two constructors the rest of
//! the codebase should reach for. [`crate::AppError`] renders through
//! [`render_error`].

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Success envelope wrapping a handler result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// HTTP status code, repeated in the body
    pub status_code: u16,
    /// Always `true` for this envelope
    pub success: bool,
    /// Human readable summary of the outcome
    pub message: String,
    /// Payload, omitted when the operation returns nothing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Failure envelope for gate rejections and handler errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// HTTP status code, repeated in the body
    pub status_code: u16,
    /// Always `false` for this envelope
    pub success: bool,
    /// Client safe description of the failure
    pub message: String,
    /// Optional structured details (error code, field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<Value>,
}

/// Builds a success envelope.
///
/// `success` mirrors the status class, so a non-2xx status can never be
/// reported as a success.
pub fn render<T>(status: StatusCode, message: impl Into<String>, data: Option<T>) -> ApiResponse<T> {
    ApiResponse {
        status_code: status.as_u16(),
        success: status.is_success(),
        message: message.into(),
        data,
    }
}

/// Builds a failure envelope.
pub fn render_error(
    status: StatusCode,
    message: impl Into<String>,
    details: Option<Value>,
) -> ErrorEnvelope {
    ErrorEnvelope {
        status_code: status.as_u16(),
        success: false,
        message: message.into(),
        errors: details,
    }
}

impl<T> ApiResponse<T> {
    /// 200 OK with data.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        render(StatusCode::OK, message, Some(data))
    }

    /// 201 Created with data.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        render(StatusCode::CREATED, message, Some(data))
    }

    /// The status this envelope will be sent with.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK)
    }
}

impl ErrorEnvelope {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
