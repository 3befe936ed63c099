//! # LearnHub Core
//!
//! Core types, errors, and response envelopes for the LearnHub API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`response`]: The success and error envelopes every endpoint returns
//! - [`errors`]: Application error type rendered through the error envelope
//! - [`pagination`]: Page-based pagination for list endpoints
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use learnhub_core::{ApiResponse, AppError};
//!
//! async fn handler() -> Result<ApiResponse<Course>, AppError> {
//!     let course = load_course().ok_or_else(|| AppError::not_found("Course not found"))?;
//!     Ok(ApiResponse::ok("Course retrieved successfully", course))
//! }
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod response;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{Paginated, PaginationMeta, PaginationParams, SortOrder};
pub use password::{DEFAULT_PASSWORD_COST, hash_password, hash_password_with_cost, verify_password};
pub use response::{ApiResponse, ErrorEnvelope, render, render_error};
