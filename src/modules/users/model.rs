//! User data models and DTOs.
//!
//! # Core Types
//!
//! - [`UserRecord`] - Stored user, including the password hash
//! - [`User`] - What the API returns; never carries the hash
//!
//! # Request DTOs
//!
//! - [`CreateUserDto`] - Create a student, instructor or admin
//! - [`UpdateUserDto`] - Update name and email
//! - [`ChangeStatusDto`] - Activate, suspend or soft-delete an account
//! - [`ChangeRoleDto`] - Move a user to another role
//! - [`UserFilterParams`] - Query parameters for listing users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use learnhub_auth::{Role, UserStatus};
use learnhub_core::PaginationParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a user.
///
/// The role is chosen by the endpoint, not the caller.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "password must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUserDto {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangeStatusDto {
    pub status: UserStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleDto {
    pub user_id: Uuid,
    pub role: Role,
}

/// Filters and options for `GET /api/user`.
///
/// `sortBy` accepts `name`, `email` or `createdAt`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilterParams {
    /// Exact email match (case-insensitive)
    pub email: Option<String>,
    /// Substring of name or email (case-insensitive)
    pub search_term: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}
