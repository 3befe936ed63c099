use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

/// Work factor used when none is configured.
pub const DEFAULT_PASSWORD_COST: u32 = DEFAULT_COST;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash_password_with_cost(password, DEFAULT_PASSWORD_COST)
}

/// Hashes with an explicit bcrypt cost (4..=31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(AppError::internal)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash).map_err(AppError::internal)
}
