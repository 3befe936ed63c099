//! # LearnHub Auth
//!
//! Bearer token verification and principal types for the LearnHub API.
//!
//! This crate provides:
//!
//! - [`principal`]: [`Role`], [`UserStatus`], [`Principal`] and [`PermittedRoleSet`]
//! - [`claims`]: JWT claim structure
//! - [`jwt`]: [`TokenVerifier`], the principal resolver
//! - [`error`]: [`AuthError`], the gate failure taxonomy
//!
//! Nothing here knows about HTTP routing: the gates that wire these pieces
//! into the request pipeline live in the application crate.
//!
//! # Example
//!
//! ```ignore
//! use learnhub_auth::TokenVerifier;
//! use learnhub_config::JwtConfig;
//!
//! let verifier = TokenVerifier::new(&JwtConfig::from_env()?)?;
//! let principal = verifier.resolve(token)?;
//! println!("{} is a {}", principal.id(), principal.role());
//! ```

pub mod claims;
pub mod error;
pub mod jwt;
pub mod principal;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use error::AuthError;
pub use jwt::{TokenVerifier, create_access_token, sign_claims};
pub use principal::{PermittedRoleSet, Principal, Role, UserStatus};
