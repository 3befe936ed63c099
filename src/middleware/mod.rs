//! Request gates and per-request context.
//!
//! # Modules
//!
//! - [`context`]: [`context::RequestContext`] and [`context::AuthorizedUser`]
//! - [`auth`]: Authentication gate (bearer token → principal)
//! - [`role`]: Authorization gate factory (principal role ∈ permitted roles)
//!
//! # Request Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. [`auth::require_auth`] verifies the token and attaches a `RequestContext`
//! 3. [`role::require_roles`] checks the route's permitted roles and attaches an `AuthorizedUser`
//! 4. The handler extracts `AuthorizedUser` and runs
//!
//! Any rejection in steps 2 or 3 is rendered as an error envelope and the
//! handler never runs.

pub mod auth;
pub mod context;
pub mod role;

pub use context::{AuthorizedUser, RequestContext, RequestId};
pub use role::RoleGate;
