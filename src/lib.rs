//! # LearnHub API
//!
//! REST API for a learning platform built with Rust and Axum. Every endpoint
//! is protected by a bearer JWT and restricted to a declared set of roles.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Authentication and authorization gates, request context
//! ├── modules/          # Feature modules
//! │   ├── content/     # Learning content per course module
//! │   ├── course/      # Course catalogue
//! │   └── users/       # Users, roles and account status
//! ├── routes.rs         # Route protection table
//! ├── store.rs          # In-memory persistence
//! └── validator.rs      # Envelope-aware extractors
//! ```
//!
//! Each feature module follows the same structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers
//! - `service.rs`: Business logic
//! - `model.rs`: Data models and DTOs
//! - `router.rs`: Binds handlers to entries of the route table
//!
//! ## Request pipeline
//!
//! ```text
//! logging → CORS → authentication gate → authorization gate → handler
//! ```
//!
//! The authentication gate turns `Authorization: Bearer <token>` into a
//! principal (401 on any failure). The authorization gate checks the
//! principal's role against the route's permitted roles (403 on mismatch).
//! Both rejections, and every handler result, are rendered through the
//! envelopes in [`learnhub_core::response`].
//!
//! ## Roles
//!
//! | Role | Typical use |
//! |------|-------------|
//! | `STUDENT` | Reads courses and content |
//! | `INSTRUCTOR` | Authors content and courses |
//! | `ADMIN` | Manages users |
//! | `SUPER_ADMIN` | Manages admins and roles |
//!
//! Roles are not ranked. A route that accepts `ADMIN` does not implicitly
//! accept `SUPER_ADMIN`; the route table lists both where both apply.
//!
//! ## Environment Variables
//!
//! ```bash
//! JWT_SECRET=your-secure-secret-key
//! JWT_LEEWAY_SECONDS=0
//! JWT_ACCESS_EXPIRY=3600
//! ALLOWED_ORIGINS=http://localhost:5173
//! HOST=0.0.0.0
//! PORT=3000
//! LOG_FORMAT=json
//! LOG_DIR=storage/logs
//! ```

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod routes;
pub mod state;
pub mod store;
pub mod validator;

// Re-export workspace crates for convenience
pub use learnhub_auth;
pub use learnhub_config;
pub use learnhub_core;
