//! Role-based authorization gate.
//!
//! A [`RoleGate`] is built once per route from the route table and shared by
//! every request to that route. It admits a request only when the
//! authentication gate already attached a principal whose role is in the
//! route's [`PermittedRoleSet`].
//!
//! ```rust,ignore
//! let gate = Arc::new(RoleGate::new("content.create", [Role::Instructor])?);
//! let method_router = post(create_content)
//!     .route_layer(middleware::from_fn_with_state(gate, require_roles));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use learnhub_auth::{AuthError, PermittedRoleSet, Role};
use learnhub_core::AppError;
use tracing::warn;
use uuid::Uuid;

use crate::middleware::context::{AuthorizedUser, RequestContext, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleGate {
    route: &'static str,
    permitted: PermittedRoleSet,
}

impl RoleGate {
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if `roles` is empty.
    pub fn new<I>(route: &'static str, roles: I) -> Result<Self, AuthError>
    where
        I: IntoIterator<Item = Role>,
    {
        let permitted = PermittedRoleSet::new(roles).map_err(|_| {
            AuthError::Configuration(format!("route {route} has an empty permitted role set"))
        })?;
        Ok(Self { route, permitted })
    }

    pub fn route(&self) -> &'static str {
        self.route
    }

    pub fn permitted(&self) -> &PermittedRoleSet {
        &self.permitted
    }

    /// Decides whether the request described by `ctx` may proceed.
    ///
    /// Never looks at the principal's status.
    pub fn check(&self, ctx: &RequestContext) -> Result<AuthorizedUser, AuthError> {
        let principal = ctx.principal().ok_or_else(|| {
            AuthError::Configuration(format!(
                "authorization gate for {} ran before authentication",
                self.route
            ))
        })?;

        if !self.permitted.contains(principal.role()) {
            return Err(AuthError::RoleNotPermitted);
        }

        Ok(AuthorizedUser {
            request_id: ctx.request_id(),
            principal: principal.clone(),
        })
    }
}

/// Middleware running [`RoleGate::check`] for one route.
pub async fn require_roles(
    State(gate): State<Arc<RoleGate>>,
    mut req: Request,
    next: Next,
) -> Response {
    let ctx = match req.extensions().get::<RequestContext>() {
        Some(ctx) => ctx.clone(),
        None => {
            let request_id = req
                .extensions()
                .get::<RequestId>()
                .map(|id| id.0)
                .unwrap_or_else(Uuid::new_v4);
            RequestContext::new(request_id)
        }
    };

    match gate.check(&ctx) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => {
            if matches!(err, AuthError::RoleNotPermitted) {
                warn!(
                    request_id = %ctx.request_id(),
                    route = gate.route(),
                    role = ?ctx.principal().map(|p| p.role()),
                    permitted = %gate.permitted(),
                    "Authorization rejected"
                );
            }
            AppError::from(err).into_response()
        }
    }
}
