//! Route protection table.
//!
//! Every protected endpoint is declared once in [`ROUTES`] with the roles
//! allowed to call it. At startup [`RouteTable::from_declarations`] turns each
//! declaration into its own [`RoleGate`], and [`RouteBinder`] attaches the
//! handler and gate to the router. Declarations are configuration: they are
//! never changed while the server runs.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use axum::{
    Router,
    handler::Handler,
    middleware,
    routing::{MethodFilter, on},
};
use learnhub_auth::{AuthError, Role};

use crate::middleware::role::{RoleGate, require_roles};
use crate::state::AppState;

pub const CONTENT_CREATE: &str = "content.create";
pub const CONTENT_BY_MODULE: &str = "content.by_module";
pub const CONTENT_GET: &str = "content.get";
pub const CONTENT_UPDATE: &str = "content.update";
pub const CONTENT_DELETE: &str = "content.delete";
pub const COURSE_CREATE: &str = "course.create";
pub const COURSE_LIST: &str = "course.list";
pub const USER_ME: &str = "user.me";
pub const USER_LIST: &str = "user.list";
pub const USER_CREATE: &str = "user.create";
pub const USER_UPDATE: &str = "user.update";
pub const USER_STATUS: &str = "user.status";
pub const USER_CREATE_INSTRUCTOR: &str = "user.create_instructor";
pub const USER_CREATE_ADMIN: &str = "user.create_admin";
pub const USER_CHANGE_ROLE: &str = "user.change_role";

const EVERYONE: &[Role] = &Role::ALL;
const STAFF: &[Role] = &[Role::Instructor, Role::Admin, Role::SuperAdmin];
const ADMINS: &[Role] = &[Role::Admin, Role::SuperAdmin];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl RouteMethod {
    fn filter(self) -> MethodFilter {
        match self {
            RouteMethod::Get => MethodFilter::GET,
            RouteMethod::Post => MethodFilter::POST,
            RouteMethod::Patch => MethodFilter::PATCH,
            RouteMethod::Delete => MethodFilter::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
            RouteMethod::Patch => "PATCH",
            RouteMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDeclaration {
    pub id: &'static str,
    pub method: RouteMethod,
    pub path: &'static str,
    pub roles: &'static [Role],
}

const fn declare(
    id: &'static str,
    method: RouteMethod,
    path: &'static str,
    roles: &'static [Role],
) -> RouteDeclaration {
    RouteDeclaration {
        id,
        method,
        path,
        roles,
    }
}

/// Protected endpoints of the API.
pub const ROUTES: &[RouteDeclaration] = &[
    declare(CONTENT_CREATE, RouteMethod::Post, "/api/content/create-content", &[Role::Instructor]),
    declare(CONTENT_BY_MODULE, RouteMethod::Get, "/api/content/moduleId/{id}", EVERYONE),
    declare(CONTENT_GET, RouteMethod::Get, "/api/content/{id}", EVERYONE),
    declare(CONTENT_UPDATE, RouteMethod::Patch, "/api/content/{id}", STAFF),
    declare(CONTENT_DELETE, RouteMethod::Delete, "/api/content/delete-content/{id}", &[Role::Instructor]),
    declare(COURSE_CREATE, RouteMethod::Post, "/api/course", STAFF),
    declare(COURSE_LIST, RouteMethod::Get, "/api/course", EVERYONE),
    declare(USER_ME, RouteMethod::Get, "/api/user/me", EVERYONE),
    declare(USER_LIST, RouteMethod::Get, "/api/user", ADMINS),
    declare(USER_CREATE, RouteMethod::Post, "/api/user/create", ADMINS),
    declare(USER_UPDATE, RouteMethod::Patch, "/api/user/update/{id}", ADMINS),
    declare(USER_STATUS, RouteMethod::Patch, "/api/user/{id}/status", ADMINS),
    declare(USER_CREATE_INSTRUCTOR, RouteMethod::Post, "/api/user/instructor/create", ADMINS),
    declare(USER_CREATE_ADMIN, RouteMethod::Post, "/api/user/admin/create", &[Role::SuperAdmin]),
    declare(USER_CHANGE_ROLE, RouteMethod::Patch, "/api/user/user/role", &[Role::SuperAdmin]),
];

#[derive(Debug, Clone)]
pub struct ProtectedRoute {
    pub declaration: RouteDeclaration,
    pub gate: Arc<RoleGate>,
}

/// Route id → gate, built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<ProtectedRoute>,
}

impl RouteTable {
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] for an empty role list, a repeated
    /// route id, or the same method and path declared twice.
    pub fn from_declarations(declarations: &[RouteDeclaration]) -> Result<Self, AuthError> {
        let mut ids = HashSet::new();
        let mut endpoints = HashSet::new();
        let mut routes = Vec::with_capacity(declarations.len());

        for declaration in declarations {
            if !ids.insert(declaration.id) {
                return Err(AuthError::Configuration(format!(
                    "route {} is declared twice",
                    declaration.id
                )));
            }
            if !endpoints.insert((declaration.method, declaration.path)) {
                return Err(AuthError::Configuration(format!(
                    "{} {} is declared twice",
                    declaration.method, declaration.path
                )));
            }

            let gate = RoleGate::new(declaration.id, declaration.roles.iter().copied())?;
            routes.push(ProtectedRoute {
                declaration: *declaration,
                gate: Arc::new(gate),
            });
        }

        Ok(Self { routes })
    }

    /// The table for [`ROUTES`].
    pub fn standard() -> Result<Self, AuthError> {
        Self::from_declarations(ROUTES)
    }

    pub fn get(&self, id: &str) -> Option<&ProtectedRoute> {
        self.routes.iter().find(|route| route.declaration.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProtectedRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Attaches handlers to declared routes, each behind its own gate.
pub struct RouteBinder<'a> {
    table: &'a RouteTable,
    router: Router<AppState>,
    bound: HashSet<&'static str>,
}

impl<'a> RouteBinder<'a> {
    pub fn new(table: &'a RouteTable) -> Self {
        Self {
            table,
            router: Router::new(),
            bound: HashSet::new(),
        }
    }

    /// Binds `handler` to the route declared under `id`.
    pub fn bind<H, T>(mut self, id: &str, handler: H) -> Result<Self, AuthError>
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        let route = self.table.get(id).ok_or_else(|| {
            AuthError::Configuration(format!("route {id} is not declared in the route table"))
        })?;

        if !self.bound.insert(route.declaration.id) {
            return Err(AuthError::Configuration(format!(
                "route {id} is bound twice"
            )));
        }

        let method_router = on(route.declaration.method.filter(), handler).route_layer(
            middleware::from_fn_with_state(route.gate.clone(), require_roles),
        );
        self.router = self.router.route(route.declaration.path, method_router);

        Ok(self)
    }

    /// Returns the router once every declared route has a handler.
    pub fn finish(self) -> Result<Router<AppState>, AuthError> {
        let unbound: Vec<&str> = self
            .table
            .iter()
            .map(|route| route.declaration.id)
            .filter(|id| !self.bound.contains(id))
            .collect();

        if !unbound.is_empty() {
            return Err(AuthError::Configuration(format!(
                "routes without a handler: {}",
                unbound.join(", ")
            )));
        }

        Ok(self.router)
    }
}
