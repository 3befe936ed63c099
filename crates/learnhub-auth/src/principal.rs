//! The authenticated identity carried by a request.
//!
//! - [`Role`]: closed set of platform roles
//! - [`UserStatus`]: account status as asserted by the token
//! - [`Principal`]: identity produced by verifying a bearer token
//! - [`PermittedRoleSet`]: non-empty set of roles allowed on one route

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AuthError;

/// Platform role.
///
/// Roles are not ranked: `SUPER_ADMIN` is not implicitly allowed wherever
/// `ADMIN` is. A route that should accept several roles lists all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Instructor,
    Admin,
    SuperAdmin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Instructor, Role::Admin, Role::SuperAdmin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Instructor => "INSTRUCTOR",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive parse of the role claim.
impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or(AuthError::UnknownRole)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Suspended,
    Deleted,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [UserStatus::Active, UserStatus::Suspended, UserStatus::Deleted];

    /// Reads the `status` claim of a token, ignoring case.
    ///
    /// Returns `None` for values this service does not model.
    pub fn from_claim(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.to_string().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Suspended => "SUSPENDED",
            UserStatus::Deleted => "DELETED",
        };
        f.write_str(s)
    }
}

/// Identity extracted from a verified bearer token.
///
/// Lives for exactly one request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Principal {
    id: String,
    role: Role,
    status: Option<UserStatus>,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: Role, status: UserStatus) -> Self {
        Self::with_claimed_status(id, role, Some(status))
    }

    /// `status` is `None` when the token carried a status value that is not
    /// a known [`UserStatus`].
    pub fn with_claimed_status(
        id: impl Into<String>,
        role: Role,
        status: Option<UserStatus>,
    ) -> Self {
        Self {
            id: id.into(),
            role,
            status,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn status(&self) -> Option<UserStatus> {
        self.status
    }
}

/// Roles allowed to invoke one route.
///
/// Built once when the route is registered. Can never be empty: an empty set
/// is rejected as a configuration error instead of silently denying everyone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermittedRoleSet(BTreeSet<Role>);

impl PermittedRoleSet {
    pub fn new<I>(roles: I) -> Result<Self, AuthError>
    where
        I: IntoIterator<Item = Role>,
    {
        let roles: BTreeSet<Role> = roles.into_iter().collect();
        if roles.is_empty() {
            return Err(AuthError::Configuration(
                "permitted role set must not be empty".to_string(),
            ));
        }
        Ok(Self(roles))
    }

    /// Every role; for routes that only require authentication.
    pub fn any_authenticated() -> Self {
        Self(Role::ALL.into_iter().collect())
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PermittedRoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Role::as_str).collect();
        f.write_str(&names.join(", "))
    }
}
