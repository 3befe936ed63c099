//! JWT claim structure for bearer tokens.

use serde::{Deserialize, Serialize};

/// Claims embedded in a bearer token.
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `role`: Role name, parsed strictly into [`crate::Role`] after verification
/// - `status`: Account status as sent by the issuer; any value is accepted
/// - `iat`: Issued-at timestamp (Unix seconds)
/// - `exp`: Expiration timestamp (Unix seconds)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub iat: i64,
    pub exp: i64,
}
