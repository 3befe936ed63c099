//! Bearer token verification.
//!
//! [`TokenVerifier::resolve`] turns the raw value of an `Authorization: Bearer`
//! header into a [`Principal`]. Checks run in a fixed order so that every
//! failure has exactly one classification:
//!
//! 1. structure: three base64url segments, header and payload are JSON objects
//! 2. signature: configured algorithm, non-empty and authentic signature
//! 3. claims: `sub`, `role`, `iat`, `exp` present and well typed
//! 4. time: `iat <= now < exp`, widened only by the configured leeway
//! 5. role: exact match against [`Role`]
//!
//! The verifier holds nothing but the decoding key, so the same token checked
//! at the same instant always yields the same outcome.
//!
//! [`create_access_token`] and [`sign_claims`] mint tokens for local
//! development and tests; production tokens come from the identity provider.

use std::collections::HashSet;
use std::fmt;

use chrono::Utc;
use data_encoding::BASE64URL_NOPAD;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Map, Value};

use learnhub_config::JwtConfig;
use learnhub_core::AppError;

use crate::claims::Claims;
use crate::error::AuthError;
use crate::principal::{Principal, Role, UserStatus};

const ALGORITHM: Algorithm = Algorithm::HS256;
const ALGORITHM_NAME: &str = "HS256";

/// Verifies bearer tokens against the configured secret.
///
/// Built once at startup and shared read-only between requests.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
    leeway: i64,
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &ALGORITHM)
            .field("leeway", &self.leeway)
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if the secret is blank.
    pub fn new(jwt_config: &JwtConfig) -> Result<Self, AuthError> {
        if jwt_config.secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "token verification secret is empty".to_string(),
            ));
        }

        // Temporal checks are done by hand so that `exp` is exclusive and
        // `iat` is enforced.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.required_spec_claims = HashSet::new();
        validation.leeway = 0;

        Ok(Self {
            key: DecodingKey::from_secret(jwt_config.secret.as_bytes()),
            validation,
            leeway: i64::try_from(jwt_config.leeway_seconds).unwrap_or(i64::MAX),
        })
    }

    /// Verifies `token` against the current time.
    pub fn resolve(&self, token: &str) -> Result<Principal, AuthError> {
        self.resolve_at(token, Utc::now().timestamp())
    }

    /// Verifies `token` as of `now` (Unix seconds).
    pub fn resolve_at(&self, token: &str, now: i64) -> Result<Principal, AuthError> {
        check_structure(token)?;

        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(classify)?;

        if claims.sub.trim().is_empty() {
            return Err(AuthError::MalformedToken);
        }
        if now >= claims.exp.saturating_add(self.leeway) {
            return Err(AuthError::ExpiredToken);
        }
        if claims.iat > now.saturating_add(self.leeway) {
            return Err(AuthError::TokenNotYetValid);
        }

        let role: Role = claims.role.parse()?;

        // Absent means active; unknown values are carried as `None` and never rejected.
        let status = match claims.status.as_deref() {
            None => Some(UserStatus::Active),
            Some(value) => UserStatus::from_claim(value),
        };

        Ok(Principal::with_claimed_status(claims.sub, role, status))
    }
}

fn check_structure(token: &str) -> Result<(), AuthError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::MalformedToken);
    };

    let header = decode_json_object(header)?;
    decode_json_object(payload)?;

    if signature.is_empty() {
        return Err(AuthError::InvalidSignature);
    }

    match header.get("alg").and_then(Value::as_str) {
        Some(ALGORITHM_NAME) => Ok(()),
        Some(_) => Err(AuthError::InvalidSignature),
        None => Err(AuthError::MalformedToken),
    }
}

fn decode_json_object(segment: &str) -> Result<Map<String, Value>, AuthError> {
    let bytes = BASE64URL_NOPAD
        .decode(segment.as_bytes())
        .map_err(|_| AuthError::MalformedToken)?;

    match serde_json::from_slice(&bytes) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AuthError::MalformedToken),
    }
}

/// Header and payload are already known to be well formed, so a decoding
/// failure here is either about the signature or about claim types.
fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::Base64(_) => AuthError::InvalidSignature,
        _ => AuthError::MalformedToken,
    }
}

/// Signs arbitrary claims with the configured secret.
pub fn sign_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::new(ALGORITHM),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(AppError::internal)
}

/// Creates a token valid from now for `access_token_expiry` seconds.
pub fn create_access_token(
    user_id: &str,
    role: Role,
    status: UserStatus,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        status: Some(status.to_string()),
        iat: now,
        exp: now + jwt_config.access_token_expiry,
    };

    sign_claims(&claims, jwt_config)
}
