//! Bearer token verification settings.
//!
//! # Environment Variables
//!
//! - `JWT_SECRET`: HMAC secret used to verify token signatures (required)
//! - `JWT_LEEWAY_SECONDS`: Clock skew tolerated on `iat`/`exp` (default: 0)
//! - `JWT_ACCESS_EXPIRY`: Lifetime of development tokens minted by the CLI (default: 3600)

use std::env;

use crate::ConfigError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    pub leeway_seconds: u64,
    pub access_token_expiry: i64,
}

impl JwtConfig {
    /// Loads the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `JWT_SECRET` is unset or blank,
    /// and [`ConfigError::Invalid`] when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env::var("JWT_SECRET").unwrap_or_default();
        let config = Self {
            secret,
            leeway_seconds: parse_var("JWT_LEEWAY_SECONDS", 0)?,
            access_token_expiry: parse_var("JWT_ACCESS_EXPIRY", 3600)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.trim().is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }
        if self.access_token_expiry <= 0 {
            return Err(ConfigError::Invalid {
                name: "JWT_ACCESS_EXPIRY",
                reason: "must be a positive number of seconds".to_string(),
            });
        }
        Ok(())
    }
}

pub(crate) fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                name,
                reason: e.to_string(),
            })
        }
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            leeway_seconds: 0,
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_validate_accepts_secret() {
        assert!(config("a-long-enough-secret").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_secret() {
        assert!(matches!(
            config("   ").validate(),
            Err(ConfigError::Missing("JWT_SECRET"))
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_expiry() {
        let mut config = config("secret");
        config.access_token_expiry = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { name: "JWT_ACCESS_EXPIRY", .. })
        ));
    }
}
