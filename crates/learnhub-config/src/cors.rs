//! Browser origins allowed to call the API.
//!
//! - `ALLOWED_ORIGINS`: Comma-separated origins
//!   (default: `http://localhost:3000,http://localhost:5173`)

use std::env;

use crate::ConfigError;

const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("ALLOWED_ORIGINS") {
            Ok(raw) if !raw.trim().is_empty() => Self::parse(&raw),
            _ => Self::parse(DEFAULT_ORIGINS),
        }
    }

    /// Splits a comma-separated origin list. Blank entries are skipped;
    /// anything that is not an `http://` or `https://` origin is rejected.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let allowed_origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        if let Some(origin) = allowed_origins.iter().find(|origin| !is_origin(origin)) {
            return Err(ConfigError::Invalid {
                name: "ALLOWED_ORIGINS",
                reason: format!("{origin:?} is not an http(s) origin"),
            });
        }
        if allowed_origins.is_empty() {
            return Err(ConfigError::Invalid {
                name: "ALLOWED_ORIGINS",
                reason: "no origins listed".to_string(),
            });
        }

        Ok(Self { allowed_origins })
    }
}

fn is_origin(value: &str) -> bool {
    let Some(host) = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
    else {
        return false;
    };

    !host.is_empty() && !host.contains(['/', ' ', '\t'])
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}
