use std::sync::Arc;

use learnhub_auth::{AuthError, TokenVerifier};
use learnhub_config::{CorsConfig, JwtConfig};
use learnhub_core::DEFAULT_PASSWORD_COST;

use crate::store::Store;

#[derive(Clone, Debug)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub store: Store,
    pub password_cost: u32,
}

impl AppState {
    /// Builds the state, failing if the verification key is unusable.
    pub fn new(jwt_config: JwtConfig, cors_config: CorsConfig) -> Result<Self, AuthError> {
        let verifier = TokenVerifier::new(&jwt_config)?;
        Ok(Self {
            verifier: Arc::new(verifier),
            jwt_config,
            cors_config,
            store: Store::new(),
            password_cost: DEFAULT_PASSWORD_COST,
        })
    }

    /// Overrides the bcrypt cost used for new password hashes.
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }
}
