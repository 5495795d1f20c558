//! Authentication settings.

use serde::Deserialize;

use super::error::ConfigError;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 secret; must match the token issuer's.
    pub jwt_secret: String,
}

impl AuthConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::Invalid("auth jwt_secret cannot be empty".into()));
        }
        if self.jwt_secret.len() < 16 {
            return Err(ConfigError::Invalid(
                "auth jwt_secret must be at least 16 bytes".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
        }
    }
}
