//! Application configuration, loaded from the environment.
//!
//! Variables use the `PES_BUDDY_` prefix with `__` between sections, e.g.
//! `PES_BUDDY_SERVER__PORT=8080`, `PES_BUDDY_DATABASE__URL=postgres://..`,
//! `PES_BUDDY_AUTH__JWT_SECRET=..`. A `.env` file is honored in development.

mod auth;
mod database;
mod error;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use server::ServerConfig;

use config::{Config, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the environment on top of defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("PES_BUDDY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.validate()?;
        Ok(app)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}
