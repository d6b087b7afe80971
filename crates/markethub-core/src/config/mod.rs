//! Configuration schemas.
//!
//! Settings come from three layers, later ones winning: `config/default.toml`,
//! an environment overlay (`config/{env}.toml`), and `MARKETHUB__`-prefixed
//! environment variables. Every section lives in its own submodule and
//! deserializes independently, so a deployment only overrides what it cares
//! about.

pub mod app;
pub mod auth;
pub mod cache;
pub mod database;
pub mod logging;
pub mod moderation;
pub mod realtime;
pub mod worker;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub use self::app::ServerConfig;
pub use self::auth::AuthConfig;
pub use self::cache::CacheConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::moderation::ModerationConfig;
pub use self::realtime::RealtimeConfig;
pub use self::worker::WorkerConfig;

/// Everything the server needs to start, fully merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    pub server: ServerConfig,
    /// PostgreSQL pool.
    pub database: DatabaseConfig,
    /// Cache backend selection.
    pub cache: CacheConfig,
    /// JWT verification.
    pub auth: AuthConfig,
    /// WebSocket engine limits.
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// Escalation thresholds.
    #[serde(default)]
    pub moderation: ModerationConfig,
    /// Maintenance job retention windows.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Log level and format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Merges the configuration layers for the named environment.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let merged = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                Environment::with_prefix("MARKETHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("cannot assemble configuration: {e}")))?;

        merged
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("configuration is invalid: {e}")))
    }
}
