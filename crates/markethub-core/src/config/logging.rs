//! Log output configuration.

use serde::{Deserialize, Serialize};

/// How much to log and in which shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `"info"` or `"markethub=debug,info"`.
    #[serde(default = "level_default")]
    pub level: String,
    /// `"pretty"` for humans, `"json"` for shippers.
    #[serde(default = "format_default")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: level_default(),
            format: format_default(),
        }
    }
}

fn level_default() -> String {
    "info".to_string()
}

fn format_default() -> String {
    "pretty".to_string()
}
