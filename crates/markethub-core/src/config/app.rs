//! HTTP listener configuration.

use serde::{Deserialize, Serialize};

/// Where the server listens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "host_default")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "port_default")]
    pub port: u16,
    /// Origins allowed by CORS; empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// The `host:port` pair handed to the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: host_default(),
            port: port_default(),
            cors_origins: Vec::new(),
        }
    }
}

fn host_default() -> String {
    "0.0.0.0".to_string()
}

fn port_default() -> u16 {
    8080
}
