//! Token verification configuration.

use serde::{Deserialize, Serialize};

/// JWT settings shared by the REST extractor and the WS handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens.
    pub jwt_secret: String,
    /// Access token lifetime in minutes.
    #[serde(default = "access_ttl_default")]
    pub access_token_ttl_minutes: u64,
}

fn access_ttl_default() -> u64 {
    60
}
