//! # markethub-auth
//!
//! JWT token issuance and verification for MarketHub. Full credential
//! management (passwords, registration) belongs to the user-administration
//! collaborator; this crate covers only the token boundary the API and
//! WebSocket handshake need.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
