//! # markethub-realtime
//!
//! Real-time WebSocket engine for MarketHub. Provides:
//!
//! - Per-user connection tracking (the presence registry); multiple
//!   connections per user are normal, and a push to a user with none is a
//!   silent no-op
//! - Pub/sub room broadcasts for product/review state updates
//! - Live notification delivery: implements the service layer's `LivePush`
//!   trait, addressing users while the pool fans out per connection
//! - JWT-authenticated handshake that refuses banned accounts

pub mod channel;
pub mod connection;
pub mod message;

pub use channel::registry::ChannelRegistry;
pub use connection::authenticator::WsAuthenticator;
pub use connection::manager::ConnectionManager;
pub use connection::pool::ConnectionPool;
