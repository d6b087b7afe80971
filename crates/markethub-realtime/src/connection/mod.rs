//! WebSocket connection lifecycle: handles, pool, manager, handshake.

pub mod authenticator;
pub mod handle;
pub mod manager;
pub mod pool;

pub use handle::{ConnectionHandle, ConnectionId};
pub use manager::ConnectionManager;
pub use pool::ConnectionPool;
