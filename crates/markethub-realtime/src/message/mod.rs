//! WebSocket wire message definitions.

pub mod types;

pub use types::{InboundMessage, OutboundMessage};
