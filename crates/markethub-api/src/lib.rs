//! # markethub-api
//!
//! Thin HTTP/WebSocket adapters over the MarketHub service layer. Handlers
//! validate input, build a request context from the JWT, call one service
//! method, and map the result (or `AppError`) onto an HTTP response.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
