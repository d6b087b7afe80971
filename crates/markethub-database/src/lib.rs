//! # markethub-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all MarketHub entities.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
