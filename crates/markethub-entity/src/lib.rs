//! # markethub-entity
//!
//! Domain entity models for MarketHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod notification;
pub mod product;
pub mod reaction;
pub mod review;
pub mod save;
pub mod security;
pub mod user;
