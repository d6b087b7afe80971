//! # markethub-worker
//!
//! Scheduled maintenance for MarketHub. Two fire-and-forget daily jobs run
//! independently of any request path:
//!
//! - purging security detection events older than the rolling retention
//!   window
//! - cleaning up old notifications and trimming per-user overflow

pub mod scheduler;

pub use scheduler::MaintenanceScheduler;
