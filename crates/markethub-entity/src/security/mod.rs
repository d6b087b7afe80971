//! Security detection log entities.

pub mod model;

pub use model::SecurityEvent;
