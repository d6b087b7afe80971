//! Product save (bookmark) entities.

pub mod model;

pub use model::ProductSave;
