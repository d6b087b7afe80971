//! Reaction domain entities.

pub mod model;

pub use model::{ProductReaction, ReactionKind, ReviewReaction};
