//! Core traits defined in `markethub-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
