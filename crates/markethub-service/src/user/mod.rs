//! User administration operations owned by the notification core.

pub mod admin;

pub use admin::AdminUserService;
