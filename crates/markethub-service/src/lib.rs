//! # markethub-service
//!
//! Business logic service layer for MarketHub. Each service orchestrates
//! repositories, cache, and the live-push transport to implement
//! application-level use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. The realtime crate implements
//! the [`notification::push::LivePush`] trait defined here, which is how the
//! notification/realtime dependency cycle is broken: the dispatcher only
//! ever sees the trait handle, wired up after both sides exist.

pub mod context;
pub mod moderation;
pub mod notification;
pub mod social;
pub mod user;

pub use context::RequestContext;
pub use moderation::ModerationService;
pub use notification::{EventDispatcher, LivePush, NotificationService};
pub use social::{ReactionService, ReviewService, SaveService};
pub use user::AdminUserService;
