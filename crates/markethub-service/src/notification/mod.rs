//! Notification store, dispatch, and live-push seam.

pub mod dispatcher;
pub mod format;
pub mod push;
pub mod service;

pub use dispatcher::{EventDispatcher, NotificationEvent};
pub use push::LivePush;
pub use service::NotificationService;
