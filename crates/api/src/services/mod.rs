//! Notification dispatch and match lifecycle services.

pub mod dispatch;
pub mod matching;
pub mod sms;

#[allow(unused_imports)] // Used in routes
pub use dispatch::{DispatchError, NotificationDispatcher};
#[allow(unused_imports)] // Used in routes
pub use matching::MatchLifecycle;
pub use sms::HttpSmsGateway;
