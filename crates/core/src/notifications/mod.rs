//! User-facing notifications.
//!
//! Services report human-readable outcomes ("transfer executed", "login
//! failed") through the sink trait. Front ends implement the sink to show
//! them as toasts, log lines, or anything else.

mod notification;
mod sink;

pub use notification::*;
pub use sink::*;
