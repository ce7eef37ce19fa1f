//! Interval-completion notifications.
//!
//! The timer engine calls out through the `Notifier` trait exactly once
//! per completed interval. Delivery must never block or fail the state
//! transition, so implementations swallow platform errors.

use notify_rust::Notification;

pub trait Notifier {
    fn notify(&self, title: &str, body: &str);
}

/// Sends a desktop notification through the platform notification daemon.
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        // A missing notification daemon must not interrupt the timer.
        let _ = Notification::new()
            .appname("dorofy")
            .summary(title)
            .body(body)
            .show();
    }
}

/// Discards notifications. Used under test and when the user disables
/// desktop notifications.
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _title: &str, _body: &str) {}
}
