//! Notification sink trait and implementations.

use std::sync::{Arc, Mutex, PoisonError};

use log::{info, warn};

use super::Notification;

/// Trait for receiving user-facing notifications.
///
/// - `notify()` must be fast and non-blocking
/// - Failure to deliver must not affect the operation that produced it
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// No-op implementation for contexts that don't show notifications.
#[derive(Clone, Default)]
pub struct NoOpNotificationSink;

impl NotificationSink for NoOpNotificationSink {
    fn notify(&self, _notification: Notification) {}
}

/// Writes notifications to the log.
#[derive(Clone, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn notify(&self, notification: Notification) {
        if notification.is_error() {
            warn!("{}: {}", notification.title, notification.description);
        } else {
            info!("{}: {}", notification.title, notification.description);
        }
    }
}

/// Collects notifications, for tests and front ends that render them later.
#[derive(Clone, Default)]
pub struct MemoryNotificationSink {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected notifications.
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Removes and returns the collected notifications.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl NotificationSink for MemoryNotificationSink {
    fn notify(&self, notification: Notification) {
        self.lock().push(notification);
    }
}
