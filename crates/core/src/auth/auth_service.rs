use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};

use super::auth_model::{Credentials, Session};
use super::auth_traits::AuthServiceTrait;
use crate::errors::{AuthError, Result};
use crate::notifications::{Notification, NotificationSink};
use crate::utils::time_utils;

/// Login service that simulates a round-trip before answering.
///
/// With configured credentials only that pair is accepted; without, any
/// non-empty username and password pass.
pub struct MockAuthService {
    credentials: Option<Credentials>,
    delay: Duration,
    notifications: Arc<dyn NotificationSink>,
}

impl MockAuthService {
    pub fn new(
        credentials: Option<Credentials>,
        delay: Duration,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            credentials,
            delay,
            notifications,
        }
    }

    fn check(&self, username: &str, password: &str) -> std::result::Result<(), AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        match &self.credentials {
            Some(expected) if expected.username != username.trim() || expected.password != password => {
                Err(AuthError::InvalidCredentials)
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl AuthServiceTrait for MockAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        tokio::time::sleep(self.delay).await;

        match self.check(username, password) {
            Ok(()) => {
                let username = username.trim().to_string();
                info!("User '{}' logged in", username);
                self.notifications.notify(Notification::success(
                    "Login successful",
                    "You are now connected to Online Banking.",
                ));
                Ok(Session {
                    username,
                    logged_in_at: time_utils::now_utc(),
                })
            }
            Err(e) => {
                warn!("Login refused for '{}': {}", username.trim(), e);
                self.notifications
                    .notify(Notification::error("Login failed", e.to_string()));
                Err(e.into())
            }
        }
    }
}
