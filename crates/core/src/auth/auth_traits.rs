use async_trait::async_trait;

use super::auth_model::Session;
use crate::errors::Result;

/// Checks login credentials.
///
/// The dashboard never compares credentials itself; it asks this service.
#[async_trait]
pub trait AuthServiceTrait: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Session>;
}
