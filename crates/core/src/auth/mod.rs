//! Auth module - login collaborator.

mod auth_model;
mod auth_service;
mod auth_traits;

pub use auth_model::{Credentials, Session};
pub use auth_service::MockAuthService;
pub use auth_traits::AuthServiceTrait;
