//! Driving port for registering and listing users.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User};

/// Request to register a new user.
///
/// `username` stays raw so the domain decides what counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
}

/// Use-case port for the users collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistry: Send + Sync {
    /// Validate and persist a new user.
    async fn register_user(&self, request: RegisterUserRequest) -> Result<User, Error>;

    /// All registered users in store order.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
