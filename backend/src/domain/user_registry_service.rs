//! User registration service implementing the [`UserRegistry`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{RegisterUserRequest, UserRegistry, UserRepository};
use crate::domain::validation::{map_user_store_error, require_unique, require_username};
use crate::domain::{Error, User, UserId};

/// Registers users against a [`UserRepository`].
pub struct UserRegistryService<R: ?Sized> {
    users: Arc<R>,
}

impl<R: ?Sized> UserRegistryService<R> {
    /// Create a new service backed by `users`.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R: ?Sized> Clone for UserRegistryService<R> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
        }
    }
}

#[async_trait]
impl<R> UserRegistry for UserRegistryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn register_user(&self, request: RegisterUserRequest) -> Result<User, Error> {
        let username = require_username(request.username.as_deref())?;
        require_unique(&username, self.users.as_ref()).await?;

        let user = User::new(UserId::random(), username);
        self.users
            .create(&user)
            .await
            .map_err(map_user_store_error)?;

        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users.list().await.map_err(map_user_store_error)
    }
}
