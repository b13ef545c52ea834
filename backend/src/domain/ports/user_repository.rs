//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The store's unique constraint on username rejected an insert.
        DuplicateUsername { username: String } => "username {username} is already registered",
    }
}

/// Driven port for the users collection.
///
/// Implementations must enforce username uniqueness atomically inside
/// [`UserRepository::create`]; callers may check first, but the insert is the
/// real guard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, failing with
    /// [`UserPersistenceError::DuplicateUsername`] when the name is taken.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Every user in insertion order.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove every user, returning how many were deleted.
    async fn delete_all(&self) -> Result<u64, UserPersistenceError>;
}
