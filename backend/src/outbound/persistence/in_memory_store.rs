//! Process-local store implementing both repository ports.
//!
//! Records live in insertion-ordered vectors behind `RwLock`s. Guards are
//! dropped before any `.await`, and the username check-and-insert happens
//! under a single write guard so concurrent registrations cannot both win.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{
    ExercisePersistenceError, ExerciseRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Exercise, ExerciseLogQuery, User, UserId, Username};

/// In-memory users and exercises.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<User>>,
    exercises: RwLock<Vec<Exercise>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn user_lock_error<T>(_: PoisonError<T>) -> UserPersistenceError {
    UserPersistenceError::query("user store lock poisoned")
}

fn exercise_lock_error<T>(_: PoisonError<T>) -> ExercisePersistenceError {
    ExercisePersistenceError::query("exercise store lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().map_err(user_lock_error)?;
        if users
            .iter()
            .any(|existing| existing.username() == user.username())
        {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.users.read().map_err(user_lock_error)?.clone())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(user_lock_error)?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().map_err(user_lock_error)?;
        Ok(users
            .iter()
            .find(|user| user.username() == username)
            .cloned())
    }

    async fn delete_all(&self) -> Result<u64, UserPersistenceError> {
        let mut users = self.users.write().map_err(user_lock_error)?;
        let removed = users.len() as u64;
        users.clear();
        Ok(removed)
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryStore {
    async fn create(&self, exercise: &Exercise) -> Result<(), ExercisePersistenceError> {
        self.exercises
            .write()
            .map_err(exercise_lock_error)?
            .push(exercise.clone());
        Ok(())
    }

    async fn find(
        &self,
        query: &ExerciseLogQuery,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError> {
        let exercises = self.exercises.read().map_err(exercise_lock_error)?;
        let matching = exercises.iter().filter(|exercise| query.matches(exercise));
        Ok(match query.limit() {
            Some(limit) => matching.take(limit.get()).cloned().collect(),
            None => matching.cloned().collect(),
        })
    }

    async fn delete_all(&self) -> Result<u64, ExercisePersistenceError> {
        let mut exercises = self.exercises.write().map_err(exercise_lock_error)?;
        let removed = exercises.len() as u64;
        exercises.clear();
        Ok(removed)
    }
}
