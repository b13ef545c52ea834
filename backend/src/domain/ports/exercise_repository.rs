//! Port for exercise persistence and log reads.

use async_trait::async_trait;

use crate::domain::{Exercise, ExerciseLogQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised by exercise repository adapters.
    pub enum ExercisePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "exercise repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "exercise repository query failed: {message}",
    }
}

/// Driven port for the exercises collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Persist a new exercise.
    async fn create(&self, exercise: &Exercise) -> Result<(), ExercisePersistenceError>;

    /// Exercises matching `query`, in insertion order, capped by its limit.
    async fn find(
        &self,
        query: &ExerciseLogQuery,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError>;

    /// Remove every exercise, returning how many were deleted.
    async fn delete_all(&self) -> Result<u64, ExercisePersistenceError>;
}
