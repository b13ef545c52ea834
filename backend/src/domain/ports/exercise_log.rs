//! Driving port for logging exercises and reading a user's history.
//!
//! Inbound adapters hand over raw request values; validation, user lookup
//! and query construction happen behind the port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Exercise, LogQueryParams, User};

/// Request to log an exercise against `user_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogExerciseRequest {
    pub user_id: String,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

/// Persisted exercise together with its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedExercise {
    pub user: User,
    pub exercise: Exercise,
}

/// Request for a user's exercise history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchLogRequest {
    pub user_id: String,
    pub params: LogQueryParams,
}

/// A user's filtered exercise history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLogReport {
    pub user: User,
    pub entries: Vec<Exercise>,
}

impl ExerciseLogReport {
    /// Number of entries returned, after filtering and the limit.
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

/// Use-case port for exercise logging.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExerciseLog: Send + Sync {
    /// Validate and persist an exercise for an existing user.
    async fn log_exercise(&self, request: LogExerciseRequest) -> Result<LoggedExercise, Error>;

    /// Read the user's exercises filtered by the request parameters.
    async fn fetch_log(&self, request: FetchLogRequest) -> Result<ExerciseLogReport, Error>;
}
