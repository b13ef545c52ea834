//! Exercise logging service implementing the [`ExerciseLog`] driving port.
//!
//! Writes run the checks in a fixed order: required fields, then the owning
//! user, then the optional date. Reads resolve the user before the filter is
//! built so an unknown user wins over a malformed bound.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{error, info};

use crate::domain::log_query::build_log_query;
use crate::domain::ports::{
    ExerciseLog, ExerciseLogReport, ExercisePersistenceError, ExerciseRepository, FetchLogRequest,
    LogExerciseRequest, LoggedExercise, UserRepository,
};
use crate::domain::validation::{require_description_and_duration, require_user_exists};
use crate::domain::{Error, Exercise, ExerciseDate, ExerciseDraft, ExerciseId};

fn map_exercise_store_error(error: ExercisePersistenceError) -> Error {
    error!(error = %error, "exercise store failure");
    Error::internal(format!("exercise store error: {error}"))
}

/// Exercise log service over user and exercise repositories.
pub struct ExerciseLogService<U: ?Sized, E: ?Sized> {
    users: Arc<U>,
    exercises: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<U: ?Sized, E: ?Sized> ExerciseLogService<U, E> {
    /// Create a new service; `clock` supplies the default exercise date.
    ///
    /// # Examples
    /// ```
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use exercise_tracker::domain::ExerciseLogService;
    /// # use exercise_tracker::outbound::persistence::InMemoryStore;
    /// let store = Arc::new(InMemoryStore::default());
    /// let _service = ExerciseLogService::new(store.clone(), store, Arc::new(DefaultClock));
    /// ```
    pub fn new(users: Arc<U>, exercises: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            exercises,
            clock,
        }
    }

    fn resolve_date(&self, raw: Option<&str>) -> Result<ExerciseDate, Error> {
        match raw.filter(|value| !value.trim().is_empty()) {
            Some(value) => ExerciseDate::parse(value).map_err(|err| {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": "date",
                    "value": value,
                    "code": "invalid_date",
                }))
            }),
            None => Ok(ExerciseDate::new(self.clock.utc().date_naive())),
        }
    }
}

impl<U: ?Sized, E: ?Sized> Clone for ExerciseLogService<U, E> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            exercises: Arc::clone(&self.exercises),
            clock: Arc::clone(&self.clock),
        }
    }
}

#[async_trait]
impl<U, E> ExerciseLog for ExerciseLogService<U, E>
where
    U: UserRepository + ?Sized,
    E: ExerciseRepository + ?Sized,
{
    async fn log_exercise(&self, request: LogExerciseRequest) -> Result<LoggedExercise, Error> {
        let (description, duration) = require_description_and_duration(
            request.description.as_deref(),
            request.duration.as_deref(),
        )?;
        let user = require_user_exists(&request.user_id, self.users.as_ref()).await?;
        let date = self.resolve_date(request.date.as_deref())?;

        let exercise = Exercise::new(ExerciseDraft {
            id: ExerciseId::random(),
            user_id: *user.id(),
            description,
            duration,
            date,
        });
        self.exercises
            .create(&exercise)
            .await
            .map_err(map_exercise_store_error)?;

        info!(
            user_id = %user.id(),
            exercise_id = %exercise.id(),
            date = %exercise.date(),
            "exercise logged"
        );
        Ok(LoggedExercise { user, exercise })
    }

    async fn fetch_log(&self, request: FetchLogRequest) -> Result<ExerciseLogReport, Error> {
        let user = require_user_exists(&request.user_id, self.users.as_ref()).await?;
        let query = build_log_query(*user.id(), &request.params)?;
        let entries = self
            .exercises
            .find(&query)
            .await
            .map_err(map_exercise_store_error)?;
        Ok(ExerciseLogReport { user, entries })
    }
}

#[cfg(test)]
#[path = "exercise_log_service_tests.rs"]
mod tests;
