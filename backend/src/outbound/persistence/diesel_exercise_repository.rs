//! PostgreSQL-backed `ExerciseRepository` using Diesel.
//!
//! Log reads translate an [`ExerciseLogQuery`] into a boxed query so the
//! optional bounds and limit are only emitted when present.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ExercisePersistenceError, ExerciseRepository};
use crate::domain::{
    Description, DurationMinutes, Exercise, ExerciseDate, ExerciseDraft, ExerciseId,
    ExerciseLogQuery, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ExerciseRow, NewExerciseRow};
use super::pool::{DbPool, PoolError};
use super::schema::exercises;

/// Diesel implementation of the exercise repository port.
#[derive(Clone)]
pub struct DieselExerciseRepository {
    pool: DbPool,
}

impl DieselExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ExercisePersistenceError {
    map_basic_pool_error(error, ExercisePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ExercisePersistenceError {
    map_basic_diesel_error(
        error,
        ExercisePersistenceError::query,
        ExercisePersistenceError::connection,
    )
}

fn row_to_exercise(row: ExerciseRow) -> Result<Exercise, ExercisePersistenceError> {
    let ExerciseRow {
        id,
        user_id,
        description,
        duration_minutes,
        performed_on,
    } = row;
    let invalid = |err: crate::domain::ExerciseValidationError| {
        ExercisePersistenceError::query(format!("stored exercise {id} is invalid: {err}"))
    };

    Ok(Exercise::new(ExerciseDraft {
        id: ExerciseId::from_uuid(id),
        user_id: UserId::from_uuid(user_id),
        description: Description::new(description).map_err(invalid)?,
        duration: DurationMinutes::new(duration_minutes).map_err(invalid)?,
        date: ExerciseDate::new(performed_on),
    }))
}

#[async_trait]
impl ExerciseRepository for DieselExerciseRepository {
    async fn create(&self, exercise: &Exercise) -> Result<(), ExercisePersistenceError> {
        let row = NewExerciseRow {
            id: *exercise.id().as_uuid(),
            user_id: *exercise.user_id().as_uuid(),
            description: exercise.description().as_ref(),
            duration_minutes: exercise.duration().get(),
            performed_on: exercise.date().as_naive(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(exercises::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find(
        &self,
        query: &ExerciseLogQuery,
    ) -> Result<Vec<Exercise>, ExercisePersistenceError> {
        let mut statement = exercises::table
            .filter(exercises::user_id.eq(*query.user_id().as_uuid()))
            .select(ExerciseRow::as_select())
            .order(exercises::seq.asc())
            .into_boxed();
        if let Some(from) = query.from() {
            statement = statement.filter(exercises::performed_on.ge(from.as_naive()));
        }
        if let Some(to) = query.to() {
            statement = statement.filter(exercises::performed_on.le(to.as_naive()));
        }
        if let Some(limit) = query.limit() {
            statement = statement.limit(i64::try_from(limit.get()).unwrap_or(i64::MAX));
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ExerciseRow> = statement
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_exercise).collect()
    }

    async fn delete_all(&self) -> Result<u64, ExercisePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(exercises::table)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted as u64)
    }
}
