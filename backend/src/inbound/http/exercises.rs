//! Exercise logging and log retrieval handlers.
//!
//! ```text
//! POST /api/users/{id}/exercises {"description":"run","duration":30,"date":"2023-05-10"}
//! GET /api/users/{id}/logs?from=2023-01-01&to=2023-12-31&limit=10
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ExerciseLogReport, FetchLogRequest, LogExerciseRequest, LoggedExercise};
use crate::domain::{DurationMinutes, Exercise, LogQueryParams};
use crate::inbound::http::ApiResult;
use crate::inbound::http::body::RequestBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Duration as sent by clients: a JSON number or a numeric string.
///
/// Numbers are handed to validation as text so negative values are reported
/// as invalid durations instead of the body failing to parse.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum DurationInput {
    Number(f64),
    Text(String),
}

impl DurationInput {
    fn into_text(self) -> String {
        match self {
            Self::Number(minutes) => minutes.to_string(),
            Self::Text(raw) => raw,
        }
    }
}

/// Body for `POST /api/users/{id}/exercises`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LogExerciseBody {
    #[serde(default)]
    #[schema(example = "5k run")]
    pub description: Option<String>,
    /// Positive minutes; fractions are kept.
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 30)]
    pub duration: Option<DurationInput>,
    /// Calendar day; defaults to today (UTC).
    #[serde(default)]
    #[schema(example = "2023-05-10")]
    pub date: Option<String>,
}

/// Response for a newly logged exercise. `id` is the owning user's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExerciseCreatedResponse {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "5k run")]
    pub description: String,
    #[schema(value_type = f64, example = 30)]
    pub duration: DurationMinutes,
    #[schema(example = "Wed May 10 2023")]
    pub date: String,
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
}

impl From<&LoggedExercise> for ExerciseCreatedResponse {
    fn from(logged: &LoggedExercise) -> Self {
        let LoggedExercise { user, exercise } = logged;
        Self {
            username: user.username().to_string(),
            description: exercise.description().as_ref().to_owned(),
            duration: exercise.duration(),
            date: exercise.date().to_string(),
            id: user.id().to_string(),
        }
    }
}

/// One entry of a user's log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogEntryResponse {
    pub description: String,
    #[schema(value_type = f64, example = 12.5)]
    pub duration: DurationMinutes,
    #[schema(example = "Wed May 10 2023")]
    pub date: String,
}

impl From<&Exercise> for LogEntryResponse {
    fn from(exercise: &Exercise) -> Self {
        Self {
            description: exercise.description().as_ref().to_owned(),
            duration: exercise.duration(),
            date: exercise.date().to_string(),
        }
    }
}

/// A user's filtered exercise log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LogResponse {
    pub username: String,
    /// Number of entries in `log`.
    pub count: usize,
    pub id: String,
    pub log: Vec<LogEntryResponse>,
}

impl From<&ExerciseLogReport> for LogResponse {
    fn from(report: &ExerciseLogReport) -> Self {
        Self {
            username: report.user.username().to_string(),
            count: report.count(),
            id: report.user.id().to_string(),
            log: report.entries.iter().map(LogEntryResponse::from).collect(),
        }
    }
}

/// Query string for `GET /api/users/{id}/logs`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LogQuery {
    /// Inclusive lower bound, e.g. `2023-01-01`.
    pub from: Option<String>,
    /// Inclusive upper bound.
    pub to: Option<String>,
    /// Maximum entries; zero, negative or non-numeric means no cap.
    pub limit: Option<String>,
}

impl From<LogQuery> for LogQueryParams {
    fn from(query: LogQuery) -> Self {
        Self {
            from: query.from,
            to: query.to,
            limit: query.limit,
        }
    }
}

/// Log an exercise against an existing user.
#[utoipa::path(
    post,
    path = "/api/users/{id}/exercises",
    params(("id" = String, Path, description = "User identifier")),
    request_body(
        content(
            (LogExerciseBody = "application/json"),
            (LogExerciseBody = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 201, description = "Exercise logged", body = ExerciseCreatedResponse),
        (status = 400, description = "Missing fields or invalid values", body = ErrorSchema),
        (status = 404, description = "User does not exist", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "logExercise"
)]
#[post("/users/{id}/exercises")]
pub async fn log_exercise(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: RequestBody<LogExerciseBody>,
) -> ApiResult<HttpResponse> {
    let LogExerciseBody {
        description,
        duration,
        date,
    } = body.into_inner();
    let logged = state
        .exercises
        .log_exercise(LogExerciseRequest {
            user_id: path.into_inner(),
            description,
            duration: duration.map(DurationInput::into_text),
            date,
        })
        .await?;
    Ok(HttpResponse::Created().json(ExerciseCreatedResponse::from(&logged)))
}

/// Read a user's exercise log, optionally bounded and capped.
#[utoipa::path(
    get,
    path = "/api/users/{id}/logs",
    params(("id" = String, Path, description = "User identifier"), LogQuery),
    responses(
        (status = 200, description = "Exercise log", body = LogResponse),
        (status = 400, description = "Invalid date bound", body = ErrorSchema),
        (status = 404, description = "User does not exist", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["exercises"],
    operation_id = "getExerciseLog"
)]
#[get("/users/{id}/logs")]
pub async fn get_exercise_log(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<LogQuery>,
) -> ApiResult<web::Json<LogResponse>> {
    let report = state
        .exercises
        .fetch_log(FetchLogRequest {
            user_id: path.into_inner(),
            params: query.into_inner().into(),
        })
        .await?;
    Ok(web::Json(LogResponse::from(&report)))
}

#[cfg(test)]
#[path = "exercises_tests.rs"]
mod tests;
