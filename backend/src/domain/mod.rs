//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed entities for users and their exercises,
//! the ports store adapters implement, and the services inbound adapters
//! drive. Types stay immutable once constructed and document their
//! invariants in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Exercise and their validated components.
//! - ExerciseLogQuery and `build_log_query`: explicit log filters.
//! - UserRegistryService / ExerciseLogService: driving port implementations.

pub mod error;
pub mod exercise;
pub mod exercise_log_service;
pub mod log_query;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_registry_service;
pub mod validation;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::exercise::{
    Description, DurationMinutes, Exercise, ExerciseDate, ExerciseDraft, ExerciseId,
    ExerciseValidationError, LOG_DATE_FORMAT,
};
pub use self::exercise_log_service::ExerciseLogService;
pub use self::log_query::{ExerciseLogQuery, LogQueryParams, build_log_query, parse_limit};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{User, UserId, UserValidationError, Username};
pub use self::user_registry_service::UserRegistryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::not_found("user does not exist"))
/// }
/// # assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
