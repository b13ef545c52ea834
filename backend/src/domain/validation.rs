//! Request validation shared by the domain services.
//!
//! Each check either yields the validated value or a domain [`Error`] whose
//! code tells the inbound adapter how to respond: `InvalidRequest` for bad
//! input and `NotFound` when a referenced user does not resolve. Checks never
//! write to the store.

use serde_json::json;
use tracing::error;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Description, DurationMinutes, Error, User, UserId, Username};

pub const USERNAME_MANDATORY: &str = "username is mandatory";
pub const USERNAME_TAKEN: &str = "username already registered";
pub const FIELDS_MANDATORY: &str = "all fields are mandatory";
pub const USER_NOT_FOUND: &str = "user does not exist";

/// Machine-readable reasons attached to validation error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReasonCode {
    MissingField,
    DuplicateUsername,
    InvalidDuration,
    UnknownUser,
}

impl ReasonCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::DuplicateUsername => "duplicate_username",
            Self::InvalidDuration => "invalid_duration",
            Self::UnknownUser => "unknown_user",
        }
    }
}

fn field_details(field: &str, code: ReasonCode) -> serde_json::Value {
    json!({ "field": field, "code": code.as_str() })
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

/// Error returned when `username` is already taken.
pub fn username_taken_error() -> Error {
    Error::invalid_request(USERNAME_TAKEN)
        .with_details(field_details("username", ReasonCode::DuplicateUsername))
}

/// Translate user store failures into domain errors.
///
/// Unique violations surface as the same validation error as the pre-check;
/// anything else is an internal failure.
pub fn map_user_store_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateUsername { .. } => username_taken_error(),
        other => {
            error!(error = %other, "user store failure");
            Error::internal(format!("user store error: {other}"))
        }
    }
}

/// Require a non-blank username.
pub fn require_username(input: Option<&str>) -> Result<Username, Error> {
    present(input)
        .and_then(|raw| Username::new(raw).ok())
        .ok_or_else(|| {
            Error::invalid_request(USERNAME_MANDATORY)
                .with_details(field_details("username", ReasonCode::MissingField))
        })
}

/// Reject a username some user already holds.
pub async fn require_unique<R>(username: &Username, users: &R) -> Result<(), Error>
where
    R: UserRepository + ?Sized,
{
    match users
        .find_by_username(username)
        .await
        .map_err(map_user_store_error)?
    {
        Some(_) => Err(username_taken_error()),
        None => Ok(()),
    }
}

/// Require both description and duration, then validate the duration.
pub fn require_description_and_duration(
    description: Option<&str>,
    duration: Option<&str>,
) -> Result<(Description, DurationMinutes), Error> {
    let missing = |field: &str| {
        Error::invalid_request(FIELDS_MANDATORY)
            .with_details(field_details(field, ReasonCode::MissingField))
    };
    let description = present(description).ok_or_else(|| missing("description"))?;
    let duration = present(duration).ok_or_else(|| missing("duration"))?;

    let description = Description::new(description).map_err(|_| missing("description"))?;
    let duration = DurationMinutes::parse(duration).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(field_details("duration", ReasonCode::InvalidDuration))
    })?;
    Ok((description, duration))
}

/// Resolve `id` to a stored user.
///
/// An identifier that is not a UUID cannot name a user, so it yields the same
/// `NotFound` error as an unknown one.
pub async fn require_user_exists<R>(id: &str, users: &R) -> Result<User, Error>
where
    R: UserRepository + ?Sized,
{
    let not_found = || {
        Error::not_found(USER_NOT_FOUND).with_details(field_details("id", ReasonCode::UnknownUser))
    };
    let Ok(user_id) = UserId::new(id) else {
        return Err(not_found());
    };
    users
        .find_by_id(&user_id)
        .await
        .map_err(map_user_store_error)?
        .ok_or_else(not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use rstest::rstest;

    const ADA_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    fn ada() -> User {
        User::try_from_strings(ADA_ID, "ada").expect("fixture user")
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("   "))]
    fn require_username_rejects_missing(#[case] input: Option<&str>) {
        let err = require_username(input).expect_err("username required");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), USERNAME_MANDATORY);
    }

    #[rstest]
    fn require_username_trims() {
        let username = require_username(Some(" ada ")).expect("valid username");
        assert_eq!(username.as_ref(), "ada");
    }

    #[rstest]
    #[tokio::test]
    async fn require_unique_rejects_existing_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(Some(ada())));

        let username = Username::new("ada").expect("username");
        let err = require_unique(&username, &users)
            .await
            .expect_err("duplicate rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), USERNAME_TAKEN);
    }

    #[rstest]
    #[tokio::test]
    async fn require_unique_accepts_fresh_username() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_username()
            .times(1)
            .return_once(|_| Ok(None));

        let username = Username::new("grace").expect("username");
        require_unique(&username, &users)
            .await
            .expect("fresh username accepted");
    }

    #[rstest]
    #[case(None, Some("30"))]
    #[case(Some("run"), None)]
    #[case(Some(""), Some("30"))]
    #[case(Some("run"), Some("  "))]
    fn missing_exercise_fields_are_rejected(
        #[case] description: Option<&str>,
        #[case] duration: Option<&str>,
    ) {
        let err = require_description_and_duration(description, duration)
            .expect_err("fields required");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), FIELDS_MANDATORY);
    }

    #[rstest]
    #[case("0")]
    #[case("-3")]
    #[case("soon")]
    fn invalid_duration_is_rejected(#[case] duration: &str) {
        let err = require_description_and_duration(Some("run"), Some(duration))
            .expect_err("duration rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(
            err.message(),
            "duration must be a positive number of minutes"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_user_id_is_not_found_without_store_lookup() {
        let users = MockUserRepository::new();
        let err = require_user_exists("not-a-uuid", &users)
            .await
            .expect_err("unknown user");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), USER_NOT_FOUND);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failure_during_lookup_is_internal() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Err(UserPersistenceError::connection("refused")));

        let err = require_user_exists(ADA_ID, &users)
            .await
            .expect_err("store failure");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    fn duplicate_store_error_maps_to_validation_error() {
        let err = map_user_store_error(UserPersistenceError::duplicate_username("ada"));
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), USERNAME_TAKEN);
    }
}
