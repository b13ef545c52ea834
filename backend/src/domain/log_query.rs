//! Exercise log filter construction.
//!
//! Raw `from`/`to`/`limit` query values are turned into an explicit
//! [`ExerciseLogQuery`] by pure functions; store adapters translate that
//! struct into their own filter language.

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, Exercise, ExerciseDate, UserId};

/// Raw log query parameters as received from the client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogQueryParams {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Store-level filter for a user's exercises.
///
/// Both bounds are inclusive calendar days. `limit` is `None` when the result
/// is uncapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseLogQuery {
    user_id: UserId,
    from: Option<ExerciseDate>,
    to: Option<ExerciseDate>,
    limit: Option<NonZeroUsize>,
}

impl ExerciseLogQuery {
    /// Unbounded query for every exercise of `user_id`.
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            from: None,
            to: None,
            limit: None,
        }
    }

    pub fn with_from(mut self, from: ExerciseDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: ExerciseDate) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_limit(mut self, limit: NonZeroUsize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn from(&self) -> Option<ExerciseDate> {
        self.from
    }

    pub fn to(&self) -> Option<ExerciseDate> {
        self.to
    }

    pub fn limit(&self) -> Option<NonZeroUsize> {
        self.limit
    }

    /// Whether `exercise` satisfies the owner and date bounds.
    ///
    /// The limit is not considered here; callers cap the matched sequence.
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let date = exercise.date();
        exercise.user_id() == &self.user_id
            && self.from.is_none_or(|from| date >= from)
            && self.to.is_none_or(|to| date <= to)
    }
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|raw| !raw.trim().is_empty())
}

fn parse_bound(field: &str, value: Option<&String>) -> Result<Option<ExerciseDate>, Error> {
    non_blank(value)
        .map(|raw| {
            ExerciseDate::parse(raw).map_err(|err| {
                Error::invalid_request(err.to_string()).with_details(json!({
                    "field": field,
                    "value": raw,
                    "code": "invalid_date",
                }))
            })
        })
        .transpose()
}

/// Interpret a raw limit; anything but a positive integer means uncapped.
pub fn parse_limit(raw: Option<&str>) -> Option<NonZeroUsize> {
    let value = raw?.trim().parse::<i64>().ok()?;
    usize::try_from(value).ok().and_then(NonZeroUsize::new)
}

/// Build the log filter for `user_id` from raw query parameters.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::{LogQueryParams, UserId, build_log_query};
///
/// let params = LogQueryParams {
///     from: Some("2023-01-15".into()),
///     to: None,
///     limit: Some("0".into()),
/// };
/// let query = build_log_query(UserId::random(), &params).expect("valid query");
/// assert!(query.from().is_some());
/// assert!(query.limit().is_none());
/// ```
pub fn build_log_query(user_id: UserId, params: &LogQueryParams) -> Result<ExerciseLogQuery, Error> {
    let from = parse_bound("from", params.from.as_ref())?;
    let to = parse_bound("to", params.to.as_ref())?;
    Ok(ExerciseLogQuery {
        user_id,
        from,
        to,
        limit: parse_limit(non_blank(params.limit.as_ref())),
    })
}
