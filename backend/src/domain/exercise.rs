//! Exercise data model and its validated components.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use super::UserId;

/// Textual layout used when projecting dates into responses, e.g.
/// `Wed May 10 2023`.
pub const LOG_DATE_FORMAT: &str = "%a %b %d %Y";

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", LOG_DATE_FORMAT];
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Validation errors returned by the exercise constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExerciseValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("duration must be a positive number of minutes")]
    InvalidDuration,
    #[error("invalid date")]
    InvalidDate,
}

/// Identifier of a logged exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExerciseId(Uuid);

impl ExerciseId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text description of what was done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    /// Validate and construct a description, trimming surrounding whitespace.
    pub fn new(description: impl AsRef<str>) -> Result<Self, ExerciseValidationError> {
        let trimmed = description.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ExerciseValidationError::EmptyDescription);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Description {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Description> for String {
    fn from(value: Description) -> Self {
        value.0
    }
}

impl TryFrom<String> for Description {
    type Error = ExerciseValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Largest whole minute count rendered as an integer; beyond it `f64`
/// stops representing every integer exactly.
const MAX_EXACT_MINUTES: f64 = 9_007_199_254_740_992.0;

/// Exercise duration in minutes; always finite and positive.
///
/// Fractional values are kept as given. Whole values serialise as JSON
/// integers, so `30` round-trips as `30` rather than `30.0`.
///
/// # Examples
/// ```
/// use exercise_tracker::domain::DurationMinutes;
///
/// let duration = DurationMinutes::parse("12.5").expect("positive minutes");
/// assert_eq!(duration.get(), 12.5);
/// assert!(DurationMinutes::parse("0").is_err());
/// ```
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(try_from = "f64")]
pub struct DurationMinutes(f64);

impl DurationMinutes {
    /// Construct from a minute count, rejecting zero, negative and
    /// non-finite values.
    pub fn new(minutes: f64) -> Result<Self, ExerciseValidationError> {
        if minutes.is_finite() && minutes > 0.0 {
            Ok(Self(minutes))
        } else {
            Err(ExerciseValidationError::InvalidDuration)
        }
    }

    /// Parse the textual form used by request bodies (`"30"`, `"12.5"`).
    pub fn parse(raw: &str) -> Result<Self, ExerciseValidationError> {
        let minutes = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| ExerciseValidationError::InvalidDuration)?;
        Self::new(minutes)
    }

    /// Minute count.
    pub fn get(self) -> f64 {
        self.0
    }

    fn whole_minutes(self) -> Option<u64> {
        (self.0.fract() == 0.0 && self.0 <= MAX_EXACT_MINUTES).then_some(self.0 as u64)
    }
}

// Construction rejects NaN, so equality is total.
impl PartialEq for DurationMinutes {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for DurationMinutes {}

impl PartialOrd for DurationMinutes {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DurationMinutes {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Serialize for DurationMinutes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.whole_minutes() {
            Some(minutes) => serializer.serialize_u64(minutes),
            None => serializer.serialize_f64(self.0),
        }
    }
}

impl fmt::Display for DurationMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DurationMinutes> for f64 {
    fn from(value: DurationMinutes) -> Self {
        value.get()
    }
}

impl TryFrom<f64> for DurationMinutes {
    type Error = ExerciseValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Calendar day an exercise was performed on.
///
/// Time of day is discarded on input, so `2023-05-10` and
/// `2023-05-10T18:30:00Z` name the same day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExerciseDate(NaiveDate);

impl ExerciseDate {
    /// Wrap a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse an ISO-like date, an RFC 3339 timestamp, or the log layout.
    ///
    /// Timestamps keep the calendar day as written in their own offset.
    ///
    /// # Examples
    /// ```
    /// use exercise_tracker::domain::ExerciseDate;
    ///
    /// let date = ExerciseDate::parse("2023-05-10").expect("valid date");
    /// assert_eq!(date.to_string(), "Wed May 10 2023");
    /// assert_eq!(ExerciseDate::parse("Wed May 10 2023"), Ok(date));
    /// ```
    pub fn parse(raw: &str) -> Result<Self, ExerciseValidationError> {
        let raw = raw.trim();
        if let Some(date) = DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        {
            return Ok(Self(date));
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(timestamp.date_naive()));
        }
        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .map(|timestamp| Self(timestamp.date()))
            .ok_or(ExerciseValidationError::InvalidDate)
    }

    /// Underlying calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LOG_DATE_FORMAT))
    }
}

/// Validated components of a new exercise.
#[derive(Debug, Clone)]
pub struct ExerciseDraft {
    pub id: ExerciseId,
    pub user_id: UserId,
    pub description: Description,
    pub duration: DurationMinutes,
    pub date: ExerciseDate,
}

/// Exercise logged against a user.
///
/// `user_id` is a weak reference: existence is checked when the exercise is
/// logged, not maintained afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    id: ExerciseId,
    user_id: UserId,
    description: Description,
    duration: DurationMinutes,
    date: ExerciseDate,
}

impl Exercise {
    /// Assemble an exercise from validated parts.
    pub fn new(draft: ExerciseDraft) -> Self {
        let ExerciseDraft {
            id,
            user_id,
            description,
            duration,
            date,
        } = draft;
        Self {
            id,
            user_id,
            description,
            duration,
            date,
        }
    }

    pub fn id(&self) -> &ExerciseId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn duration(&self) -> DurationMinutes {
        self.duration
    }

    pub fn date(&self) -> ExerciseDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
    }

    #[rstest]
    #[case("2023-05-10")]
    #[case(" 2023-05-10 ")]
    #[case("2023-05-10T23:59:59Z")]
    #[case("2023-05-10T06:00:00-05:00")]
    #[case("2023-05-10T08:15:00")]
    #[case("Wed May 10 2023")]
    fn parse_keeps_calendar_day(#[case] raw: &str) {
        let date = ExerciseDate::parse(raw).expect("date parses");
        assert_eq!(date.as_naive(), ymd(2023, 5, 10));
    }

    #[rstest]
    #[case("")]
    #[case("yesterday")]
    #[case("2023-02-30")]
    #[case("2023/05/10")]
    fn parse_rejects_malformed_dates(#[case] raw: &str) {
        assert_eq!(
            ExerciseDate::parse(raw),
            Err(ExerciseValidationError::InvalidDate)
        );
    }

    #[rstest]
    fn display_uses_log_layout() {
        assert_eq!(ExerciseDate::new(ymd(2023, 1, 1)).to_string(), "Sun Jan 01 2023");
    }

    #[rstest]
    #[case("30", Some(30.0))]
    #[case(" 45 ", Some(45.0))]
    #[case("12.5", Some(12.5))]
    #[case("3000000000", Some(3_000_000_000.0))]
    #[case("0", None)]
    #[case("-5", None)]
    #[case("-0.5", None)]
    #[case("NaN", None)]
    #[case("inf", None)]
    #[case("ten", None)]
    fn duration_parses_positive_minutes(#[case] raw: &str, #[case] expected: Option<f64>) {
        let parsed = DurationMinutes::parse(raw).ok().map(DurationMinutes::get);
        assert_eq!(parsed, expected);
    }

    #[rstest]
    #[case(30.0, "30")]
    #[case(12.5, "12.5")]
    #[case(0.25, "0.25")]
    fn duration_serialises_unchanged(#[case] minutes: f64, #[case] expected: &str) {
        let duration = DurationMinutes::new(minutes).expect("positive minutes");
        let json = serde_json::to_string(&duration).expect("serialise duration");
        assert_eq!(json, expected);
    }

    #[rstest]
    fn duration_deserialisation_rejects_non_positive() {
        assert!(serde_json::from_str::<DurationMinutes>("0").is_err());
        let parsed: DurationMinutes = serde_json::from_str("7").expect("whole minutes");
        assert_eq!(parsed.get(), 7.0);
    }

    #[rstest]
    #[case("")]
    #[case("  \t")]
    fn description_rejects_blank(#[case] raw: &str) {
        assert_eq!(
            Description::new(raw),
            Err(ExerciseValidationError::EmptyDescription)
        );
    }
}
