//! Workout domain types and input coercion rules.
//!
//! Two workout shapes exist side by side:
//!
//! - **Strength log** ([`NewWorkout`]) -- a date, a duration and a list of
//!   exercises with rep counts.
//! - **Activity log** ([`NewActivity`]) -- a date, a single named exercise, a
//!   duration and optional calories burned.
//!
//! Both are produced by the form controllers in [`crate::form`] and handed to
//! the repositories for insertion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Wire and form format for workout dates (`<input type="date">`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One exercise entry in a strength workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub reps: u32,
}

/// A validated strength workout ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewWorkout {
    pub date: NaiveDate,
    /// Minutes.
    pub duration: u32,
    pub exercises: Vec<Exercise>,
}

/// A validated single-exercise activity ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewActivity {
    pub date: NaiveDate,
    pub exercise: String,
    /// Minutes.
    pub duration: u32,
    pub calories: Option<u32>,
}

/// Parse a form date, rejecting blanks and malformed values.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| CoreError::Validation("Please enter a valid date.".into()))
}

/// Coerce a duration input to whole minutes.
///
/// Anything that is not a non-negative integer becomes `0`.
pub fn coerce_minutes(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Coerce a rep count input. Invalid input becomes `0`; negative values are
/// kept so the add-exercise check can reject them.
pub fn coerce_reps(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

/// Parse an optional numeric input. Blank or invalid input becomes `None`.
pub fn parse_optional_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}
