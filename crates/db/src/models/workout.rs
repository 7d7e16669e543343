//! Strength workout records (`workouts` collection).

use chrono::NaiveDate;
use fittrack_core::types::{DbId, UserId};
use fittrack_core::workout::{Exercise, NewWorkout};
use serde::{Deserialize, Serialize};

/// Collection holding strength workouts.
pub const WORKOUTS: &str = "workouts";

/// Columns read back for the history screen.
pub const WORKOUT_COLUMNS: &[&str] = &["id", "date", "duration", "exercises"];

/// A stored strength workout as read back for the history screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    pub id: DbId,
    pub date: NaiveDate,
    /// Minutes.
    pub duration: u32,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub exercises: Vec<Exercise>,
}

/// Insert payload: the validated draft plus the owner.
#[derive(Debug, Serialize)]
pub struct CreateWorkout<'a> {
    pub user_id: UserId,
    #[serde(flatten)]
    pub workout: &'a NewWorkout,
}
