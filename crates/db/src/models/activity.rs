//! Single-exercise activity records (`activities` collection).

use chrono::NaiveDate;
use fittrack_core::types::{DbId, UserId};
use fittrack_core::workout::NewActivity;
use serde::{Deserialize, Serialize};

/// Collection holding activity entries.
pub const ACTIVITIES: &str = "activities";

pub const ACTIVITY_COLUMNS: &[&str] = &["id", "date", "exercise", "duration", "calories"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: DbId,
    pub date: NaiveDate,
    pub exercise: String,
    pub duration: u32,
    #[serde(default)]
    pub calories: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CreateActivity<'a> {
    pub user_id: UserId,
    #[serde(flatten)]
    pub activity: &'a NewActivity,
}
