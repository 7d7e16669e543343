//! Form controllers for the two workout entry screens.
//!
//! Each controller owns an in-memory draft and is driven by explicit events
//! ([`WorkoutEvent`], [`ActivityEvent`]) so the whole entry flow can be
//! exercised without an HTTP layer. Field updates never fail; validation
//! happens when an exercise is added or the draft is submitted.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::workout::{
    coerce_minutes, coerce_reps, parse_date, parse_optional_count, Exercise, NewActivity,
    NewWorkout,
};

/// Shown when the current exercise fails the add check.
pub const INVALID_EXERCISE_MESSAGE: &str = "Please enter a valid exercise name and reps.";

/// Shown when a strength workout is submitted with no exercises.
pub const EMPTY_WORKOUT_MESSAGE: &str = "Add at least one exercise before saving.";

/// Shown when an activity is submitted without an exercise name.
pub const MISSING_ACTIVITY_MESSAGE: &str = "Please enter an exercise name.";

// ---------------------------------------------------------------------------
// Strength workout form
// ---------------------------------------------------------------------------

/// Editable fields of the strength workout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutField {
    Date,
    Duration,
    ExerciseName,
    ExerciseReps,
}

/// Events accepted by [`WorkoutForm::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutEvent {
    /// Replace one field with the raw input value.
    Update(WorkoutField, String),
    /// Move the current exercise into the exercise list.
    AddExercise,
    /// Drop the exercise at the given list position.
    RemoveExercise(usize),
    /// Clear the whole draft.
    Reset,
}

/// The exercise currently being typed, before it joins the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ExerciseDraft {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1))]
    pub reps: i64,
}

/// Draft state for a new strength workout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutForm {
    date: String,
    duration: u32,
    exercises: Vec<Exercise>,
    current: ExerciseDraft,
}

impl WorkoutForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn current(&self) -> &ExerciseDraft {
        &self.current
    }

    /// Submission stays disabled until at least one exercise is listed.
    pub fn can_submit(&self) -> bool {
        !self.exercises.is_empty()
    }

    /// Apply one event to the draft.
    ///
    /// On error the draft is left exactly as it was.
    pub fn apply(&mut self, event: WorkoutEvent) -> Result<(), CoreError> {
        match event {
            WorkoutEvent::Update(field, value) => {
                self.update(field, &value);
                Ok(())
            }
            WorkoutEvent::AddExercise => self.add_exercise(),
            WorkoutEvent::RemoveExercise(index) => {
                if index >= self.exercises.len() {
                    return Err(CoreError::Validation(format!(
                        "No exercise at position {}",
                        index.saturating_add(1)
                    )));
                }
                self.exercises.remove(index);
                Ok(())
            }
            WorkoutEvent::Reset => {
                *self = Self::default();
                Ok(())
            }
        }
    }

    /// Produce the validated workout without consuming the draft, so a
    /// failed save can be retried with the same input.
    pub fn submission(&self) -> Result<NewWorkout, CoreError> {
        if !self.can_submit() {
            return Err(CoreError::Validation(EMPTY_WORKOUT_MESSAGE.into()));
        }
        Ok(NewWorkout {
            date: parse_date(&self.date)?,
            duration: self.duration,
            exercises: self.exercises.clone(),
        })
    }

    /// Replace one field. Never fails; numeric input is coerced.
    pub fn update(&mut self, field: WorkoutField, value: &str) {
        match field {
            WorkoutField::Date => self.date = value.to_string(),
            WorkoutField::Duration => self.duration = coerce_minutes(value),
            WorkoutField::ExerciseName => self.current.name = value.to_string(),
            WorkoutField::ExerciseReps => self.current.reps = coerce_reps(value),
        }
    }

    fn add_exercise(&mut self) -> Result<(), CoreError> {
        self.current
            .validate()
            .map_err(|_| CoreError::Validation(INVALID_EXERCISE_MESSAGE.into()))?;
        let reps = u32::try_from(self.current.reps)
            .map_err(|_| CoreError::Validation(INVALID_EXERCISE_MESSAGE.into()))?;

        let draft = std::mem::take(&mut self.current);
        self.exercises.push(Exercise {
            name: draft.name,
            reps,
        });
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Activity form
// ---------------------------------------------------------------------------

/// Editable fields of the activity form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityField {
    Date,
    Exercise,
    Duration,
    Calories,
}

/// Events accepted by [`ActivityForm::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityEvent {
    Update(ActivityField, String),
    Reset,
}

/// Draft state for a new single-exercise activity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityForm {
    date: String,
    exercise: String,
    duration: u32,
    calories: Option<u32>,
}

impl ActivityForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn exercise(&self) -> &str {
        &self.exercise
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn calories(&self) -> Option<u32> {
        self.calories
    }

    pub fn apply(&mut self, event: ActivityEvent) {
        match event {
            ActivityEvent::Update(field, value) => self.update(field, &value),
            ActivityEvent::Reset => *self = Self::default(),
        }
    }

    pub fn update(&mut self, field: ActivityField, value: &str) {
        match field {
            ActivityField::Date => self.date = value.to_string(),
            ActivityField::Exercise => self.exercise = value.to_string(),
            ActivityField::Duration => self.duration = coerce_minutes(value),
            ActivityField::Calories => self.calories = parse_optional_count(value),
        }
    }

    pub fn submission(&self) -> Result<NewActivity, CoreError> {
        let exercise = self.exercise.trim();
        if exercise.is_empty() {
            return Err(CoreError::Validation(MISSING_ACTIVITY_MESSAGE.into()));
        }
        Ok(NewActivity {
            date: parse_date(&self.date)?,
            exercise: exercise.to_string(),
            duration: self.duration,
            calories: self.calories,
        })
    }
}
