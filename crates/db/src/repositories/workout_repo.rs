//! Repository for the `workouts` collection.

use fittrack_core::types::UserId;
use fittrack_core::workout::NewWorkout;
use fittrack_supabase::{DataStore, Order, Query, StoreError};

use crate::models::workout::{CreateWorkout, Workout, WORKOUTS, WORKOUT_COLUMNS};

/// Insert and history reads for strength workouts.
pub struct WorkoutRepo;

impl WorkoutRepo {
    /// Insert one workout owned by `user_id`.
    ///
    /// No idempotency key is attached: calling this twice with the same
    /// input stores two records.
    pub async fn create(
        store: &dyn DataStore,
        access_token: &str,
        user_id: UserId,
        input: &NewWorkout,
    ) -> Result<(), StoreError> {
        let record = serde_json::to_value(CreateWorkout {
            user_id,
            workout: input,
        })?;
        store.insert(access_token, WORKOUTS, record).await?;
        tracing::info!(%user_id, collection = WORKOUTS, exercises = input.exercises.len(), "Workout saved");
        Ok(())
    }

    /// All workouts of `user_id`, newest date first.
    pub async fn list_for_user(
        store: &dyn DataStore,
        access_token: &str,
        user_id: UserId,
    ) -> Result<Vec<Workout>, StoreError> {
        let query = Query::select(WORKOUT_COLUMNS)
            .eq("user_id", user_id)
            .order("date", Order::Desc);
        let rows = store.query(access_token, WORKOUTS, &query).await?;
        tracing::debug!(%user_id, collection = WORKOUTS, count = rows.len(), "Workouts loaded");

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }
}
