//! Repository for the `activities` collection.

use fittrack_core::types::UserId;
use fittrack_core::workout::NewActivity;
use fittrack_supabase::{DataStore, Order, Query, StoreError};

use crate::models::activity::{Activity, CreateActivity, ACTIVITIES, ACTIVITY_COLUMNS};

pub struct ActivityRepo;

impl ActivityRepo {
    pub async fn create(
        store: &dyn DataStore,
        access_token: &str,
        user_id: UserId,
        input: &NewActivity,
    ) -> Result<(), StoreError> {
        let record = serde_json::to_value(CreateActivity {
            user_id,
            activity: input,
        })?;
        store.insert(access_token, ACTIVITIES, record).await?;
        tracing::info!(%user_id, collection = ACTIVITIES, "Activity saved");
        Ok(())
    }

    /// All activities of `user_id` in ascending id (creation) order.
    pub async fn list_for_user(
        store: &dyn DataStore,
        access_token: &str,
        user_id: UserId,
    ) -> Result<Vec<Activity>, StoreError> {
        let query = Query::select(ACTIVITY_COLUMNS)
            .eq("user_id", user_id)
            .order("id", Order::Asc);
        let rows = store.query(access_token, ACTIVITIES, &query).await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(StoreError::from))
            .collect()
    }
}
