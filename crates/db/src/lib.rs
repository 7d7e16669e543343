//! Workout persistence on top of the hosted data store.
//!
//! Models describe the stored record shapes; repositories turn validated
//! drafts into insert requests and read history back for one user.

pub mod models;
pub mod repositories;

use fittrack_supabase::{DataStore, StoreError};

/// Check that the data store is reachable.
pub async fn health_check(store: &dyn DataStore) -> Result<(), StoreError> {
    store.ping().await
}
