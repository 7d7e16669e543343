//! In-process session records with idle expiry.
//!
//! Records whose expiry date has passed are invisible to `load` right away
//! and are removed for good by [`SessionMemoryStore::run_sweeper`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tower_sessions::session::{Id, Record};
use tower_sessions::{session_store, SessionStore};

/// Default period between two sweeps of expired records.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Session records held in memory, keyed by session id.
///
/// Cheap to clone; clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct SessionMemoryStore {
    records: Arc<RwLock<HashMap<Id, Record>>>,
}

impl SessionMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired or not.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Remove every record that is expired at `now`. Returns how many went.
    pub async fn delete_expired_at(&self, now: OffsetDateTime) -> usize {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| record.expiry_date > now);
        before - records.len()
    }

    /// Sweep expired records every `period` until `cancel` fires.
    pub async fn run_sweeper(self, period: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(period);
        tracing::info!(
            period_secs = period.as_secs(),
            "Session sweeper started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Session sweeper shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = self.delete_expired_at(OffsetDateTime::now_utc()).await;
                    if removed > 0 {
                        tracing::debug!(removed, "Removed expired sessions");
                    }
                }
            }
        }
    }
}

#[async_trait]
impl SessionStore for SessionMemoryStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        let mut records = self.records.write().await;
        while records.contains_key(&record.id) {
            record.id = Id::default();
        }
        records.insert(record.id, record.clone());
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        self.records.write().await.insert(record.id, record.clone());
        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc();
        Ok(self
            .records
            .read()
            .await
            .get(id)
            .filter(|record| record.expiry_date > now)
            .cloned())
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        self.records.write().await.remove(id);
        Ok(())
    }
}
