//! In-process stand-ins for the hosted backend.
//!
//! [`MemoryStore`] and [`MemoryIdentity`] implement the same traits as the
//! HTTP clients and are what the integration tests wire into the server.
//! Both can be told to fail so error paths are reachable without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use fittrack_core::principal::Principal;
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;
use uuid::Uuid;

use crate::auth::{AuthSession, IdentityProvider};
use crate::error::{AuthError, StoreError};
use crate::query::Query;
use crate::rest::DataStore;

/// Status reported for injected store failures.
const INJECTED_FAILURE_STATUS: u16 = 503;

// ---------------------------------------------------------------------------
// Data store
// ---------------------------------------------------------------------------

/// Collections of JSON records held in memory.
///
/// Records without an `id` get the next BIGSERIAL-style id on insert.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
    next_id: AtomicI64,
    insert_failure: RwLock<Option<String>>,
    query_failure: RwLock<Option<String>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            insert_failure: RwLock::new(None),
            query_failure: RwLock::new(None),
        }
    }

    /// Make every subsequent insert fail with `message` (or succeed again
    /// with `None`).
    pub async fn fail_inserts(&self, message: Option<&str>) {
        *self.insert_failure.write().await = message.map(str::to_string);
    }

    /// Make every subsequent query fail with `message`.
    pub async fn fail_queries(&self, message: Option<&str>) {
        *self.query_failure.write().await = message.map(str::to_string);
    }

    /// Snapshot of a collection in insertion order.
    pub async fn records(&self, collection: &str) -> Vec<Value> {
        self.collections
            .read()
            .await
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Put a record in place as-is, bypassing failure injection.
    pub async fn seed(&self, collection: &str, record: Value) {
        let record = self.with_id(record);
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(record);
    }

    fn with_id(&self, mut record: Value) -> Value {
        if let Value::Object(map) = &mut record {
            if !map.contains_key("id") {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                map.insert("id".to_string(), Value::from(id));
            }
        }
        record
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn insert(
        &self,
        _access_token: &str,
        collection: &str,
        record: Value,
    ) -> Result<(), StoreError> {
        if let Some(message) = self.insert_failure.read().await.clone() {
            return Err(StoreError::Rejected {
                status: INJECTED_FAILURE_STATUS,
                message,
            });
        }
        self.seed(collection, record).await;
        Ok(())
    }

    async fn query(
        &self,
        _access_token: &str,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<Value>, StoreError> {
        if let Some(message) = self.query_failure.read().await.clone() {
            return Err(StoreError::Rejected {
                status: INJECTED_FAILURE_STATUS,
                message,
            });
        }
        let collections = self.collections.read().await;
        let mut rows: Vec<Value> = collections
            .get(collection)
            .map(|rows| rows.iter().filter(|r| query.matches(r)).cloned().collect())
            .unwrap_or_default();
        query.sort(&mut rows);
        Ok(rows.iter().map(|r| query.project(r)).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Identity provider
// ---------------------------------------------------------------------------

/// Identity provider that signs in whoever holds a code issued by
/// [`MemoryIdentity::issue_code`].
pub struct MemoryIdentity {
    providers: Vec<String>,
    codes: RwLock<HashMap<String, Principal>>,
    tokens: RwLock<HashMap<String, Principal>>,
}

impl MemoryIdentity {
    pub fn new(providers: Vec<String>) -> Self {
        Self {
            providers,
            codes: RwLock::new(HashMap::new()),
            tokens: RwLock::new(HashMap::new()),
        }
    }

    /// Register a one-time auth code that signs in `principal`.
    pub async fn issue_code(&self, principal: Principal) -> String {
        let code = Uuid::new_v4().to_string();
        self.codes.write().await.insert(code.clone(), principal);
        code
    }

    /// Revoke every access token, as if all sessions expired upstream.
    pub async fn revoke_all(&self) {
        self.tokens.write().await.clear();
    }

    pub async fn active_tokens(&self) -> usize {
        self.tokens.read().await.len()
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    fn authorize_url(
        &self,
        provider: &str,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<Url, AuthError> {
        if !self.providers.iter().any(|p| p == provider) {
            return Err(AuthError::UnsupportedProvider(provider.to_string()));
        }
        Ok(Url::parse_with_params(
            "http://identity.invalid/authorize",
            &[
                ("provider", provider),
                ("redirect_to", redirect_to),
                ("code_challenge", code_challenge),
            ],
        )?)
    }

    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<AuthSession, AuthError> {
        if code_verifier.is_empty() {
            return Err(AuthError::Rejected {
                status: 400,
                message: "code verifier is missing".into(),
            });
        }
        let principal = self
            .codes
            .write()
            .await
            .remove(auth_code)
            .ok_or_else(|| AuthError::Rejected {
                status: 400,
                message: "invalid flow state, no valid flow state found".into(),
            })?;

        let access_token = format!("token-{}", Uuid::new_v4());
        self.tokens
            .write()
            .await
            .insert(access_token.clone(), principal.clone());

        Ok(AuthSession {
            access_token,
            principal,
        })
    }

    async fn current_user(&self, access_token: &str) -> Result<Option<Principal>, AuthError> {
        Ok(self.tokens.read().await.get(access_token).cloned())
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.tokens.write().await.remove(access_token);
        Ok(())
    }
}
