//! Data store client for the hosted relational REST endpoint.
//!
//! Records travel as JSON objects. Row-level security on the service side
//! scopes every request to the caller's access token; this crate still
//! always filters by `user_id` explicitly.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{extract_message, StoreError};
use crate::query::Query;
use crate::SupabaseConfig;

/// A remote collection store with insert and filtered, ordered reads.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Insert one record into `collection`.
    async fn insert(
        &self,
        access_token: &str,
        collection: &str,
        record: Value,
    ) -> Result<(), StoreError>;

    /// Read every record of `collection` matching the query, in query order.
    async fn query(
        &self,
        access_token: &str,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<Value>, StoreError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// HTTP client for the hosted REST store.
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RestClient {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (shares the connection pool with the identity client).
    pub fn with_client(client: reqwest::Client, config: &SupabaseConfig) -> Self {
        Self {
            client,
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }

    /// Ensure the response has a success status code, turning anything else
    /// into [`StoreError::Rejected`] with the upstream message.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError::Rejected {
                status: status.as_u16(),
                message: extract_message(status.as_u16(), &body),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl DataStore for RestClient {
    async fn insert(
        &self,
        access_token: &str,
        collection: &str,
        record: Value,
    ) -> Result<(), StoreError> {
        let response = self
            .client
            .post(self.collection_url(collection))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    async fn query(
        &self,
        access_token: &str,
        collection: &str,
        query: &Query,
    ) -> Result<Vec<Value>, StoreError> {
        let response = self
            .client
            .get(self.collection_url(collection))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .query(&query.to_params())
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Vec<Value>>().await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let response = self
            .client
            .get(format!("{}/rest/v1/", self.base_url))
            .header("apikey", &self.anon_key)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}
