//! Clients for the hosted backend: the identity provider (OAuth sign-in,
//! current user, sign-out) and the relational data store.
//!
//! Both collaborators sit behind traits -- [`IdentityProvider`] and
//! [`DataStore`] -- so the API server can run against the real service
//! ([`AuthClient`], [`RestClient`]) or the in-process fakes in [`memory`].

pub mod auth;
pub mod error;
pub mod memory;
pub mod pkce;
pub mod query;
pub mod rest;

pub use auth::{AuthClient, AuthSession, IdentityProvider};
pub use error::{AuthError, StoreError};
pub use query::{Order, Query};
pub use rest::{DataStore, RestClient};

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abc.supabase.co` (no trailing slash).
    pub url: String,
    /// Public anon key, sent as the `apikey` header on every request.
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Load connection settings from the environment.
    ///
    /// | Env Var             | Required |
    /// |---------------------|----------|
    /// | `SUPABASE_URL`      | **yes**  |
    /// | `SUPABASE_ANON_KEY` | **yes**  |
    ///
    /// # Panics
    ///
    /// Panics if either variable is missing or empty, or if the URL does not
    /// parse.
    pub fn from_env() -> Self {
        let url = std::env::var("SUPABASE_URL").expect("SUPABASE_URL must be set");
        let anon_key =
            std::env::var("SUPABASE_ANON_KEY").expect("SUPABASE_ANON_KEY must be set");
        assert!(!anon_key.is_empty(), "SUPABASE_ANON_KEY must not be empty");

        url::Url::parse(&url).unwrap_or_else(|e| panic!("Invalid SUPABASE_URL '{url}': {e}"));

        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key,
        }
    }
}
