use std::sync::Arc;

use fittrack_supabase::{DataStore, IdentityProvider};

use crate::config::ServerConfig;
use crate::session::SessionMemoryStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Hosted identity provider (sign-in, current user, sign-out).
    pub identity: Arc<dyn IdentityProvider>,
    /// Hosted data store holding the workout collections.
    pub store: Arc<dyn DataStore>,
    /// Session records behind the session cookie.
    pub sessions: SessionMemoryStore,
}
