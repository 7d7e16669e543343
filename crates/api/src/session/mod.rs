//! Per-browser session data, kept by `tower-sessions`.
//!
//! The session cookie is issued and rotated by the [`SessionManagerLayer`]
//! built in [`session_layer`]. Each piece of session data lives under its own
//! typed [`SessionKey`]: the signed-in principal (written by the OAuth
//! callback, dropped on sign-out), the PKCE verifier of a pending sign-in, a
//! one-shot notice for the login screen and the two unsaved form drafts.

mod store;

pub use store::{SessionMemoryStore, DEFAULT_SWEEP_INTERVAL};

use std::marker::PhantomData;

use fittrack_core::form::{ActivityForm, WorkoutForm};
use fittrack_core::principal::Principal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use time::Duration;
use tower_sessions::cookie::SameSite;
use tower_sessions::{session, Expiry, Session, SessionManagerLayer};

use crate::config::ServerConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "fittrack_session";

/// A principal and the access token it was issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedIn {
    pub principal: Principal,
    pub access_token: String,
}

/// A session entry name bound to the type stored under it.
pub struct SessionKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> SessionKey<T> {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: Serialize + DeserializeOwned> SessionKey<T> {
    pub async fn get(&self, session: &Session) -> Result<Option<T>, session::Error> {
        session.get(self.name).await
    }

    pub async fn insert(&self, session: &Session, value: T) -> Result<(), session::Error> {
        session.insert(self.name, value).await
    }

    pub async fn remove(&self, session: &Session) -> Result<Option<T>, session::Error> {
        session.remove(self.name).await
    }
}

/// Set after a successful sign-in.
pub const AUTH: SessionKey<SignedIn> = SessionKey::new("auth");
/// PKCE verifier for a sign-in that has not come back yet.
pub const PKCE_VERIFIER: SessionKey<String> = SessionKey::new("pkce_verifier");
/// Shown once on the next login screen.
pub const LOGIN_NOTICE: SessionKey<String> = SessionKey::new("login_notice");
pub const WORKOUT_DRAFT: SessionKey<WorkoutForm> = SessionKey::new("workout_draft");
pub const ACTIVITY_DRAFT: SessionKey<ActivityForm> = SessionKey::new("activity_draft");

/// The session middleware: `HttpOnly`, `SameSite=Lax` cookie that expires
/// after `session_idle_minutes` without a request.
///
/// `Lax` rather than `Strict` so the cookie comes along on the identity
/// provider's redirect back to `/auth/callback`.
pub fn session_layer(
    store: SessionMemoryStore,
    config: &ServerConfig,
) -> SessionManagerLayer<SessionMemoryStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(config.secure_cookies)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(
            config.session_idle_minutes,
        )))
}

/// Record a completed sign-in.
///
/// The session id is cycled so a cookie issued before sign-in never names an
/// authenticated session. Drafts carry over; the PKCE verifier and any login
/// notice do not.
pub async fn sign_in(session: &Session, signed_in: SignedIn) -> Result<(), session::Error> {
    session.cycle_id().await?;
    PKCE_VERIFIER.remove(session).await?;
    LOGIN_NOTICE.remove(session).await?;
    AUTH.insert(session, signed_in).await
}

/// Drop the principal but keep the drafts, leaving `notice` for the login
/// screen. Used when the provider no longer recognises the token.
pub async fn expire(session: &Session, notice: &str) -> Result<(), session::Error> {
    AUTH.remove(session).await?;
    LOGIN_NOTICE.insert(session, notice.to_string()).await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use fittrack_core::form::{WorkoutEvent, WorkoutField};
    use uuid::Uuid;

    fn signed_in() -> SignedIn {
        SignedIn {
            principal: Principal {
                id: Uuid::new_v4(),
                email: Some("ada@example.com".into()),
                name: Some("Ada Lovelace".into()),
            },
            access_token: "token".into(),
        }
    }

    fn open(store: &SessionMemoryStore, id: Option<session::Id>) -> Session {
        Session::new(id, Arc::new(store.clone()), None)
    }

    fn draft() -> WorkoutForm {
        let mut form = WorkoutForm::new();
        for (field, value) in [
            (WorkoutField::Date, "2024-01-15"),
            (WorkoutField::ExerciseName, "Pushups"),
            (WorkoutField::ExerciseReps, "20"),
        ] {
            form.update(field, value);
        }
        form.apply(WorkoutEvent::AddExercise).unwrap();
        form
    }

    #[tokio::test]
    async fn drafts_survive_a_reload() {
        let store = SessionMemoryStore::new();
        let session = open(&store, None);
        WORKOUT_DRAFT.insert(&session, draft()).await.unwrap();
        session.save().await.unwrap();

        let reloaded = open(&store, session.id());
        assert_eq!(WORKOUT_DRAFT.get(&reloaded).await.unwrap(), Some(draft()));
        assert_eq!(ACTIVITY_DRAFT.get(&reloaded).await.unwrap(), None);
    }

    #[tokio::test]
    async fn sign_in_cycles_id_and_drops_verifier() {
        let store = SessionMemoryStore::new();
        let session = open(&store, None);
        PKCE_VERIFIER.insert(&session, "verifier".into()).await.unwrap();
        WORKOUT_DRAFT.insert(&session, draft()).await.unwrap();
        session.save().await.unwrap();
        let pending_id = session.id();

        let session = open(&store, pending_id);
        sign_in(&session, signed_in()).await.unwrap();
        session.save().await.unwrap();

        assert_ne!(session.id(), pending_id);
        assert_eq!(store.len().await, 1);
        assert_eq!(AUTH.get(&open(&store, pending_id)).await.unwrap(), None);

        let current = open(&store, session.id());
        let auth = AUTH.get(&current).await.unwrap().unwrap();
        assert_eq!(auth.access_token, "token");
        assert_eq!(PKCE_VERIFIER.get(&current).await.unwrap(), None);
        assert_eq!(WORKOUT_DRAFT.get(&current).await.unwrap(), Some(draft()));
    }

    #[tokio::test]
    async fn expire_keeps_drafts_and_leaves_notice() {
        let store = SessionMemoryStore::new();
        let session = open(&store, None);
        AUTH.insert(&session, signed_in()).await.unwrap();
        WORKOUT_DRAFT.insert(&session, draft()).await.unwrap();

        expire(&session, "Please log in.").await.unwrap();

        assert_eq!(AUTH.get(&session).await.unwrap(), None);
        assert_eq!(WORKOUT_DRAFT.get(&session).await.unwrap(), Some(draft()));
        assert_eq!(
            LOGIN_NOTICE.remove(&session).await.unwrap().as_deref(),
            Some("Please log in.")
        );
        assert_eq!(LOGIN_NOTICE.remove(&session).await.unwrap(), None);
    }

    #[test]
    fn keys_are_distinct() {
        let names = [
            AUTH.name(),
            PKCE_VERIFIER.name(),
            LOGIN_NOTICE.name(),
            WORKOUT_DRAFT.name(),
            ACTIVITY_DRAFT.name(),
        ];
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name), "duplicate key {name}");
        }
    }
}
