//! Submission gateway shared by both entry forms.
//!
//! Right before a save the access token is checked with the identity
//! provider again. The record is always owned by the principal the provider
//! returns, never by anything the browser sent.

use std::fmt::Display;

use fittrack_core::principal::Principal;
use fittrack_supabase::AuthError;

use crate::error::AppResult;
use crate::middleware::auth::SessionUser;
use crate::session;
use crate::state::AppState;

pub const SAVE_FAILURE_PREFIX: &str = "Failed to save workout: ";

/// Shown on the login screen when a save found the session gone.
pub const SESSION_EXPIRED_NOTICE: &str = "Please log in to save a workout.";

/// Outcome of re-checking the principal before a save.
#[derive(Debug)]
pub enum Recheck {
    /// The token is still good; save on behalf of this principal.
    Current(Principal),
    /// The provider no longer knows the token. The session has been
    /// expired with a login notice; drafts are kept.
    Expired,
    /// The provider could not be asked.
    Unavailable(AuthError),
}

pub async fn recheck_principal(state: &AppState, user: &SessionUser) -> AppResult<Recheck> {
    match state.identity.current_user(&user.access_token).await {
        Ok(Some(principal)) => Ok(Recheck::Current(principal)),
        Ok(None) => {
            tracing::info!(user_id = %user.principal.id, "Access token no longer valid, expiring session");
            session::expire(&user.session, SESSION_EXPIRED_NOTICE).await?;
            Ok(Recheck::Expired)
        }
        Err(e) => {
            tracing::warn!(error = %e, user_id = %user.principal.id, "Could not re-check principal");
            Ok(Recheck::Unavailable(e))
        }
    }
}

/// Message shown above the form when a save did not go through.
pub fn save_failure(err: &impl Display) -> String {
    format!("{SAVE_FAILURE_PREFIX}{err}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fittrack_supabase::StoreError;

    #[test]
    fn failure_message_carries_store_reason() {
        let err = StoreError::Rejected {
            status: 403,
            message: "new row violates row-level security policy".into(),
        };
        assert_eq!(
            save_failure(&err),
            "Failed to save workout: new row violates row-level security policy"
        );
    }
}
