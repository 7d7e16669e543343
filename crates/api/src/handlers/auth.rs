//! Handlers for sign-in and sign-out.
//!
//! Sign-in is the OAuth authorization code flow with PKCE: `/auth/{provider}`
//! stores a fresh verifier in the session and sends the browser to the
//! identity provider, which comes back to `/auth/callback` with a one-time
//! code that is exchanged for an access token.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use fittrack_supabase::pkce;
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, AppResult, LOGIN_PATH};
use crate::session::{self, SignedIn, AUTH, LOGIN_NOTICE, PKCE_VERIFIER};
use crate::state::AppState;
use crate::views;

/// Where a completed sign-in lands.
const AFTER_SIGN_IN_PATH: &str = "/dashboard";

/// Where an already signed-in visitor of the login screen is sent.
const SIGNED_IN_HOME_PATH: &str = "/workout/new";

const SIGN_IN_EXPIRED: &str = "the sign-in session expired, please try again";

/// Query string of `GET /auth/callback`.
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// GET /login
pub async fn login_page(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    if AUTH.get(&session).await?.is_some() {
        return Ok(Redirect::to(SIGNED_IN_HOME_PATH).into_response());
    }

    let notice = LOGIN_NOTICE.remove(&session).await?;
    Ok(Html(views::auth::login(
        &state.config.oauth_providers,
        notice.as_deref(),
        None,
    ))
    .into_response())
}

/// GET /auth/{provider}
///
/// Starts a sign-in. Reuses the caller's session so unsaved drafts survive
/// the round trip through the identity provider.
pub async fn start_sign_in(
    State(state): State<AppState>,
    session: Session,
    Path(provider): Path<String>,
) -> AppResult<Response> {
    let verifier = pkce::generate_verifier();
    let challenge = pkce::challenge_s256(&verifier);
    let url = state
        .identity
        .authorize_url(&provider, &state.config.callback_url(), &challenge)?;

    PKCE_VERIFIER.insert(&session, verifier).await?;
    tracing::info!(%provider, "Starting OAuth sign-in");

    Ok(Redirect::to(url.as_str()).into_response())
}

/// GET /auth/callback
///
/// Completes a sign-in. Provider-reported errors and failed code exchanges
/// render the login screen with the reason.
pub async fn callback(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> AppResult<Response> {
    let providers = &state.config.oauth_providers;
    let failed = |reason: &str| {
        (
            StatusCode::UNAUTHORIZED,
            Html(views::auth::login(
                providers,
                None,
                Some(&format!("Failed to sign in: {reason}")),
            )),
        )
            .into_response()
    };

    if let Some(reason) = params.error_description.or(params.error) {
        tracing::warn!(%reason, "Identity provider reported a sign-in error");
        return Ok(failed(&reason));
    }

    let code = params
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing auth code".into()))?;

    let Some(verifier) = PKCE_VERIFIER.remove(&session).await? else {
        tracing::warn!("Sign-in callback without a pending sign-in");
        return Ok(failed(SIGN_IN_EXPIRED));
    };

    let auth = match state.identity.exchange_code(&code, &verifier).await {
        Ok(auth) => auth,
        Err(e) => {
            tracing::warn!(error = %e, "Auth code exchange failed");
            return Ok(failed(&e.to_string()));
        }
    };

    let user_id = auth.principal.id;
    session::sign_in(
        &session,
        SignedIn {
            principal: auth.principal,
            access_token: auth.access_token,
        },
    )
    .await?;
    tracing::info!(%user_id, "User signed in");

    Ok(Redirect::to(AFTER_SIGN_IN_PATH).into_response())
}

/// POST /logout
///
/// Drops the local session (the cookie is cleared with it) and revokes the
/// provider session. A provider failure is logged but never keeps the user
/// signed in locally.
pub async fn logout(State(state): State<AppState>, session: Session) -> AppResult<Response> {
    let signed_in = AUTH.get(&session).await?;
    session.flush().await?;

    if let Some(auth) = signed_in {
        if let Err(e) = state.identity.sign_out(&auth.access_token).await {
            tracing::warn!(error = %e, user_id = %auth.principal.id, "Provider sign-out failed");
        }
        tracing::info!(user_id = %auth.principal.id, "User signed out");
    }

    Ok(Redirect::to(LOGIN_PATH).into_response())
}
