//! Session gate extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use fittrack_core::principal::Principal;
use tower_sessions::Session;

use crate::error::AppError;
use crate::session::AUTH;
use crate::state::AppState;

/// Signed-in principal resolved from the session.
///
/// Use this as an extractor parameter in any handler of a protected screen.
/// Requests without a signed-in session are answered with a redirect to the
/// login screen before the handler body runs:
///
/// ```ignore
/// async fn dashboard(user: SessionUser) -> Html<String> {
///     tracing::debug!(user_id = %user.principal.id, "rendering dashboard");
///     Html(views::pages::dashboard(&user.principal))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The session the principal was found in, for drafts and expiry.
    pub session: Session,
    pub principal: Principal,
    /// Token for data store requests on the user's behalf.
    pub access_token: String,
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::InternalError(msg.to_string()))?;

        let signed_in = AUTH.get(&session).await?.ok_or(AppError::Unauthenticated)?;

        Ok(SessionUser {
            session,
            principal: signed_in.principal,
            access_token: signed_in.access_token,
        })
    }
}
