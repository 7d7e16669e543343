//! Handlers for the landing page and the signed-in dashboard.

use axum::response::Html;
use tower_sessions::Session;

use crate::error::AppResult;
use crate::middleware::auth::SessionUser;
use crate::session::AUTH;
use crate::views;

/// GET /
///
/// Public. Greets the signed-in user by first name, or a generic name.
pub async fn home(session: Session) -> AppResult<Html<String>> {
    let signed_in = AUTH.get(&session).await?;
    Ok(Html(views::pages::home(
        signed_in.as_ref().map(|s| &s.principal),
    )))
}

/// GET /dashboard
pub async fn dashboard(user: SessionUser) -> Html<String> {
    tracing::debug!(user_id = %user.principal.id, "Rendering dashboard");
    Html(views::pages::dashboard(&user.principal))
}
