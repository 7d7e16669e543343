pub mod health;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;
use crate::views;

/// Build the page route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                       home (public)
/// /login                  login screen (public)
/// /auth/{provider}        start OAuth sign-in (public)
/// /auth/callback          finish OAuth sign-in (public)
/// /logout                 sign out (POST)
///
/// /dashboard              signed-in landing screen
///
/// /workout/new            strength workout form (GET, POST)
/// /workout/history        strength workout history, newest first
///
/// /log                    single-exercise activity form (GET, POST)
/// /history                activity history, oldest first
/// ```
///
/// Everything below `/dashboard` redirects to `/login` without a signed-in
/// session.
pub fn page_routes() -> Router<AppState> {
    let auth = Router::new()
        .route("/login", get(handlers::auth::login_page))
        .route("/auth/callback", get(handlers::auth::callback))
        .route("/auth/{provider}", get(handlers::auth::start_sign_in))
        .route("/logout", post(handlers::auth::logout));

    let workout = Router::new()
        .route(
            "/workout/new",
            get(handlers::workout::new_form).post(handlers::workout::submit_form),
        )
        .route("/workout/history", get(handlers::workout::history));

    let activity = Router::new()
        .route(
            "/log",
            get(handlers::activity::log_form).post(handlers::activity::submit_log),
        )
        .route("/history", get(handlers::activity::history));

    Router::new()
        .route("/", get(handlers::pages::home))
        .route("/dashboard", get(handlers::pages::dashboard))
        .merge(auth)
        .merge(workout)
        .merge(activity)
        .fallback(not_found)
}

async fn not_found() -> impl IntoResponse {
    let status = StatusCode::NOT_FOUND;
    (status, Html(views::error_page(status, "Page not found")))
}
