use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use fittrack_core::error::CoreError;
use fittrack_supabase::{AuthError, StoreError};
use tower_sessions::session::Error as SessionError;

use crate::views;

/// Application-level error type for HTTP handlers.
///
/// Wraps the domain and collaborator errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce an HTML error page, or a redirect
/// to the login screen for unauthenticated requests.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `fittrack_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The data store rejected a request or could not be reached.
    #[error("Data store error: {0}")]
    Store(#[from] StoreError),

    /// The identity provider rejected a request or could not be reached.
    #[error("Identity provider error: {0}")]
    Auth(#[from] AuthError),

    /// The session record could not be read or written.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// No signed-in principal for a protected screen.
    #[error("Authentication required")]
    Unauthenticated,

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Where unauthenticated requests are sent.
pub const LOGIN_PATH: &str = "/login";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthenticated => {
                return Redirect::to(LOGIN_PATH).into_response();
            }

            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
            }

            // --- Remote collaborators: surfaced verbatim ---
            AppError::Store(err) => {
                tracing::warn!(error = %err, "Data store request failed");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
            AppError::Auth(AuthError::UnsupportedProvider(provider)) => (
                StatusCode::BAD_REQUEST,
                format!("Unsupported sign-in provider: {provider}"),
            ),
            AppError::Auth(err) => {
                tracing::warn!(error = %err, "Identity provider request failed");
                (StatusCode::BAD_GATEWAY, err.to_string())
            }

            AppError::Session(err) => {
                tracing::error!(error = %err, "Session store failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Html(views::error_page(status, &message))).into_response()
    }
}
