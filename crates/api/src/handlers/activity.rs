//! Handlers for single-exercise activities (`/log`, `/history`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use fittrack_core::form::{ActivityField, ActivityForm};
use fittrack_core::history::HistoryView;
use fittrack_db::repositories::ActivityRepo;
use serde::Deserialize;

use crate::error::{AppResult, LOGIN_PATH};
use crate::handlers::submission::{recheck_principal, save_failure, Recheck};
use crate::middleware::auth::SessionUser;
use crate::session::ACTIVITY_DRAFT;
use crate::state::AppState;
use crate::views;

const AFTER_SAVE_PATH: &str = "/dashboard";

/// Form body of `POST /log`.
#[derive(Debug, Deserialize)]
pub struct ActivityFormInput {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub exercise: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub calories: String,
}

fn render(status: StatusCode, form: &ActivityForm, message: Option<&str>) -> Response {
    (status, Html(views::activity::log_activity(form, message))).into_response()
}

/// GET /log
pub async fn log_form(user: SessionUser) -> AppResult<Html<String>> {
    let form = ACTIVITY_DRAFT.get(&user.session).await?.unwrap_or_default();
    Ok(Html(views::activity::log_activity(&form, None)))
}

/// POST /log
pub async fn submit_log(
    State(state): State<AppState>,
    user: SessionUser,
    Form(input): Form<ActivityFormInput>,
) -> AppResult<Response> {
    let mut form = ACTIVITY_DRAFT.get(&user.session).await?.unwrap_or_default();
    form.update(ActivityField::Date, &input.date);
    form.update(ActivityField::Exercise, &input.exercise);
    form.update(ActivityField::Duration, &input.duration);
    form.update(ActivityField::Calories, &input.calories);
    ACTIVITY_DRAFT.insert(&user.session, form.clone()).await?;

    let activity = match form.submission() {
        Ok(activity) => activity,
        Err(e) => {
            return Ok(render(
                StatusCode::UNPROCESSABLE_ENTITY,
                &form,
                Some(&e.user_message()),
            ))
        }
    };

    let principal = match recheck_principal(&state, &user).await? {
        Recheck::Current(principal) => principal,
        Recheck::Expired => return Ok(Redirect::to(LOGIN_PATH).into_response()),
        Recheck::Unavailable(e) => {
            return Ok(render(StatusCode::BAD_GATEWAY, &form, Some(&save_failure(&e))))
        }
    };

    if let Err(e) =
        ActivityRepo::create(state.store.as_ref(), &user.access_token, principal.id, &activity)
            .await
    {
        tracing::warn!(error = %e, user_id = %principal.id, "Failed to save activity");
        return Ok(render(StatusCode::BAD_GATEWAY, &form, Some(&save_failure(&e))));
    }

    ACTIVITY_DRAFT.remove(&user.session).await?;

    Ok(Redirect::to(AFTER_SAVE_PATH).into_response())
}

/// GET /history
pub async fn history(State(state): State<AppState>, user: SessionUser) -> Response {
    let view = HistoryView::resolve(
        ActivityRepo::list_for_user(state.store.as_ref(), &user.access_token, user.principal.id)
            .await,
    );

    let status = if let HistoryView::Error(message) = &view {
        tracing::warn!(error = %message, user_id = %user.principal.id, "Failed to load activity history");
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };

    (status, Html(views::activity::history(&view))).into_response()
}
