//! Handlers for strength workouts (`/workout/new`, `/workout/history`).
//!
//! The entry form is a single HTML form. Every button posts all inputs back
//! together with an `action` value, so each POST first copies the inputs
//! into the session draft and then performs the action.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use fittrack_core::form::{WorkoutEvent, WorkoutField, WorkoutForm};
use fittrack_core::history::HistoryView;
use fittrack_db::repositories::WorkoutRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult, LOGIN_PATH};
use crate::handlers::submission::{recheck_principal, save_failure, Recheck};
use crate::middleware::auth::SessionUser;
use crate::session::WORKOUT_DRAFT;
use crate::state::AppState;
use crate::views;

const AFTER_SAVE_PATH: &str = "/dashboard";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Form body of `POST /workout/new`.
///
/// Missing inputs read as empty strings; numeric coercion happens in the
/// form controller. Unknown inputs (such as a `user_id`) are ignored.
#[derive(Debug, Deserialize)]
pub struct WorkoutFormInput {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub exercise_name: String,
    #[serde(default)]
    pub exercise_reps: String,
    #[serde(default)]
    pub action: String,
}

impl WorkoutFormInput {
    fn fields(&self) -> [(WorkoutField, &str); 4] {
        [
            (WorkoutField::Date, self.date.as_str()),
            (WorkoutField::Duration, self.duration.as_str()),
            (WorkoutField::ExerciseName, self.exercise_name.as_str()),
            (WorkoutField::ExerciseReps, self.exercise_reps.as_str()),
        ]
    }
}

/// The button that submitted the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormAction {
    AddExercise,
    Remove(usize),
    Submit,
}

impl FormAction {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "add_exercise" => Some(Self::AddExercise),
            "submit" => Some(Self::Submit),
            other => other
                .strip_prefix("remove:")
                .and_then(|i| i.parse().ok())
                .map(Self::Remove),
        }
    }
}

fn render(status: StatusCode, form: &WorkoutForm, message: Option<&str>) -> Response {
    (status, Html(views::workout::new_workout(form, message))).into_response()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /workout/new
pub async fn new_form(user: SessionUser) -> AppResult<Html<String>> {
    let form = WORKOUT_DRAFT.get(&user.session).await?.unwrap_or_default();
    Ok(Html(views::workout::new_workout(&form, None)))
}

/// POST /workout/new
///
/// Failed actions re-render the form with a message and leave the draft as
/// it was. A successful save clears the draft and lands on the dashboard.
pub async fn submit_form(
    State(state): State<AppState>,
    user: SessionUser,
    Form(input): Form<WorkoutFormInput>,
) -> AppResult<Response> {
    let action = FormAction::parse(&input.action)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown form action: {}", input.action)))?;

    let mut form = WORKOUT_DRAFT.get(&user.session).await?.unwrap_or_default();
    for (field, value) in input.fields() {
        form.update(field, value);
    }
    let outcome = match action {
        FormAction::AddExercise => form.apply(WorkoutEvent::AddExercise),
        FormAction::Remove(index) => form.apply(WorkoutEvent::RemoveExercise(index)),
        FormAction::Submit => Ok(()),
    };
    WORKOUT_DRAFT.insert(&user.session, form.clone()).await?;

    if let Err(e) = outcome {
        return Ok(render(
            StatusCode::UNPROCESSABLE_ENTITY,
            &form,
            Some(&e.user_message()),
        ));
    }
    if action != FormAction::Submit {
        return Ok(render(StatusCode::OK, &form, None));
    }

    let workout = match form.submission() {
        Ok(workout) => workout,
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
        WorkoutRepo::create(state.store.as_ref(), &user.access_token, principal.id, &workout).await
    {
        tracing::warn!(error = %e, user_id = %principal.id, "Failed to save workout");
        return Ok(render(StatusCode::BAD_GATEWAY, &form, Some(&save_failure(&e))));
    }

    WORKOUT_DRAFT.remove(&user.session).await?;

    Ok(Redirect::to(AFTER_SAVE_PATH).into_response())
}

/// GET /workout/history
pub async fn history(State(state): State<AppState>, user: SessionUser) -> Response {
    let view = HistoryView::resolve(
        WorkoutRepo::list_for_user(state.store.as_ref(), &user.access_token, user.principal.id)
            .await,
    );

    let status = match &view {
        HistoryView::Error(message) => {
            tracing::warn!(error = %message, user_id = %user.principal.id, "Failed to load workout history");
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::OK,
    };

    (status, Html(views::workout::history(&view))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_button_actions() {
        assert_eq!(FormAction::parse("add_exercise"), Some(FormAction::AddExercise));
        assert_eq!(FormAction::parse("submit"), Some(FormAction::Submit));
        assert_eq!(FormAction::parse("remove:2"), Some(FormAction::Remove(2)));
        assert_eq!(
            FormAction::parse("remove:18446744073709551615"),
            Some(FormAction::Remove(usize::MAX))
        );
        assert_eq!(FormAction::parse("remove:x"), None);
        assert_eq!(FormAction::parse(""), None);
    }
}
