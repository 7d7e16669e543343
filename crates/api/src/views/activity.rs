//! Single-exercise activity form and history.

use fittrack_core::form::ActivityForm;
use fittrack_core::history::HistoryView;
use fittrack_db::models::activity::Activity;

use super::{escape, layout, message_block};

pub fn log_activity(form: &ActivityForm, message: Option<&str>) -> String {
    let calories = form.calories().map(|c| c.to_string()).unwrap_or_default();
    layout(
        "Log a Workout",
        &format!(
            r#"<nav><a class="button" href="/dashboard">Dashboard</a></nav>
<h1>Log a Workout</h1>
{message}
<form class="entry" method="post" action="/log">
    <input type="date" name="date" value="{date}" required>
    <input type="text" name="exercise" placeholder="Exercise (e.g., Running)" value="{exercise}" required>
    <input type="number" name="duration" placeholder="Duration (minutes)" value="{duration}" min="0" required>
    <input type="number" name="calories" placeholder="Calories (optional)" value="{calories}" min="0">
    <button class="button success" type="submit">Save Workout</button>
</form>"#,
            message = message_block("error", message),
            date = escape(form.date()),
            exercise = escape(form.exercise()),
            duration = form.duration(),
        ),
    )
}

pub fn history(view: &HistoryView<Activity>) -> String {
    let content = match view {
        HistoryView::Loading => r#"<p class="muted" role="status">Loading...</p>"#.to_string(),
        HistoryView::Error(message) => message_block("error", Some(message)),
        HistoryView::Empty => r#"<p class="muted">No workouts found.</p>"#.to_string(),
        HistoryView::Populated(activities) => {
            let items: String = activities.iter().map(activity_item).collect();
            format!(r#"<ul class="list" id="activities">{items}</ul>"#)
        }
    };

    layout(
        "Workout History",
        &format!(
            r#"<nav>
    <a class="button primary" href="/log">+ Log a Workout</a>
    <a class="button" href="/dashboard">Dashboard</a>
</nav>
<h1>Workout History</h1>
{content}"#
        ),
    )
}

fn activity_item(activity: &Activity) -> String {
    let calories = activity
        .calories
        .map(|c| format!("<p>Calories: {c}</p>"))
        .unwrap_or_default();
    format!(
        r#"<li class="card" data-activity-id="{id}">
    <p><strong>{exercise}</strong> on {date}</p>
    <p>Duration: {duration} minutes</p>
    {calories}
</li>"#,
        id = activity.id,
        exercise = escape(&activity.exercise),
        date = activity.date,
        duration = activity.duration,
    )
}
