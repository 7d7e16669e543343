//! Strength workout entry form and history.

use fittrack_core::form::WorkoutForm;
use fittrack_core::history::HistoryView;
use fittrack_db::models::workout::Workout;

use super::{escape, layout, message_block};

/// The "Log a Workout" form.
///
/// All inputs post back to `/workout/new`; the pressed button's `action`
/// value says what to do with them. Only the save button runs browser-side
/// `required` validation.
pub fn new_workout(form: &WorkoutForm, message: Option<&str>) -> String {
    let current = form.current();
    let reps = if current.reps == 0 {
        String::new()
    } else {
        current.reps.to_string()
    };

    let added = if form.exercises().is_empty() {
        String::new()
    } else {
        let items: String = form
            .exercises()
            .iter()
            .enumerate()
            .map(|(i, exercise)| {
                format!(
                    r#"<li>{name} - {reps} reps <button class="button" type="submit" name="action" value="remove:{i}" formnovalidate>Remove</button></li>"#,
                    name = escape(&exercise.name),
                    reps = exercise.reps,
                )
            })
            .collect();
        format!(r#"<h2>Added Exercises:</h2><ul id="exercises">{items}</ul>"#)
    };

    let disabled = if form.can_submit() { "" } else { " disabled" };

    layout(
        "Log a Workout",
        &format!(
            r#"<nav><a class="button" href="/workout/history">Back to History</a></nav>
<h1>Log a Workout</h1>
{message}
<form class="entry" method="post" action="/workout/new">
    <input type="date" name="date" value="{date}" required>
    <input type="number" name="duration" placeholder="Duration (minutes)" value="{duration}" min="0" required>
    <input type="text" name="exercise_name" placeholder="Exercise (e.g., Running)" value="{exercise_name}">
    <input type="number" name="exercise_reps" placeholder="Reps" value="{reps}">
    <button class="button primary" type="submit" name="action" value="add_exercise" formnovalidate>Add Exercise</button>
    {added}
    <button class="button success" type="submit" name="action" value="submit"{disabled}>Save Workout</button>
</form>"#,
            message = message_block("error", message),
            date = escape(form.date()),
            duration = form.duration(),
            exercise_name = escape(&current.name),
        ),
    )
}

/// The workout history list, newest first.
pub fn history(view: &HistoryView<Workout>) -> String {
    let content = match view {
        HistoryView::Loading => r#"<p class="muted" role="status">Loading...</p>"#.to_string(),
        HistoryView::Error(message) => message_block("error", Some(message)),
        HistoryView::Empty => r#"<p class="muted">No workouts found.</p>"#.to_string(),
        HistoryView::Populated(workouts) => {
            let cards: String = workouts.iter().map(workout_card).collect();
            format!(r#"<div class="list" id="workouts">{cards}</div>"#)
        }
    };

    layout(
        "Workout History",
        &format!(
            r#"<nav id="navigation-buttons">
    <a class="button primary" href="/workout/new">+ New Workout</a>
    <a class="button" href="/" title="Home">&#127968;&#xFE0E;</a>
</nav>
<h1>Workout History</h1>
{content}"#
        ),
    )
}

fn workout_card(workout: &Workout) -> String {
    let exercises = if workout.exercises.is_empty() {
        r#"<p class="muted">No exercises recorded.</p>"#.to_string()
    } else {
        let items: String = workout
            .exercises
            .iter()
            .map(|e| format!("<li>{} - {} reps</li>", escape(&e.name), e.reps))
            .collect();
        format!("<ul>{items}</ul>")
    };

    format!(
        r#"<div class="card" data-workout-id="{id}">
    <p><strong>Date:</strong> {date}</p>
    <p><strong>Duration:</strong> {duration} minutes</p>
    <p><strong>Exercises:</strong></p>
    {exercises}
</div>"#,
        id = workout.id,
        date = workout.date,
        duration = workout.duration,
    )
}
