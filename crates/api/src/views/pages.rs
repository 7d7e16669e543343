//! Home and dashboard screens.

use fittrack_core::principal::{Principal, DEFAULT_DISPLAY_NAME};

use super::{escape, layout};

/// Landing page. Greets the signed-in user by first name.
pub fn home(principal: Option<&Principal>) -> String {
    let first_name = principal.map_or(DEFAULT_DISPLAY_NAME, Principal::first_name);
    layout(
        "Home",
        &format!(
            r#"<nav>
    <a class="button primary" href="/workout/new" title="New workout">+</a>
    <a class="button" href="/workout/history">History</a>
    <a class="button" href="/" title="Home">&#127968;&#xFE0E;</a>
</nav>
<h1>Welcome, {name}</h1>
<p class="muted">Your personal workout tracker</p>"#,
            name = escape(first_name),
        ),
    )
}

/// Signed-in landing screen after saving a workout or signing in.
pub fn dashboard(principal: &Principal) -> String {
    layout(
        "Dashboard",
        &format!(
            r#"<h1>Welcome, {name}!</h1>
<p><a class="button success" href="/log">Log a Workout</a></p>
<p><a class="button primary" href="/history">View History</a></p>
<form method="post" action="/logout">
    <button class="button danger" type="submit">Logout</button>
</form>"#,
            name = escape(principal.greeting_name()),
        ),
    )
}
