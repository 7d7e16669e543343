//! Login screen.

use super::{escape, layout, message_block};

/// Display label for a provider name (`google` -> `Google`).
fn provider_label(provider: &str) -> String {
    let mut chars = provider.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Login screen with one sign-in button per configured provider.
///
/// `notice` is a one-shot hint (e.g. after a session expired), `error` a
/// failed sign-in attempt.
pub fn login(providers: &[String], notice: Option<&str>, error: Option<&str>) -> String {
    let buttons: String = providers
        .iter()
        .map(|p| {
            format!(
                r#"<p><a class="button primary" href="/auth/{path}">Sign in with {label}</a></p>"#,
                path = escape(p),
                label = escape(&provider_label(p)),
            )
        })
        .collect();

    layout(
        "Login",
        &format!(
            r#"<h1>Login to Fitness Tracker</h1>
{notice}{error}{buttons}"#,
            notice = message_block("notice", notice),
            error = message_block("error", error),
        ),
    )
}
