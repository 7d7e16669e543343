//! Server-rendered HTML pages.
//!
//! Every screen is a plain `String` built with `format!`; all user- or
//! store-supplied text goes through [`escape`].

pub mod activity;
pub mod auth;
pub mod pages;
pub mod workout;

use axum::http::StatusCode;

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; background: #111827; color: #f9fafb; margin: 0; }
main { display: flex; flex-direction: column; align-items: center; min-height: 100vh; padding: 1rem; }
nav { display: flex; justify-content: space-between; width: 100%; max-width: 42rem; margin: 1.5rem 0 1rem; }
.button { display: inline-block; background: #6b7280; color: #fff; padding: .5rem 1rem; border: 0; border-radius: .25rem; text-decoration: none; cursor: pointer; font-size: 1rem; }
.button.primary { background: #3b82f6; }
.button.success { background: #22c55e; }
.button.danger { background: #ef4444; }
.button:disabled { background: #9ca3af; cursor: not-allowed; }
form.entry { display: flex; flex-direction: column; gap: .5rem; width: 100%; max-width: 28rem; }
input { border: 1px solid #d1d5db; padding: .5rem; border-radius: .25rem; }
.card { border: 1px solid #374151; border-radius: .5rem; padding: 1rem; background: #1f2937; margin-bottom: 1rem; }
.list { width: 100%; max-width: 42rem; }
.muted { color: #9ca3af; }
.error { color: #ef4444; }
.notice { color: #facc15; }
"#;

/// Escape text for inclusion in HTML element content and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Wrap page content in the shared document shell.
pub fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Fitness Tracker</title>
    <style>{CSS}</style>
</head>
<body>
<main>
{body}
</main>
</body>
</html>"#,
        title = escape(title),
    )
}

/// A paragraph for a flash message, or nothing.
pub(crate) fn message_block(class: &str, message: Option<&str>) -> String {
    match message {
        Some(msg) => format!(r#"<p class="{class}" role="alert">{}</p>"#, escape(msg)),
        None => String::new(),
    }
}

/// Generic error screen.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let heading = status.canonical_reason().unwrap_or("Error");
    layout(
        heading,
        &format!(
            r#"<h1>{heading}</h1>
<p class="error">{message}</p>
<a class="button" href="/">Home</a>"#,
            heading = escape(heading),
            message = escape(message),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn error_page_escapes_message() {
        let html = error_page(StatusCode::BAD_GATEWAY, "<script>");
        assert!(html.contains("Bad Gateway"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
