//! HTTP-level tests for the session gate: OAuth sign-in, protected screens
//! and sign-out.

mod common;

use axum::http::StatusCode;
use common::{body_text, cookie_pair, get, location, post_form, principal, set_cookie, sign_in};
use time::{Duration, OffsetDateTime};

// ---------------------------------------------------------------------------
// Login screen
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_screen_offers_configured_provider() {
    let app = common::build_test_app();
    let response = get(&app, "/login", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Login to Fitness Tracker"));
    assert!(html.contains(r#"href="/auth/google">Sign in with Google"#));
}

#[tokio::test]
async fn signed_in_visitor_skips_login_screen() {
    let app = common::build_test_app();
    let cookie = sign_in(&app, &principal("Ada Lovelace", "ada@example.com")).await;

    let response = get(&app, "/login", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/workout/new");
}

// ---------------------------------------------------------------------------
// OAuth round trip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_sign_in_redirects_with_pkce_challenge() {
    let app = common::build_test_app();
    let response = get(&app, "/auth/google", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("http://identity.invalid/authorize?"));
    assert!(target.contains("provider=google"));
    assert!(target.contains("code_challenge="));
    assert!(target.contains("redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback"));
    assert!(cookie_pair(&response).starts_with("fittrack_session="));
}

#[tokio::test]
async fn session_cookie_is_http_only_lax_with_idle_expiry() {
    let app = common::build_test_app();
    let response = get(&app, "/auth/google", None).await;

    let cookie = set_cookie(&response);
    assert!(cookie.contains("HttpOnly"), "{cookie}");
    assert!(cookie.contains("SameSite=Lax"), "{cookie}");
    assert!(cookie.contains("Path=/"), "{cookie}");
    assert!(cookie.contains("Max-Age="), "{cookie}");
    assert!(!cookie.contains("Secure"), "{cookie}");
}

#[tokio::test]
async fn public_screens_do_not_store_sessions() {
    let app = common::build_test_app();

    for uri in ["/", "/login", "/dashboard"] {
        get(&app, uri, None).await;
    }
    post_form(&app, "/logout", None, "").await;

    assert!(app.sessions.is_empty().await);
}

#[tokio::test]
async fn abandoned_sign_ins_are_swept_after_idle_timeout() {
    let app = common::build_test_app();
    for _ in 0..25 {
        let response = get(&app, "/auth/google", None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
    assert_eq!(app.sessions.len().await, 25);

    let now = OffsetDateTime::now_utc();
    assert_eq!(app.sessions.delete_expired_at(now).await, 0);

    let idle = Duration::minutes(common::test_config().session_idle_minutes);
    let later = now + idle + Duration::minutes(1);
    assert_eq!(app.sessions.delete_expired_at(later).await, 25);
    assert!(app.sessions.is_empty().await);
}

#[tokio::test]
async fn unsupported_provider_is_rejected() {
    let app = common::build_test_app();
    let response = get(&app, "/auth/myspace", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(response)
        .await
        .contains("Unsupported sign-in provider: myspace"));
}

#[tokio::test]
async fn callback_signs_in_and_rotates_session() {
    let app = common::build_test_app();
    let start = get(&app, "/auth/google", None).await;
    let pending = cookie_pair(&start);

    let code = app
        .identity
        .issue_code(principal("Ada Lovelace", "ada@example.com"))
        .await;
    let callback = get(&app, &format!("/auth/callback?code={code}"), Some(&pending)).await;

    assert_eq!(callback.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&callback), "/dashboard");
    let signed_in = cookie_pair(&callback);
    assert_ne!(signed_in, pending);

    // The pre-sign-in cookie no longer opens anything.
    let stale = get(&app, "/dashboard", Some(&pending)).await;
    assert_eq!(stale.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&stale), "/login");

    let dashboard = get(&app, "/dashboard", Some(&signed_in)).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    assert!(body_text(dashboard)
        .await
        .contains("Welcome, ada@example.com!"));
}

#[tokio::test]
async fn callback_with_provider_error_shows_reason() {
    let app = common::build_test_app();
    let response = get(
        &app,
        "/auth/callback?error=access_denied&error_description=Access+denied",
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response)
        .await
        .contains("Failed to sign in: Access denied"));
}

#[tokio::test]
async fn callback_without_pending_sign_in_fails() {
    let app = common::build_test_app();
    let code = app
        .identity
        .issue_code(principal("Ada Lovelace", "ada@example.com"))
        .await;

    let response = get(&app, &format!("/auth/callback?code={code}"), None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response).await.contains("Failed to sign in"));
    assert!(app.sessions.is_empty().await);
}

#[tokio::test]
async fn callback_with_unknown_code_fails() {
    let app = common::build_test_app();
    let start = get(&app, "/auth/google", None).await;
    let pending = cookie_pair(&start);

    let response = get(&app, "/auth/callback?code=forged", Some(&pending)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_text(response)
        .await
        .contains("Failed to sign in: invalid flow state"));
}

#[tokio::test]
async fn callback_without_code_is_bad_request() {
    let app = common::build_test_app();
    let response = get(&app, "/auth/callback", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Session gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn protected_screens_redirect_to_login() {
    let app = common::build_test_app();

    for uri in ["/dashboard", "/workout/new", "/workout/history", "/log", "/history"] {
        let response = get(&app, uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), "/login", "{uri}");
    }

    let response = post_form(&app, "/workout/new", None, "action=submit").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn garbage_cookie_is_treated_as_signed_out() {
    let app = common::build_test_app();
    let response = get(&app, "/dashboard", Some("fittrack_session=not-a-uuid")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn home_greets_by_first_name() {
    let app = common::build_test_app();
    let cookie = sign_in(&app, &principal("Ada Lovelace", "ada@example.com")).await;

    let response = get(&app, "/", Some(&cookie)).await;
    assert!(body_text(response).await.contains("Welcome, Ada"));
}

// ---------------------------------------------------------------------------
// Sign-out
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_ends_local_and_provider_session() {
    let app = common::build_test_app();
    let cookie = sign_in(&app, &principal("Ada Lovelace", "ada@example.com")).await;
    assert_eq!(app.identity.active_tokens().await, 1);

    let response = post_form(&app, "/logout", Some(&cookie), "").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert!(cookie_pair(&response).starts_with("fittrack_session="));
    assert_eq!(app.identity.active_tokens().await, 0);
    assert!(app.sessions.is_empty().await);

    let after = get(&app, "/dashboard", Some(&cookie)).await;
    assert_eq!(location(&after), "/login");
}

#[tokio::test]
async fn logout_without_session_still_redirects() {
    let app = common::build_test_app();
    let response = post_form(&app, "/logout", None, "").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}
