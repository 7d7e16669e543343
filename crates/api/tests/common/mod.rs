#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use fittrack_api::config::ServerConfig;
use fittrack_api::router::build_app_router;
use fittrack_api::session::SessionMemoryStore;
use fittrack_api::state::AppState;
use fittrack_core::principal::Principal;
use fittrack_supabase::memory::{MemoryIdentity, MemoryStore};
use fittrack_supabase::{DataStore, SupabaseConfig};

/// Build a test `ServerConfig` with safe defaults.
///
/// The backend URL is never contacted; tests wire in the in-memory
/// identity provider and data store instead.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_url: "http://localhost:3000".to_string(),
        request_timeout_secs: 30,
        secure_cookies: false,
        session_idle_minutes: 60,
        oauth_providers: vec!["google".to_string()],
        supabase: SupabaseConfig {
            url: "http://backend.invalid".to_string(),
            anon_key: "test-anon-key".to_string(),
        },
    }
}

/// A router plus handles on its in-memory collaborators.
pub struct TestApp {
    pub router: Router,
    pub identity: Arc<MemoryIdentity>,
    pub store: Arc<MemoryStore>,
    pub sessions: SessionMemoryStore,
}

/// Build the full application router with all middleware layers, backed by
/// fresh in-memory collaborators.
pub fn build_test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    build_test_app_with_store(Arc::clone(&store) as Arc<dyn DataStore>, store)
}

/// Same as [`build_test_app`] but the router talks to `store`; the returned
/// `MemoryStore` handle is only used for assertions.
pub fn build_test_app_with_store(store: Arc<dyn DataStore>, memory: Arc<MemoryStore>) -> TestApp {
    let config = test_config();
    let identity = Arc::new(MemoryIdentity::new(config.oauth_providers.clone()));
    let sessions = SessionMemoryStore::new();

    let state = AppState {
        config: Arc::new(config.clone()),
        identity: Arc::clone(&identity) as _,
        store,
        sessions: sessions.clone(),
    };

    TestApp {
        router: build_app_router(state, &config),
        identity,
        store: memory,
        sessions,
    }
}

pub fn principal(name: &str, email: &str) -> Principal {
    Principal {
        id: Uuid::new_v4(),
        email: Some(email.to_string()),
        name: Some(name.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn with_cookie(builder: axum::http::request::Builder, cookie: Option<&str>) -> axum::http::request::Builder {
    match cookie {
        Some(cookie) => builder.header(COOKIE, cookie),
        None => builder,
    }
}

pub async fn get(app: &TestApp, uri: &str, cookie: Option<&str>) -> Response {
    let request = with_cookie(Request::builder().method(Method::GET).uri(uri), cookie)
        .body(Body::empty())
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: &TestApp, uri: &str, cookie: Option<&str>, body: &str) -> Response {
    let request = with_cookie(Request::builder().method(Method::POST).uri(uri), cookie)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("response should redirect")
        .to_str()
        .unwrap()
}

/// The full `Set-Cookie` header of the response.
pub fn set_cookie(response: &Response) -> &str {
    response
        .headers()
        .get(SET_COOKIE)
        .expect("response should set a cookie")
        .to_str()
        .unwrap()
}

/// The `name=value` part of the response's `Set-Cookie` header.
pub fn cookie_pair(response: &Response) -> String {
    set_cookie(response).split(';').next().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Flows
// ---------------------------------------------------------------------------

/// Run the full OAuth round trip for `principal` and return the session
/// cookie to send on later requests.
pub async fn sign_in(app: &TestApp, principal: &Principal) -> String {
    sign_in_with(app, principal, None).await
}

/// Like [`sign_in`] but starts from an existing (possibly expired) session.
pub async fn sign_in_with(app: &TestApp, principal: &Principal, cookie: Option<&str>) -> String {
    let start = get(app, "/auth/google", cookie).await;
    assert_eq!(start.status(), axum::http::StatusCode::SEE_OTHER);
    let pending = cookie_pair(&start);

    let code = app.identity.issue_code(principal.clone()).await;
    let callback = get(app, &format!("/auth/callback?code={code}"), Some(&pending)).await;
    assert_eq!(callback.status(), axum::http::StatusCode::SEE_OTHER);
    assert_eq!(location(&callback), "/dashboard");
    cookie_pair(&callback)
}
