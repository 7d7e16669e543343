use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fittrack_api::config::ServerConfig;
use fittrack_api::router::build_app_router;
use fittrack_api::session::{SessionMemoryStore, DEFAULT_SWEEP_INTERVAL};
use fittrack_api::state::AppState;
use fittrack_supabase::{AuthClient, RestClient};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // LOG_FORMAT=json switches to one JSON object per line.
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "fittrack_api=debug,fittrack_db=debug,tower_http=debug".into()),
    );
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        backend = %config.supabase.url,
        providers = ?config.oauth_providers,
        "Loaded server configuration"
    );

    // --- Hosted backend ---
    // One connection pool for both the identity and the data API.
    let http = reqwest::Client::new();
    let identity = Arc::new(AuthClient::with_client(
        http.clone(),
        &config.supabase,
        config.oauth_providers.clone(),
    ));
    let store = Arc::new(RestClient::with_client(http, &config.supabase));

    match fittrack_db::health_check(store.as_ref()).await {
        Ok(()) => tracing::info!("Data store health check passed"),
        Err(e) => tracing::warn!(error = %e, "Data store health check failed, continuing"),
    }

    // --- Sessions ---
    // Expired sessions are swept in the background until shutdown.
    let sessions = SessionMemoryStore::new();
    let sweeper_cancel = tokio_util::sync::CancellationToken::new();
    let sweeper_handle = tokio::spawn(
        sessions
            .clone()
            .run_sweeper(DEFAULT_SWEEP_INTERVAL, sweeper_cancel.clone()),
    );
    tracing::info!(
        idle_minutes = config.session_idle_minutes,
        "Session store started"
    );

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        identity,
        store,
        sessions: sessions.clone(),
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, public_url = %config.public_url, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    sweeper_cancel.cancel();
    if let Err(e) = sweeper_handle.await {
        tracing::warn!(error = %e, "Session sweeper did not stop cleanly");
    }

    // Sessions live in memory only; unsaved drafts are lost here.
    let session_count = sessions.len().await;
    tracing::info!(session_count, "Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
