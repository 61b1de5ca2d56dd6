//! SSO Server Entry Point
//!
//! Uses `anyhow` for startup errors; request-level errors go through
//! `auth::AuthError` and `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;

use anyhow::Context;
use auth::{SqliteStore, SsoAppState, sso_router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, Env};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.env);

    tracing::info!(?config, "Starting SSO service");

    let store = SqliteStore::connect(&config.storage_path)
        .await
        .with_context(|| format!("opening {}", config.storage_path.display()))?;
    store.migrate().await.context("applying migrations")?;

    let shutdown = CancellationToken::new();
    let state = SsoAppState::new(store.clone(), config.auth_config())
        .with_request_timeout(config.http_timeout)
        .with_shutdown(shutdown.clone());

    let app = sso_router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    store.close().await;
    tracing::info!("SSO service stopped");

    Ok(())
}

fn init_tracing(env: Env) {
    let default_filter = match env {
        Env::Local | Env::Dev => "sso=debug,auth=debug,tower_http=debug",
        Env::Prod => "sso=info,auth=info,tower_http=info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (pretty, json) = match env {
        Env::Local => (Some(tracing_subscriber::fmt::layer()), None),
        Env::Dev | Env::Prod => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .init();
}

/// Resolves on SIGINT or SIGTERM, cancelling every in-flight request
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
