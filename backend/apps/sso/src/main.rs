//! SSO Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but request-level
//! errors should use `kernel::error::AppError`.

mod config;

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use auth::{SqliteStorage, auth_router};
use axum::{BoxError, Router, error_handling::HandleErrorLayer};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower::timeout::error::Elapsed;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Env};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;

    init_tracing(config.env);

    tracing::info!(env = %config.env, port = config.rpc_port, "Starting sso");

    // Database connection
    let storage = SqliteStorage::connect(&config.storage_path)
        .await
        .with_context(|| format!("Failed to open {}", config.storage_path.display()))?;

    tracing::info!(path = %config.storage_path.display(), "Connected to database");

    storage
        .migrate()
        .await
        .context("Failed to apply migrations")?;

    // Build router
    let app = auth_router(storage, &config.auth)
        .context("Failed to build auth service")?
        .fallback(unknown_method)
        .layer(TraceLayer::new_for_http());
    let app = with_deadline(app, config.rpc_timeout);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.rpc_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Log format follows the deployment environment; `RUST_LOG` overrides the filter.
fn init_tracing(env: Env) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sso=info,auth=info,tower_http=info".into());

    let registry = tracing_subscriber::registry().with(filter);

    match env {
        Env::Local => registry.with(fmt::layer().pretty()).init(),
        Env::Dev => registry.with(fmt::layer().compact()).init(),
        Env::Prod => registry.with(fmt::layer().json()).init(),
    }
}

async fn unknown_method() -> AppError {
    AppError::not_found("unknown rpc method")
}

/// Abort any request still running after `timeout` with `DEADLINE_EXCEEDED`.
fn with_deadline(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(timeout),
    )
}

async fn handle_timeout(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        tracing::warn!("Request deadline exceeded");
        AppError::new(ErrorKind::DeadlineExceeded, "deadline exceeded")
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        AppError::new(ErrorKind::Internal, "internal error")
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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

    tracing::info!("Shutdown signal received, draining connections");
}
