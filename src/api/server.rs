//! Router assembly and server lifecycle
//!
//! The server binds the configured port, serves until Ctrl+C or SIGTERM,
//! then finishes in-flight requests before returning. Request handling is
//! traced, and requests that outlive the configured timeout get a 408.

use std::net::SocketAddr;
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use config::HttpConfig;

use super::{handlers, DynUserStore};

/// Build the application router around a store handle
pub fn router(store: DynUserStore, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handlers::info))
        .nest(
            "/v1",
            Router::new()
                .route("/user", post(handlers::create_user))
                .route("/users", get(handlers::list_users))
                .route(
                    "/users/{id}",
                    get(handlers::fetch_user)
                        .patch(handlers::update_user)
                        .delete(handlers::delete_user),
                ),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

/// Serve the user API until a shutdown signal arrives
pub async fn serve(config: &HttpConfig, store: DynUserStore) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(
        store,
        Duration::from_secs(config.request_timeout_seconds),
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(%e, "error installing Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(%e, "error installing SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down gracefully"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down gracefully"),
    }
}
