/// Axum webserver lifecycle
///
/// Startup, bind diagnostics, and graceful shutdown via a process-wide
/// notifier (hooked to Ctrl-C in main).
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;

use crate::configs::CONFIGS;
use crate::logger::{self, LogTag};
use crate::webserver::{routes, state::AppState};

/// Global shutdown notifier
static SHUTDOWN_NOTIFY: once_cell::sync::Lazy<Arc<Notify>> =
    once_cell::sync::Lazy::new(|| Arc::new(Notify::new()));

/// Start the webserver; blocks until shutdown
pub async fn start_server(state: Arc<AppState>) -> Result<(), String> {
    let addr: SocketAddr = format!("{}:{}", CONFIGS.host, CONFIGS.port)
        .parse()
        .map_err(|e| format!("Invalid bind address: {}", e))?;

    let app = build_app(state);

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        match e.kind() {
            std::io::ErrorKind::AddrInUse => format!(
                "Failed to bind to {}: address already in use.\n\
                 Another rivalskins instance is probably running; stop it or pick \
                 a different port with --port.",
                addr
            ),
            std::io::ErrorKind::PermissionDenied => format!(
                "Failed to bind to {}: permission denied. Ports below 1024 need \
                 elevated privileges; pick a higher port.",
                addr
            ),
            _ => format!("Failed to bind to {}: {}", addr, e),
        }
    })?;

    logger::info(
        LogTag::Webserver,
        &format!("Listening on http://{} (API under /api)", addr),
    );

    let shutdown_signal = async {
        SHUTDOWN_NOTIFY.notified().await;
        logger::info(LogTag::Webserver, "Shutdown signal received, stopping...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    logger::info(LogTag::Webserver, "Webserver stopped gracefully");
    Ok(())
}

/// Trigger webserver shutdown
pub fn shutdown() {
    SHUTDOWN_NOTIFY.notify_one();
}

/// Build the Axum application with all routes and middleware
fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state).layer(CompressionLayer::new())
}
