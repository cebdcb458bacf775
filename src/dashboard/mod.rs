//! Dashboard — Axum web server for the handicap explorer.
//!
//! Serves a REST API and a self-contained HTML explorer page.
//! CORS enabled for local development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    response::Html,
    routing::get,
    Router,
};
use tracing::info;

use routes::AppState;

/// The embedded explorer HTML (compiled into the binary).
const EXPLORER_HTML: &str = include_str!("templates/index.html");

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin("*".parse::<HeaderValue>().expect("static origin"))
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/settle", get(routes::get_settle))
        .route("/api/explorer", get(routes::get_explorer))
        .route("/health", get(routes::health))
        .route("/", get(serve_explorer))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until `ctrl_c`.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!(port, "Explorer server listening on http://localhost:{port}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received.");
        })
        .await
        .context("Server error")
}

/// Serve the embedded HTML explorer.
async fn serve_explorer() -> Html<&'static str> {
    Html(EXPLORER_HTML)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
