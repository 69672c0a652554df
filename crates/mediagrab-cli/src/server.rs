//! HTTP server exposing the download endpoint

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use mediagrab::{DownloadRequest, DownloadResponse, Downloader};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

/// Message returned when the request body is not the expected JSON
const BAD_BODY_MESSAGE: &str = "Request body must be JSON of the form {\"url\": \"...\"}";

/// Shared server state
#[derive(Clone)]
pub struct AppState {
    downloader: Arc<Downloader>,
}

/// Build the application router
pub fn build_app(downloader: Downloader) -> Router {
    let state = AppState {
        downloader: Arc::new(downloader),
    };

    Router::new()
        .route("/api/download", post(download_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Bind and serve until ctrl-c
pub async fn run_server(addr: SocketAddr, downloader: Downloader) -> std::io::Result<()> {
    let app = build_app(downloader);
    let (listener, bound) = bind(addr).await?;

    tracing::info!("Listening on http://{}", bound);
    tracing::info!("Download endpoint: POST http://{}/api/download", bound);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Bind the listener and report the address actually bound
async fn bind(addr: SocketAddr) -> std::io::Result<(tokio::net::TcpListener, SocketAddr)> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound = listener.local_addr()?;
    Ok((listener, bound))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}

async fn download_handler(
    State(state): State<AppState>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> (StatusCode, Json<DownloadResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected request body");
            return (
                StatusCode::BAD_REQUEST,
                Json(DownloadResponse::failure(BAD_BODY_MESSAGE)),
            );
        }
    };

    let (status, body) = state.downloader.respond(request).await;
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(body))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
