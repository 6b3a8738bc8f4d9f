use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use std::sync::Arc;

use crate::core::config::ServerConfig;
use crate::services::optimizer::{
    ErrorResponse, OptimizeRequest, OptimizeResponse, PromptOptimizer, OPTIMIZE_FAILED_MESSAGE,
};

#[derive(Clone)]
struct AppState {
    optimizer: Arc<dyn PromptOptimizer>,
}

pub fn router(optimizer: Arc<dyn PromptOptimizer>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/optimize", post(optimize_handler))
        .with_state(AppState { optimizer })
}

pub async fn serve(config: &ServerConfig, optimizer: Arc<dyn PromptOptimizer>) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Optimization gateway listening on {}", listener.local_addr()?);

    axum::serve(listener, router(optimizer))
        .await
        .context("Gateway server stopped unexpectedly")?;
    Ok(())
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// Malformed bodies get the same 500 as upstream failures.
async fn optimize_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request: OptimizeRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            error!("Invalid optimize request: {}", e);
            return failure();
        }
    };

    match state.optimizer.optimize(&request.prompt).await {
        Ok(optimized_prompt) => (
            StatusCode::OK,
            Json(OptimizeResponse { optimized_prompt }),
        )
            .into_response(),
        Err(_) => failure(),
    }
}

fn failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: OPTIMIZE_FAILED_MESSAGE.to_string(),
        }),
    )
        .into_response()
}
