//! Route handlers

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Json,
    body::{Body, Bytes},
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use futures::StreamExt;
use scanner_stream::StreamRequest;
use tracing::{error, info};

use crate::dto::{ConfigResponse, HealthResponse, StockListQuery, StockListResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/stock_list - Full reference universe
///
/// Never fails for data-availability reasons: provider outages degrade to
/// the last snapshot or an empty list, flagged via `degraded`.
pub async fn stock_list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StockListQuery>,
) -> Json<StockListResponse> {
    let list = state.stock_list.get_list(query.force_refresh).await;
    info!(
        count = list.items.len(),
        degraded = list.degraded,
        "reference list served"
    );
    Json(StockListResponse::from(list))
}

/// POST /api/analyze - Streaming analysis
///
/// Responds with newline-delimited JSON frames: one header, then producer
/// frames in order, then a closing sentinel. The body streams with one
/// frame in flight; an empty code list is rejected before any frame.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StreamRequest>,
) -> Result<Response, ApiError> {
    let frames = state.gateway.open(request)?;

    let lines = frames.filter_map(|frame| async move {
        match serde_json::to_vec(&frame) {
            Ok(mut line) => {
                line.push(b'\n');
                Some(Ok::<Bytes, Infallible>(Bytes::from(line)))
            }
            Err(err) => {
                error!(error = %err, "failed to encode stream frame, dropping it");
                None
            }
        }
    });

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        Body::from_stream(lines),
    )
        .into_response())
}

/// GET /api/config - Frontend defaults
pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<ConfigResponse> {
    let config = &state.config;
    Json(ConfigResponse {
        announcement: config.announcement.clone(),
        default_api_url: config.gateway.api_base.clone(),
        default_api_model: config.gateway.model.clone(),
        default_api_timeout: config.gateway.timeout_secs.to_string(),
    })
}

/// GET /api/health - Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
