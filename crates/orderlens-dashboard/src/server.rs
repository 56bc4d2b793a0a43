//! HTTP routes for the dashboard

use crate::error::ApiError;
use crate::page::render_page;
use crate::state::{AppState, RangeQuery, Summary};
use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use orderlens_graphs::ChartKind;
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Liveness response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub rows: usize,
}

/// Create the dashboard router with all endpoints
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/charts/:file", get(chart))
        .route("/api/summary", get(summary))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(address = %listener.local_addr()?, "Dashboard listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {:?}", e);
        return;
    }
    info!("Received shutdown signal, starting graceful shutdown");
}

/// The dashboard page for the requested range
async fn index(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Html<String>, ApiError> {
    let range = query.resolve(&state)?;
    let data = state.compute(range);
    let views = state.renderer().render(&data)?;

    Ok(Html(render_page(
        &state.config.dashboard.title,
        &state.i18n,
        &data,
        &views,
    )))
}

/// One chart as SVG, addressed as `/charts/<kind>.svg`
async fn chart(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = file
        .strip_suffix(".svg")
        .and_then(|slug| slug.parse::<ChartKind>().ok())
        .ok_or_else(|| ApiError::NotFound(format!("no chart named '{file}'")))?;

    let range = query.resolve(&state)?;
    let data = state.compute(range);
    let svg = state.renderer().render_chart(kind, &data)?;

    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// Aggregates for the requested range as JSON
async fn summary(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Summary>, ApiError> {
    let range = query.resolve(&state)?;
    Ok(Json(state.summary(range)))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        rows: state.dataset.len(),
    })
}
