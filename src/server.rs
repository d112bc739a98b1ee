//! HTTP Surface
//!
//! Exposes the two view entry points, county zoom, and the rendered
//! state as JSON. Every request goes through the one controller mutex,
//! so renders never overlap.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::data::{Bounds, IndicatorGroup};
use crate::error::AtlasError;
use crate::render::{MapController, MemorySurface, RenderedLayer, ViewState};
use crate::style::Legend;

pub type SharedController = Arc<Mutex<MapController<MemorySurface>>>;

struct ServerError(AtlasError);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AtlasError::UnknownIndicator { .. } | AtlasError::UnknownIndex(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl From<AtlasError> for ServerError {
    fn from(err: AtlasError) -> Self {
        Self(err)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub controller: SharedController,
}

#[derive(Deserialize)]
struct IndicatorRequest {
    group: IndicatorGroup,
    key: String,
}

#[derive(Deserialize)]
struct IndexRequest {
    key: String,
}

#[derive(Deserialize)]
struct ZoomRequest {
    county: String,
}

#[derive(Serialize)]
struct ViewResponse {
    view: ViewState,
    legend: Option<Legend>,
}

#[derive(Serialize)]
struct ZoomResponse {
    matched: bool,
    viewport: Option<Bounds>,
}

fn view_response(controller: &MapController<MemorySurface>) -> ViewResponse {
    ViewResponse {
        view: controller.view().clone(),
        legend: controller.legend(),
    }
}

pub fn router(controller: SharedController) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/view", get(current_view))
        .route("/api/view/indicator", post(show_indicator))
        .route("/api/view/index", post(show_index))
        .route("/api/zoom", post(zoom_to_county))
        .route("/api/legend", get(legend))
        .route("/api/legend.html", get(legend_html))
        .route("/api/layer", get(layers))
        .route("/api/viewport", get(viewport))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { controller })
}

pub async fn serve(controller: SharedController, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Atlas server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(controller)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn current_view(State(state): State<AppState>) -> Json<ViewResponse> {
    let controller = state.controller.lock().await;
    Json(view_response(&controller))
}

async fn show_indicator(
    State(state): State<AppState>,
    Json(req): Json<IndicatorRequest>,
) -> Result<Json<ViewResponse>, ServerError> {
    let mut controller = state.controller.lock().await;
    controller.show_indicator(req.group, &req.key)?;
    Ok(Json(view_response(&controller)))
}

async fn show_index(
    State(state): State<AppState>,
    Json(req): Json<IndexRequest>,
) -> Result<Json<ViewResponse>, ServerError> {
    let mut controller = state.controller.lock().await;
    controller.show_index(&req.key)?;
    Ok(Json(view_response(&controller)))
}

async fn zoom_to_county(State(state): State<AppState>, Json(req): Json<ZoomRequest>) -> Json<ZoomResponse> {
    let mut controller = state.controller.lock().await;
    let matched = controller.zoom_to_county(&req.county);
    Json(ZoomResponse {
        matched,
        viewport: controller.surface().viewport(),
    })
}

async fn legend(State(state): State<AppState>) -> Json<Option<Legend>> {
    let controller = state.controller.lock().await;
    Json(controller.legend())
}

async fn legend_html(State(state): State<AppState>) -> Html<String> {
    let controller = state.controller.lock().await;
    Html(controller.legend().as_ref().map(Legend::to_html).unwrap_or_default())
}

async fn layers(State(state): State<AppState>) -> Json<Vec<RenderedLayer>> {
    let controller = state.controller.lock().await;
    Json(controller.surface().layers().cloned().collect())
}

async fn viewport(State(state): State<AppState>) -> Json<Option<Bounds>> {
    let controller = state.controller.lock().await;
    Json(controller.surface().viewport())
}
