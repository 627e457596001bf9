//! HTTP query surface for map clients.
//!
//! Thin orchestration over the serving pipeline: load → parse → extract →
//! chunk → serialize one page. Every request is independent and idempotent;
//! the only shared mutable state is the token registry behind its mutex.

use crate::chunk;
use crate::config::ServerConfig;
use crate::error::MapError;
use crate::notify::{self, Notifier, TokenStore};
use crate::store::MapStore;
use crate::svg::geometry::{self, ShapeRecord};
use crate::svg::gids::{self, ExclusionRules};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Shared, request-independent server state.
pub struct AppState {
    pub store: Box<dyn MapStore>,
    pub rules: &'static ExclusionRules,
    pub tokens: Mutex<Box<dyn TokenStore>>,
    pub notifier: Box<dyn Notifier>,
    pub config: ServerConfig,
}

pub type SharedState = Arc<AppState>;

impl IntoResponse for MapError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            MapError::NotFound => (StatusCode::NOT_FOUND, "Map not found"),
            MapError::ChunkOutOfRange { .. } => {
                (StatusCode::BAD_REQUEST, "Chunk index out of range")
            }
            MapError::Parse(detail) => {
                error!("svg parse failure: {detail}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            MapError::Io(e) => {
                error!("i/o failure: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Build the router with permissive CORS, matching the original surface.
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/maps/:map_id", get(get_map_chunk))
        .route("/maps/:map_id/gids", get(get_map_gids))
        .route("/tokens", post(register_token))
        .route("/notify", post(send_notification))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: SharedState) -> anyhow::Result<()> {
    use anyhow::Context;

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("map server listening on http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn root() -> &'static str {
    "API is working now!"
}

#[derive(Debug, Deserialize)]
struct ChunkQuery {
    chunk: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MapChunkResponse {
    map_id: String,
    total_chunks: usize,
    chunk_index: usize,
    chunk: String,
}

/// `GET /maps/{mapId}?chunk={n}` — one raw-markup chunk.
async fn get_map_chunk(
    State(state): State<SharedState>,
    Path(map_id): Path<String>,
    Query(query): Query<ChunkQuery>,
) -> Result<Json<MapChunkResponse>, MapError> {
    let index = query.chunk.unwrap_or(0);
    let text = state.store.load(&map_id)?;
    let page = chunk::text_page(&text, state.config.text_chunk_size, index)?;
    Ok(Json(MapChunkResponse {
        map_id,
        total_chunks: page.total,
        chunk_index: page.index,
        chunk: page.content,
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GidsResponse {
    map_id: String,
    g_ids: Vec<String>,
    total_chunks: usize,
    chunk_index: usize,
    paths: Vec<ShapeRecord>,
}

/// `GET /maps/{mapId}/gids?chunk={n}` — one chunk of filtered identifiers
/// plus the path-layer geometry.
async fn get_map_gids(
    State(state): State<SharedState>,
    Path(map_id): Path<String>,
    Query(query): Query<ChunkQuery>,
) -> Result<Json<GidsResponse>, MapError> {
    let index = query.chunk.unwrap_or(0);
    let text = state.store.load(&map_id)?;

    // Parsing a large floor plan is CPU-bound; keep it off the accept path
    // so one big document does not stall other requests.
    let rules = state.rules;
    let container_id = state.config.container_id.clone();
    let (ids, paths) = tokio::task::spawn_blocking(move || -> Result<_, MapError> {
        let tree = crate::svg::parse_svg(&text)?;
        let ids = gids::extract_gids(&tree, rules);
        let paths = geometry::collect_shapes(&tree, &container_id);
        Ok((ids, paths))
    })
    .await
    .map_err(|e| MapError::Parse(format!("extraction task failed: {e}")))??;

    let page = chunk::record_page(&ids, state.config.record_chunk_size, index)?;
    Ok(Json(GidsResponse {
        map_id,
        g_ids: page.content,
        total_chunks: page.total,
        chunk_index: page.index,
        paths,
    }))
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    token: String,
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    registered: bool,
}

/// `POST /tokens` — register a notification destination (dedup on insert).
async fn register_token(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, MapError> {
    let mut store = state.tokens.lock().await;
    let registered = store
        .append(req.token.trim())
        .map_err(std::io::Error::other)?;
    store.flush().map_err(std::io::Error::other)?;
    Ok(Json(RegisterResponse { registered }))
}

#[derive(Debug, Deserialize)]
struct NotifyRequest {
    title: String,
    body: String,
}

#[derive(Debug, Serialize)]
struct NotifyResponse {
    sent: usize,
    failed: usize,
}

/// `POST /notify` — dispatch to every registered destination in batches.
async fn send_notification(
    State(state): State<SharedState>,
    Json(req): Json<NotifyRequest>,
) -> Result<Json<NotifyResponse>, MapError> {
    let tokens = state
        .tokens
        .lock()
        .await
        .read_all()
        .map_err(std::io::Error::other)?;

    let statuses = notify::dispatch(state.notifier.as_ref(), &tokens, &req.title, &req.body);
    let sent = statuses.iter().filter(|s| s.delivered).count();
    Ok(Json(NotifyResponse {
        sent,
        failed: statuses.len() - sent,
    }))
}
