use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use server_api::{
    list_flashcards, list_scores, load_flashcards, save_flashcards, save_score, ApiContext,
};
use shared::{
    error::{ApiError, ErrorCode},
    protocol::{
        DeckListResponse, DeckPayload, ScoreListResponse, LIST_FLASHCARDS_ROUTE,
        LIST_SCORES_ROUTE, LOAD_FLASHCARDS_ROUTE, SAVE_FLASHCARDS_ROUTE, SAVE_SCORES_ROUTE,
    },
};
use storage::DeckStore;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

type Rejection = (StatusCode, String);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = AppState {
        api: ApiContext::new(DeckStore::new()),
    };
    let app = build_router(Arc::new(state), settings.max_body_bytes);

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(SAVE_FLASHCARDS_ROUTE, post(http_save_flashcards))
        .route(SAVE_SCORES_ROUTE, post(http_save_scores))
        .route(LIST_FLASHCARDS_ROUTE, get(http_list_flashcards))
        .route(LIST_SCORES_ROUTE, get(http_list_scores))
        .route(LOAD_FLASHCARDS_ROUTE, get(http_load_flashcards))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Bodies that are empty or not JSON are treated as an empty request, so they fail on the
/// first required field like any other incomplete body.
fn json_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

fn reject(route: &'static str, err: ApiError) -> Rejection {
    let status = match err.code {
        ErrorCode::InvalidArgument | ErrorCode::DuplicateName => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidState => StatusCode::CONFLICT,
    };
    warn!(route, status = status.as_u16(), reason = %err.message, "request rejected");
    (status, err.message)
}

async fn http_save_flashcards(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<String, Rejection> {
    save_flashcards(&state.api, &json_body(&body)).map_err(|e| reject(SAVE_FLASHCARDS_ROUTE, e))
}

async fn http_save_scores(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<String, Rejection> {
    save_score(&state.api, &json_body(&body)).map_err(|e| reject(SAVE_SCORES_ROUTE, e))
}

async fn http_list_flashcards(State(state): State<Arc<AppState>>) -> Json<DeckListResponse> {
    Json(list_flashcards(&state.api))
}

async fn http_list_scores(State(state): State<Arc<AppState>>) -> Json<ScoreListResponse> {
    Json(list_scores(&state.api))
}

/// When `name` is repeated in the query string the first value is used.
async fn http_load_flashcards(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<DeckPayload>, Rejection> {
    let name = params
        .iter()
        .find(|(key, _)| key == "name")
        .map(|(_, value)| value.as_str());
    load_flashcards(&state.api, name)
        .map(Json)
        .map_err(|e| reject(LOAD_FLASHCARDS_ROUTE, e))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
