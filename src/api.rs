use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, Json, Redirect, Response},
    routing::{get, post},
    Router,
};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::docs::{self, ApiDoc};
use crate::error::{ApiError, ErrorResponse, TRACK_FIELDS_REQUIRED};
use crate::library::{NewTrack, Track, TrackFilter, TrackPatch};
use crate::store::TrackStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<TrackStore>>,
}

impl AppState {
    pub fn new(store: TrackStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrackQuery {
    /// If set, filter by played status (true/false).
    #[param(value_type = Option<bool>)]
    pub played: Option<String>,
    /// Case-insensitive search on title or artist.
    pub q: Option<String>,
}

impl From<TrackQuery> for TrackFilter {
    fn from(query: TrackQuery) -> Self {
        // Anything other than true/false means "no filter".
        let played = query
            .played
            .and_then(|played| match played.to_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            });

        Self {
            played,
            q: query.q.filter(|q| !q.is_empty()),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/tracks", get(get_tracks).post(create_track))
        .route(
            "/tracks/:id",
            get(get_track_by_id).patch(update_track).delete(delete_track),
        )
        .route("/tracks/:id/toggle", post(toggle_track))
        .route("/health", get(health))
        // Documentation routes
        .route(docs::DOCS_PATH, get(docs_page))
        .route(docs::OPENAPI_PATH, get(openapi))
        .route("/", get(|| async { Redirect::to(docs::DOCS_PATH) }))
        .layer(middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let response = next.run(request).await;
    info!("{} {} -> {}", method, path, response.status().as_u16());
    response
}

/// List tracks
///
/// List all tracks, optionally filtering by played status and search query.
#[utoipa::path(
    get,
    path = "/tracks",
    params(TrackQuery),
    responses(
        (status = 200, description = "List of tracks.", body = [Track])
    )
)]
pub async fn get_tracks(
    State(state): State<AppState>,
    Query(params): Query<TrackQuery>,
) -> Json<Vec<Track>> {
    let filter = TrackFilter::from(params);
    let store = state.store.lock().await;
    Json(store.list(&filter))
}

/// Get one track
#[utoipa::path(
    get,
    path = "/tracks/{id}",
    params(("id" = String, Path, description = "Track id")),
    responses(
        (status = 200, description = "The track.", body = Track),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn get_track_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Track>, ApiError> {
    let store = state.store.lock().await;
    store.get(&id).map(Json).ok_or(ApiError::NotFound)
}

/// Add a track
///
/// A missing or unreadable body counts as missing fields.
#[utoipa::path(
    post,
    path = "/tracks",
    request_body = NewTrack,
    responses(
        (status = 201, description = "Created", body = Track),
        (status = 400, description = "Bad request", body = ErrorResponse)
    )
)]
pub async fn create_track(
    State(state): State<AppState>,
    body: Option<Json<NewTrack>>,
) -> Result<(StatusCode, Json<Track>), ApiError> {
    let new_track = body.map(|Json(body)| body).unwrap_or_default();
    if !new_track.is_complete() {
        return Err(ApiError::Validation(TRACK_FIELDS_REQUIRED.to_string()));
    }

    let mut store = state.store.lock().await;
    let created = store.add(new_track);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a track (partial)
///
/// A request without a JSON body is an empty patch; a body that is not a
/// valid patch is rejected.
#[utoipa::path(
    patch,
    path = "/tracks/{id}",
    params(("id" = String, Path, description = "Track id")),
    request_body = TrackPatch,
    responses(
        (status = 200, description = "Updated track", body = Track),
        (status = 400, description = "Malformed patch", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn update_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<TrackPatch>, JsonRejection>,
) -> Result<Json<Track>, ApiError> {
    let patch = match body {
        Ok(Json(patch)) => patch,
        Err(JsonRejection::MissingJsonContentType(_)) => TrackPatch::default(),
        Err(rejection) => return Err(ApiError::Validation(rejection.body_text())),
    };

    let mut store = state.store.lock().await;
    store.update(&id, patch).map(Json).ok_or(ApiError::NotFound)
}

/// Toggle played flag
#[utoipa::path(
    post,
    path = "/tracks/{id}/toggle",
    params(("id" = String, Path, description = "Track id")),
    responses(
        (status = 200, description = "Toggled track", body = Track),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn toggle_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Track>, ApiError> {
    let mut store = state.store.lock().await;
    store.tick_played(&id).map(Json).ok_or(ApiError::NotFound)
}

/// Remove a track
#[utoipa::path(
    delete,
    path = "/tracks/{id}",
    params(("id" = String, Path, description = "Track id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse)
    )
)]
pub async fn delete_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.lock().await;
    if store.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound)
    }
}

/// Basic health check
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

async fn docs_page() -> Html<&'static str> {
    Html(docs::DOCS_HTML)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
