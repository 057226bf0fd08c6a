use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, State},
    http::{Method, StatusCode},
    routing::{get, patch},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use garden_shared::constants::{API_BASE_PATH, MSG_PLANT_DELETED};
use garden_shared::{ApiMessage, NewPlant, Plant, PlantId, PlantPatch};
use garden_store::PlantStore;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::service::PlantService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PlantService>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn PlantStore>, config: ServerConfig) -> Self {
        Self {
            service: Arc::new(PlantService::new(store)),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    let plants = Router::new()
        .route("/plants", get(list_plants).post(create_plant))
        .route(
            "/plants/:id",
            get(get_plant).put(update_plant).delete(delete_plant),
        )
        .route("/plants/:id/water", patch(water_plant));

    Router::new()
        .route("/health", get(health_check))
        .nest(API_BASE_PATH, plants)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    store: &'static str,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store: state.service.backend(),
    })
}

/// Path ids are matched numerically. Anything that is not a plain unsigned
/// integer cannot name a plant, so it is reported as not found.
fn parse_id(raw: &str) -> Result<PlantId, ApiError> {
    raw.trim().parse().map_err(|_| ApiError::NotFound)
}

async fn list_plants(State(state): State<AppState>) -> Result<Json<Vec<Plant>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Plant>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get(id).await?))
}

async fn create_plant(
    State(state): State<AppState>,
    payload: Result<Json<NewPlant>, JsonRejection>,
) -> Result<(StatusCode, Json<Plant>), ApiError> {
    let Json(new) = payload?;
    let plant = state.service.create(new).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

async fn update_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PlantPatch>, JsonRejection>,
) -> Result<Json<Plant>, ApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload?;
    Ok(Json(state.service.update(id, patch).await?))
}

async fn water_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Plant>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.water(id).await?))
}

async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiMessage>, ApiError> {
    let id = parse_id(&id)?;
    state.service.delete(id).await?;
    Ok(Json(ApiMessage::new(MSG_PLANT_DELETED)))
}

pub async fn serve(state: AppState, addr: std::net::SocketAddr) -> anyhow::Result<()> {
    let app = build_router(state);

    info!(addr = %addr, "Starting HTTP API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
