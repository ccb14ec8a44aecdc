use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};

use super::{
    dto::{CreateCharacterRequest, CreatePlanetRequest},
    repo::{CharacterRepo, PlanetRepo},
    repo_types::{Character, Planet},
};
use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn planet_routes() -> Router<AppState> {
    Router::new()
        .route("/planets", get(list_planets).post(create_planet))
        .route("/planets/:id", get(get_planet))
}

pub fn character_routes() -> Router<AppState> {
    Router::new()
        .route("/characters", get(list_characters).post(create_character))
        .route("/characters/:id", get(get_character))
}

#[instrument(skip(state))]
pub async fn list_planets(State(state): State<AppState>) -> ApiResult<Json<Vec<Planet>>> {
    Ok(Json(state.store.list_planets().await?))
}

#[instrument(skip(state))]
pub async fn get_planet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Planet>> {
    state
        .store
        .get_planet(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Planet not found"))
}

#[instrument(skip(state, payload))]
pub async fn create_planet(
    State(state): State<AppState>,
    payload: Result<Json<CreatePlanetRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Planet>)> {
    let Json(payload) = payload?;
    let planet = state.store.create_planet(payload.validate()?).await?;
    info!(planet_id = planet.id, name = %planet.name, "planet created");
    Ok((StatusCode::CREATED, Json(planet)))
}

#[instrument(skip(state))]
pub async fn list_characters(State(state): State<AppState>) -> ApiResult<Json<Vec<Character>>> {
    Ok(Json(state.store.list_characters().await?))
}

#[instrument(skip(state))]
pub async fn get_character(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Character>> {
    state
        .store
        .get_character(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Character not found"))
}

#[instrument(skip(state, payload))]
pub async fn create_character(
    State(state): State<AppState>,
    payload: Result<Json<CreateCharacterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Character>)> {
    let Json(payload) = payload?;
    let character = state.store.create_character(payload.validate()?).await?;
    info!(character_id = character.id, name = %character.name, "character created");
    Ok((StatusCode::CREATED, Json(character)))
}
