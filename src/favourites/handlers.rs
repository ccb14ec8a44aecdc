use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use tracing::{debug, info, instrument};

use super::{
    dto::{FavouriteCharacterRequest, FavouritePlanetRequest, FavouritesResponse},
    repo::FavouriteRepo,
};
use crate::{
    auth::AuthUser,
    catalog::repo::{CharacterRepo, PlanetRepo},
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn favourite_routes() -> Router<AppState> {
    Router::new()
        .route("/favourites", get(list_favourites))
        .route("/favourite_planet", post(add_planet))
        .route("/favourite_planet/:planet_id", delete(remove_planet))
        .route("/favourite_character", post(add_character))
        .route("/favourite_character/:character_id", delete(remove_character))
}

#[instrument(skip(state))]
pub async fn list_favourites(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<FavouritesResponse>> {
    let planets = state.store.favourite_planets(user_id).await?;
    let characters = state.store.favourite_characters(user_id).await?;
    Ok(Json(FavouritesResponse {
        planets,
        characters,
    }))
}

#[instrument(skip(state, payload))]
pub async fn add_planet(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<FavouritePlanetRequest>, JsonRejection>,
) -> ApiResult<&'static str> {
    let Json(payload) = payload?;
    let planet_id = payload
        .planet_id
        .ok_or_else(|| ApiError::bad_request("You need to specify the planet_id"))?;

    if state.store.get_planet(planet_id).await?.is_none() {
        return Err(ApiError::not_found("Planet not found"));
    }

    if state.store.add_favourite_planet(user_id, planet_id).await? {
        info!(user_id, planet_id, "favourite planet added");
    } else {
        debug!(user_id, planet_id, "favourite planet already present");
    }
    Ok("ok")
}

#[instrument(skip(state))]
pub async fn remove_planet(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(planet_id): Path<i64>,
) -> ApiResult<&'static str> {
    if !state.store.remove_favourite_planet(user_id, planet_id).await? {
        return Err(ApiError::not_found("Favourite planet not found"));
    }
    info!(user_id, planet_id, "favourite planet removed");
    Ok("ok")
}

#[instrument(skip(state, payload))]
pub async fn add_character(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<FavouriteCharacterRequest>, JsonRejection>,
) -> ApiResult<&'static str> {
    let Json(payload) = payload?;
    let character_id = payload
        .character_id
        .ok_or_else(|| ApiError::bad_request("You need to specify the character_id"))?;

    if state.store.get_character(character_id).await?.is_none() {
        return Err(ApiError::not_found("Character not found"));
    }

    if state.store.add_favourite_character(user_id, character_id).await? {
        info!(user_id, character_id, "favourite character added");
    } else {
        debug!(user_id, character_id, "favourite character already present");
    }
    Ok("ok")
}

#[instrument(skip(state))]
pub async fn remove_character(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(character_id): Path<i64>,
) -> ApiResult<&'static str> {
    if !state.store.remove_favourite_character(user_id, character_id).await? {
        return Err(ApiError::not_found("Favourite character not found"));
    }
    info!(user_id, character_id, "favourite character removed");
    Ok("ok")
}
