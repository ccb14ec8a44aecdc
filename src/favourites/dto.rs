use serde::{Deserialize, Serialize};

use crate::catalog::repo_types::{Character, Planet};

/// Any `user_id` in the body is ignored; the owner comes from the token.
#[derive(Debug, Deserialize)]
pub struct FavouritePlanetRequest {
    pub planet_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct FavouriteCharacterRequest {
    pub character_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct FavouritesResponse {
    pub planets: Vec<Planet>,
    pub characters: Vec<Character>,
}
