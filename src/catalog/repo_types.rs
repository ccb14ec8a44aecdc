use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub climate: String,
    pub population: i64,
    pub orbital_period: i32,
    pub diameter: i32,
}

#[derive(Debug, Clone)]
pub struct NewPlanet {
    pub name: String,
    pub climate: String,
    pub population: i64,
    pub orbital_period: i32,
    pub diameter: i32,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq, Eq)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub birth_year: String,
    pub height: i32,
    pub skin_color: String,
    pub eye_color: String,
}

#[derive(Debug, Clone)]
pub struct NewCharacter {
    pub name: String,
    pub birth_year: String,
    pub height: i32,
    pub skin_color: String,
    pub eye_color: String,
}
