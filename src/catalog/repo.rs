use async_trait::async_trait;

use super::repo_types::{Character, NewCharacter, NewPlanet, Planet};
use crate::store::{PgStore, StoreResult};

#[async_trait]
pub trait PlanetRepo: Send + Sync {
    async fn list_planets(&self) -> StoreResult<Vec<Planet>>;
    async fn get_planet(&self, id: i64) -> StoreResult<Option<Planet>>;
    async fn create_planet(&self, planet: NewPlanet) -> StoreResult<Planet>;
}

#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn list_characters(&self) -> StoreResult<Vec<Character>>;
    async fn get_character(&self, id: i64) -> StoreResult<Option<Character>>;
    async fn create_character(&self, character: NewCharacter) -> StoreResult<Character>;
}

#[async_trait]
impl PlanetRepo for PgStore {
    async fn list_planets(&self) -> StoreResult<Vec<Planet>> {
        let rows = sqlx::query_as::<_, Planet>(
            r#"
            SELECT id, name, climate, population, orbital_period, diameter
            FROM planets
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_planet(&self, id: i64) -> StoreResult<Option<Planet>> {
        let row = sqlx::query_as::<_, Planet>(
            r#"
            SELECT id, name, climate, population, orbital_period, diameter
            FROM planets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_planet(&self, p: NewPlanet) -> StoreResult<Planet> {
        let row = sqlx::query_as::<_, Planet>(
            r#"
            INSERT INTO planets (name, climate, population, orbital_period, diameter)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, climate, population, orbital_period, diameter
            "#,
        )
        .bind(p.name)
        .bind(p.climate)
        .bind(p.population)
        .bind(p.orbital_period)
        .bind(p.diameter)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl CharacterRepo for PgStore {
    async fn list_characters(&self) -> StoreResult<Vec<Character>> {
        let rows = sqlx::query_as::<_, Character>(
            r#"
            SELECT id, name, birth_year, height, skin_color, eye_color
            FROM characters
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_character(&self, id: i64) -> StoreResult<Option<Character>> {
        let row = sqlx::query_as::<_, Character>(
            r#"
            SELECT id, name, birth_year, height, skin_color, eye_color
            FROM characters
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create_character(&self, c: NewCharacter) -> StoreResult<Character> {
        let row = sqlx::query_as::<_, Character>(
            r#"
            INSERT INTO characters (name, birth_year, height, skin_color, eye_color)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, birth_year, height, skin_color, eye_color
            "#,
        )
        .bind(c.name)
        .bind(c.birth_year)
        .bind(c.height)
        .bind(c.skin_color)
        .bind(c.eye_color)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
