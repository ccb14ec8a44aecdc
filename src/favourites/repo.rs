use async_trait::async_trait;

use crate::catalog::repo_types::{Character, Planet};
use crate::store::{PgStore, StoreResult};

/// Per-user favourites. Adding an existing pair is a no-op, so a user holds
/// each planet or character at most once.
#[async_trait]
pub trait FavouriteRepo: Send + Sync {
    /// `true` when a new pair was stored.
    async fn add_favourite_planet(&self, user_id: i64, planet_id: i64) -> StoreResult<bool>;
    /// `true` when a pair was removed.
    async fn remove_favourite_planet(&self, user_id: i64, planet_id: i64) -> StoreResult<bool>;
    async fn favourite_planets(&self, user_id: i64) -> StoreResult<Vec<Planet>>;

    async fn add_favourite_character(&self, user_id: i64, character_id: i64) -> StoreResult<bool>;
    async fn remove_favourite_character(&self, user_id: i64, character_id: i64)
        -> StoreResult<bool>;
    async fn favourite_characters(&self, user_id: i64) -> StoreResult<Vec<Character>>;
}

#[async_trait]
impl FavouriteRepo for PgStore {
    async fn add_favourite_planet(&self, user_id: i64, planet_id: i64) -> StoreResult<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO favourite_planets (user_id, planet_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, planet_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(planet_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn remove_favourite_planet(&self, user_id: i64, planet_id: i64) -> StoreResult<bool> {
        let res = sqlx::query(
            r#"DELETE FROM favourite_planets WHERE user_id = $1 AND planet_id = $2"#,
        )
        .bind(user_id)
        .bind(planet_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn favourite_planets(&self, user_id: i64) -> StoreResult<Vec<Planet>> {
        let rows = sqlx::query_as::<_, Planet>(
            r#"
            SELECT p.id, p.name, p.climate, p.population, p.orbital_period, p.diameter
              FROM favourite_planets f
              JOIN planets p ON p.id = f.planet_id
             WHERE f.user_id = $1
             ORDER BY p.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn add_favourite_character(&self, user_id: i64, character_id: i64) -> StoreResult<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO favourite_characters (user_id, character_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, character_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(character_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn remove_favourite_character(
        &self,
        user_id: i64,
        character_id: i64,
    ) -> StoreResult<bool> {
        let res = sqlx::query(
            r#"DELETE FROM favourite_characters WHERE user_id = $1 AND character_id = $2"#,
        )
        .bind(user_id)
        .bind(character_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn favourite_characters(&self, user_id: i64) -> StoreResult<Vec<Character>> {
        let rows = sqlx::query_as::<_, Character>(
            r#"
            SELECT c.id, c.name, c.birth_year, c.height, c.skin_color, c.eye_color
              FROM favourite_characters f
              JOIN characters c ON c.id = f.character_id
             WHERE f.user_id = $1
             ORDER BY c.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
