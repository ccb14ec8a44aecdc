use std::collections::BTreeSet;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::{StoreError, StoreResult};
use crate::{
    auth::{repo::UserRepo, repo_types::User},
    catalog::{
        repo::{CharacterRepo, PlanetRepo},
        repo_types::{Character, NewCharacter, NewPlanet, Planet},
    },
    favourites::repo::FavouriteRepo,
};

/// Process-local store with the same contract as the Postgres one. Ids start
/// at 1 and rows are never deleted, so an id is its row index plus one.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    planets: Vec<Planet>,
    characters: Vec<Character>,
    favourite_planets: BTreeSet<(i64, i64)>,
    favourite_characters: BTreeSet<(i64, i64)>,
}

fn next_id(len: usize) -> i64 {
    len as i64 + 1
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> StoreResult<User> {
        let mut t = self.tables.write().await;
        if t.users.iter().any(|u| u.email == email) {
            return Err(StoreError::Conflict);
        }
        let user = User {
            id: next_id(t.users.len()),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let t = self.tables.read().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.read().await.users.clone())
    }
}

#[async_trait]
impl PlanetRepo for MemoryStore {
    async fn list_planets(&self) -> StoreResult<Vec<Planet>> {
        Ok(self.tables.read().await.planets.clone())
    }

    async fn get_planet(&self, id: i64) -> StoreResult<Option<Planet>> {
        let t = self.tables.read().await;
        Ok(t.planets.iter().find(|p| p.id == id).cloned())
    }

    async fn create_planet(&self, p: NewPlanet) -> StoreResult<Planet> {
        let mut t = self.tables.write().await;
        let planet = Planet {
            id: next_id(t.planets.len()),
            name: p.name,
            climate: p.climate,
            population: p.population,
            orbital_period: p.orbital_period,
            diameter: p.diameter,
        };
        t.planets.push(planet.clone());
        Ok(planet)
    }
}

#[async_trait]
impl CharacterRepo for MemoryStore {
    async fn list_characters(&self) -> StoreResult<Vec<Character>> {
        Ok(self.tables.read().await.characters.clone())
    }

    async fn get_character(&self, id: i64) -> StoreResult<Option<Character>> {
        let t = self.tables.read().await;
        Ok(t.characters.iter().find(|c| c.id == id).cloned())
    }

    async fn create_character(&self, c: NewCharacter) -> StoreResult<Character> {
        let mut t = self.tables.write().await;
        let character = Character {
            id: next_id(t.characters.len()),
            name: c.name,
            birth_year: c.birth_year,
            height: c.height,
            skin_color: c.skin_color,
            eye_color: c.eye_color,
        };
        t.characters.push(character.clone());
        Ok(character)
    }
}

#[async_trait]
impl FavouriteRepo for MemoryStore {
    async fn add_favourite_planet(&self, user_id: i64, planet_id: i64) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        if !t.users.iter().any(|u| u.id == user_id) || !t.planets.iter().any(|p| p.id == planet_id)
        {
            return Err(StoreError::MissingReference);
        }
        Ok(t.favourite_planets.insert((user_id, planet_id)))
    }

    async fn remove_favourite_planet(&self, user_id: i64, planet_id: i64) -> StoreResult<bool> {
        Ok(self
            .tables
            .write()
            .await
            .favourite_planets
            .remove(&(user_id, planet_id)))
    }

    async fn favourite_planets(&self, user_id: i64) -> StoreResult<Vec<Planet>> {
        let t = self.tables.read().await;
        Ok(t.favourite_planets
            .range((user_id, i64::MIN)..=(user_id, i64::MAX))
            .filter_map(|(_, pid)| t.planets.iter().find(|p| p.id == *pid).cloned())
            .collect())
    }

    async fn add_favourite_character(&self, user_id: i64, character_id: i64) -> StoreResult<bool> {
        let mut t = self.tables.write().await;
        if !t.users.iter().any(|u| u.id == user_id)
            || !t.characters.iter().any(|c| c.id == character_id)
        {
            return Err(StoreError::MissingReference);
        }
        Ok(t.favourite_characters.insert((user_id, character_id)))
    }

    async fn remove_favourite_character(
        &self,
        user_id: i64,
        character_id: i64,
    ) -> StoreResult<bool> {
        Ok(self
            .tables
            .write()
            .await
            .favourite_characters
            .remove(&(user_id, character_id)))
    }

    async fn favourite_characters(&self, user_id: i64) -> StoreResult<Vec<Character>> {
        let t = self.tables.read().await;
        Ok(t.favourite_characters
            .range((user_id, i64::MIN)..=(user_id, i64::MAX))
            .filter_map(|(_, cid)| t.characters.iter().find(|c| c.id == *cid).cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tatooine() -> NewPlanet {
        NewPlanet {
            name: "Tatooine".into(),
            climate: "arid".into(),
            population: 200_000,
            orbital_period: 304,
            diameter: 10_465,
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let store = MemoryStore::default();
        store.create_user("a@x.com", "h").await.unwrap();
        assert!(matches!(
            store.create_user("a@x.com", "h2").await,
            Err(StoreError::Conflict)
        ));
    }

    #[tokio::test]
    async fn ids_are_sequential_from_one() {
        let store = MemoryStore::default();
        let a = store.create_user("a@x.com", "h").await.unwrap();
        let b = store.create_user("b@x.com", "h").await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(store.create_planet(tatooine()).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn favourite_pairs_are_deduplicated() {
        let store = MemoryStore::default();
        let user = store.create_user("a@x.com", "h").await.unwrap();
        let planet = store.create_planet(tatooine()).await.unwrap();

        assert!(store.add_favourite_planet(user.id, planet.id).await.unwrap());
        assert!(!store.add_favourite_planet(user.id, planet.id).await.unwrap());
        assert_eq!(store.favourite_planets(user.id).await.unwrap(), vec![planet]);
    }

    #[tokio::test]
    async fn favourites_are_scoped_to_user() {
        let store = MemoryStore::default();
        let a = store.create_user("a@x.com", "h").await.unwrap();
        let b = store.create_user("b@x.com", "h").await.unwrap();
        let planet = store.create_planet(tatooine()).await.unwrap();

        store.add_favourite_planet(a.id, planet.id).await.unwrap();
        assert!(store.favourite_planets(b.id).await.unwrap().is_empty());
        assert!(!store.remove_favourite_planet(b.id, planet.id).await.unwrap());
        assert!(store.remove_favourite_planet(a.id, planet.id).await.unwrap());
        assert!(store.favourite_planets(a.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn favourite_of_missing_character_is_rejected() {
        let store = MemoryStore::default();
        let user = store.create_user("a@x.com", "h").await.unwrap();
        assert!(matches!(
            store.add_favourite_character(user.id, 99).await,
            Err(StoreError::MissingReference)
        ));
    }
}
