use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    auth::repo::UserRepo,
    catalog::repo::{CharacterRepo, PlanetRepo},
    config::AppConfig,
    favourites::repo::FavouriteRepo,
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("record already exists")]
    Conflict,
    /// A foreign key pointed at a row that does not exist.
    #[error("referenced record does not exist")]
    MissingReference,
    #[error(transparent)]
    Database(sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return StoreError::Conflict;
            }
            if db.is_foreign_key_violation() {
                return StoreError::MissingReference;
            }
        }
        StoreError::Database(e)
    }
}

/// Everything the handlers need from persistence.
pub trait Store: UserRepo + PlanetRepo + CharacterRepo + FavouriteRepo {}

impl<T> Store for T where T: UserRepo + PlanetRepo + CharacterRepo + FavouriteRepo {}

/// Opens Postgres when a database URL is configured, otherwise falls back to
/// the in-memory store.
pub async fn connect(config: &AppConfig) -> anyhow::Result<Arc<dyn Store>> {
    match &config.database_url {
        Some(url) => {
            let store = PgStore::connect(url).await?;
            store.migrate().await?;
            info!("connected to postgres");
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set; using in-memory store, data is lost on exit");
            Ok(Arc::new(MemoryStore::default()))
        }
    }
}
