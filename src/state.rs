use std::sync::Arc;

use crate::auth::jwt::JwtKeys;
use crate::config::{AppConfig, JwtConfig};
use crate::store::{self, MemoryStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
    /// Built once from `config.jwt.secret` at startup.
    pub keys: JwtKeys,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let store = store::connect(&config).await?;
        Ok(Self::from_parts(store, config))
    }

    pub fn from_parts(store: Arc<dyn Store>, config: AppConfig) -> Self {
        let keys = JwtKeys::new(&config.jwt);
        Self {
            store,
            config: Arc::new(config),
            keys,
        }
    }

    /// In-memory store and a fixed test secret.
    pub fn fake() -> Self {
        let config = AppConfig {
            database_url: None,
            jwt: JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                ttl_minutes: 5,
                refresh_ttl_minutes: 60,
            },
            host: "127.0.0.1".into(),
            port: 0,
        };
        Self::from_parts(Arc::new(MemoryStore::default()), config)
    }
}
