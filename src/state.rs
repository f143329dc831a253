use std::sync::Arc;

use anyhow::Context;
use sqlx::PgPool;

use crate::auth::services::Authenticator;
use crate::config::AppConfig;
use crate::store::{CredentialStore, PgStore};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth: Authenticator,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let store = Arc::new(PgStore::new(db.clone())) as Arc<dyn CredentialStore>;

        Ok(Self {
            db,
            auth: Authenticator::new(store),
            config,
        })
    }
}
