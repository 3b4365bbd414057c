use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;
use crate::users::repo::{PgUserRepository, UserRepository};
use crate::users::services::UserService;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub users: UserService,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let repo = Arc::new(PgUserRepository::new(db.clone())) as Arc<dyn UserRepository>;
        let users = UserService::new(repo);

        Ok(Self { db, config, users })
    }
}
