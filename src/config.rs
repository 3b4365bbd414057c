use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // DATABASE_URL wins; otherwise the DSN is assembled from parts.
        let database_url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let db_host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
                let db_port = std::env::var("DB_PORT").unwrap_or_else(|_| "5432".into());
                let db_user = std::env::var("DB_USER").unwrap_or_else(|_| "postgres".into());
                let db_pass = std::env::var("DB_PASSWORD").unwrap_or_else(|_| "postgres".into());
                let db_name = std::env::var("DB_NAME").unwrap_or_else(|_| "lean_api".into());
                format!("postgres://{db_user}:{db_pass}@{db_host}:{db_port}/{db_name}")
            }
        };

        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(8080);

        Ok(Self {
            database_url,
            host,
            port,
        })
    }
}
