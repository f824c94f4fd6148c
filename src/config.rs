use std::env;

use anyhow::{Context, bail};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub app_env: String,
    pub base_url: String,
    pub session_secret: String,
    pub email_verification: bool,
    pub jwt_refresh_secret: String,
    pub email_from: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let base_url =
            env::var("APP_BASE_URL").unwrap_or_else(|_| format!("http://localhost:{port}"));

        let session_secret = env::var("SESSION_SECRET").unwrap_or_default();
        if session_secret.is_empty() {
            bail!("SESSION_SECRET must be set");
        }

        let email_verification = env::var("EMAIL_VERIFICATION")
            .map(|v| v == "true")
            .unwrap_or(false);
        let jwt_refresh_secret = env::var("JWT_REFRESH_TOKEN")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| session_secret.clone());
        let email_from =
            env::var("EMAIL_FROM").unwrap_or_else(|_| "no-reply@localhost".to_string());

        Ok(Self {
            database_url,
            host,
            port,
            app_env,
            base_url,
            session_secret,
            email_verification,
            jwt_refresh_secret,
            email_from,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == "production"
    }

    /// Config for tests and tools that never read the environment.
    pub fn for_database(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            app_env: "test".to_string(),
            base_url: "http://localhost:3000".to_string(),
            session_secret: "test-session-secret".to_string(),
            email_verification: false,
            jwt_refresh_secret: "test-refresh-secret".to_string(),
            email_from: "no-reply@localhost".to_string(),
        }
    }
}
