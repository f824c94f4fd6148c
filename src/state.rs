use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
    mailer::{LogMailer, Mailer},
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub config: Arc<AppConfig>,
    pub cookie_key: Key,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self::with_mailer(pool, config, Arc::new(LogMailer))
    }

    pub fn with_mailer(pool: DbPool, config: AppConfig, mailer: Arc<dyn Mailer>) -> Self {
        let orm = orm_from_pool(&pool);
        let cookie_key = session_key(&config.session_secret);
        Self {
            pool,
            orm,
            config: Arc::new(config),
            cookie_key,
            mailer,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Signing keys need 64 bytes; stretch the configured secret to that length.
fn session_key(secret: &str) -> Key {
    let digest = Sha512::digest(secret.as_bytes());
    Key::from(digest.as_slice())
}
