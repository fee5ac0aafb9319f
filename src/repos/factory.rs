/*
 * Responsibility
 * - Config から UserRepo の実装を選ぶ
 *   - MONGO_URL なし → InMemoryUserRepo (warn ログ)
 *   - postgres:// / postgresql:// → PgUserRepo (connect_lazy)
 *   - それ以外のスキーム → ConfigError::Invalid
 */
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use crate::config::{Config, ConfigError};
use crate::repos::{InMemoryUserRepo, PgUserRepo, UserRepo};

pub fn build_user_repo(config: &Config) -> Result<Arc<dyn UserRepo>, ConfigError> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("MONGO_URL is not set; using an empty in-memory user store");
        return Ok(Arc::new(InMemoryUserRepo::default()));
    };

    if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
        return Err(ConfigError::Invalid("MONGO_URL"));
    }

    // Lazy: the first lookup opens the connection, so startup does not wait on the DB
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(url)
        .map_err(|_| ConfigError::Invalid("MONGO_URL"))?;

    Ok(Arc::new(PgUserRepo::new(pool)))
}
