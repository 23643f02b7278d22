use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::Config;

/// Repository for the score server's key/value configuration
pub struct ConfigRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ConfigRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_key(&self, key: &str) -> Result<Config> {
        sqlx::query_as::<_, Config>(
            r#"
            SELECT id, key, value::text AS value
            FROM configs
            WHERE key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
