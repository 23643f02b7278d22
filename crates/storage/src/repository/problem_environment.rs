use sqlx::PgPool;

use crate::error::{Result, StorageError};
use crate::models::ProblemEnvironment;

/// Repository for ProblemEnvironment database operations
pub struct ProblemEnvironmentRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProblemEnvironmentRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<ProblemEnvironment>> {
        let environments = sqlx::query_as::<_, ProblemEnvironment>(
            r#"
            SELECT id, status AS inner_status, host, "user", password, problem_id, team_id,
                   COALESCE(secret_text, '') AS secret_text, name, service, port, created_at, updated_at
            FROM problem_environments
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(environments)
    }

    /// Get a problem environment by name
    pub async fn find_by_name(&self, name: &str) -> Result<ProblemEnvironment> {
        sqlx::query_as::<_, ProblemEnvironment>(
            r#"
            SELECT id, status AS inner_status, host, "user", password, problem_id, team_id,
                   COALESCE(secret_text, '') AS secret_text, name, service, port, created_at, updated_at
            FROM problem_environments
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
