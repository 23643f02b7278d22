use sqlx::PgPool;

use crate::error::Result;
use crate::models::Team;

/// Repository for Team database operations
pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every team, including organizational accounts
    pub async fn list(&self) -> Result<Vec<Team>> {
        let teams = sqlx::query_as::<_, Team>(
            r#"
            SELECT id, name, COALESCE(organization, '') AS organization
            FROM teams
            ORDER BY name
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(teams)
    }
}
