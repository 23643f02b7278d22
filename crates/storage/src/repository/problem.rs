use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::Problem;

/// Repository for Problem database operations
pub struct ProblemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProblemRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all problems with their titles
    pub async fn list(&self) -> Result<Vec<Problem>> {
        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT p.id, p.code, COALESCE(pb.title, '') AS title
            FROM problems p
            LEFT JOIN problem_bodies pb ON pb.problem_id = p.id
            ORDER BY p.code
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(problems)
    }

    /// Get a problem by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Problem> {
        sqlx::query_as::<_, Problem>(
            r#"
            SELECT p.id, p.code, COALESCE(pb.title, '') AS title
            FROM problems p
            LEFT JOIN problem_bodies pb ON pb.problem_id = p.id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Get a problem by its code
    pub async fn find_by_code(&self, code: &str) -> Result<Problem> {
        sqlx::query_as::<_, Problem>(
            r#"
            SELECT p.id, p.code, COALESCE(pb.title, '') AS title
            FROM problems p
            LEFT JOIN problem_bodies pb ON pb.problem_id = p.id
            WHERE p.code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }
}
