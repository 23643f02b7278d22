use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Answer, ScoredAnswer};

/// Repository for Answer database operations
pub struct AnswerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AnswerRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every answer with the point of its score.
    ///
    /// Answers without a score row, or whose score has no point yet, come back
    /// with `point = None`.
    pub async fn list_scored(&self) -> Result<Vec<ScoredAnswer>> {
        let answers = sqlx::query_as::<_, ScoredAnswer>(
            r#"
            SELECT a.id, a.team_id, a.problem_id, s.point, a.created_at
            FROM answers a
            LEFT JOIN scores s ON s.answer_id = a.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(answers)
    }

    /// Get an answer by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Answer> {
        sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, team_id, problem_id, bodies, confirming, created_at, updated_at
            FROM answers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    /// Find the most recent answer a team submitted for a problem
    pub async fn find_latest_for(&self, problem_id: Uuid, team_id: Uuid) -> Result<Option<Answer>> {
        let answer = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, team_id, problem_id, bodies, confirming, created_at, updated_at
            FROM answers
            WHERE problem_id = $1 AND team_id = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(problem_id)
        .bind(team_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(answer)
    }

    /// List answers for a problem that are not yet confirmed, newest first
    pub async fn list_unconfirmed_for(&self, problem_id: Uuid) -> Result<Vec<Answer>> {
        let answers = sqlx::query_as::<_, Answer>(
            r#"
            SELECT id, team_id, problem_id, bodies, confirming, created_at, updated_at
            FROM answers
            WHERE problem_id = $1 AND confirming = FALSE
            ORDER BY created_at DESC
            "#,
        )
        .bind(problem_id)
        .fetch_all(self.pool)
        .await?;

        Ok(answers)
    }
}
