use async_trait::async_trait;
use storage::{
    Database,
    error::Result,
    models::{Problem, ScoredAnswer, Team},
    repository::{answer::AnswerRepository, problem::ProblemRepository, team::TeamRepository},
};

/// Source of the three collections a collection cycle reads.
///
/// Each call returns the full table. Nothing guarantees that two calls observe
/// the same version of the store.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list_teams(&self) -> Result<Vec<Team>>;

    async fn list_problems(&self) -> Result<Vec<Problem>>;

    async fn list_answers(&self) -> Result<Vec<ScoredAnswer>>;
}

/// The score server's PostgreSQL database
pub struct PgStore {
    db: Database,
}

impl PgStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DataStore for PgStore {
    async fn list_teams(&self) -> Result<Vec<Team>> {
        TeamRepository::new(self.db.pool()).list().await
    }

    async fn list_problems(&self) -> Result<Vec<Problem>> {
        ProblemRepository::new(self.db.pool()).list().await
    }

    async fn list_answers(&self) -> Result<Vec<ScoredAnswer>> {
        AnswerRepository::new(self.db.pool()).list_scored().await
    }
}
