use async_trait::async_trait;
use sqlx::PgPool;
use storage::{
    error::Result,
    models::{Answer, Config, Problem, ProblemEnvironment},
    repository::{
        answer::AnswerRepository, config::ConfigRepository, problem::ProblemRepository,
        problem_environment::ProblemEnvironmentRepository,
    },
};
use uuid::Uuid;

/// Reads the API services need from the score server database
#[async_trait]
pub trait VmdbStore: Send + Sync {
    async fn list_environments(&self) -> Result<Vec<ProblemEnvironment>>;

    async fn find_environment(&self, name: &str) -> Result<ProblemEnvironment>;

    async fn find_answer(&self, id: Uuid) -> Result<Answer>;

    async fn find_latest_answer(&self, problem_id: Uuid, team_id: Uuid) -> Result<Option<Answer>>;

    async fn list_unconfirmed_answers(&self, problem_id: Uuid) -> Result<Vec<Answer>>;

    async fn find_problem(&self, id: Uuid) -> Result<Problem>;

    async fn find_problem_by_code(&self, code: &str) -> Result<Problem>;

    async fn find_config(&self, key: &str) -> Result<Config>;
}

#[async_trait]
impl VmdbStore for PgPool {
    async fn list_environments(&self) -> Result<Vec<ProblemEnvironment>> {
        ProblemEnvironmentRepository::new(self).list().await
    }

    async fn find_environment(&self, name: &str) -> Result<ProblemEnvironment> {
        ProblemEnvironmentRepository::new(self).find_by_name(name).await
    }

    async fn find_answer(&self, id: Uuid) -> Result<Answer> {
        AnswerRepository::new(self).find_by_id(id).await
    }

    async fn find_latest_answer(&self, problem_id: Uuid, team_id: Uuid) -> Result<Option<Answer>> {
        AnswerRepository::new(self)
            .find_latest_for(problem_id, team_id)
            .await
    }

    async fn list_unconfirmed_answers(&self, problem_id: Uuid) -> Result<Vec<Answer>> {
        AnswerRepository::new(self)
            .list_unconfirmed_for(problem_id)
            .await
    }

    async fn find_problem(&self, id: Uuid) -> Result<Problem> {
        ProblemRepository::new(self).find_by_id(id).await
    }

    async fn find_problem_by_code(&self, code: &str) -> Result<Problem> {
        ProblemRepository::new(self).find_by_code(code).await
    }

    async fn find_config(&self, key: &str) -> Result<Config> {
        ConfigRepository::new(self).find_by_key(key).await
    }
}
