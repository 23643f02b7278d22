//! In-memory store and fixtures for the service tests.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use sqlx::types::Json;
use storage::{
    error::{Result, StorageError},
    models::{Answer, Config, Problem, ProblemEnvironment},
};
use uuid::Uuid;

use crate::store::VmdbStore;

#[derive(Default)]
pub(crate) struct MemoryStore {
    pub(crate) environments: Vec<ProblemEnvironment>,
    pub(crate) answers: Vec<Answer>,
    pub(crate) problems: Vec<Problem>,
    pub(crate) configs: Vec<Config>,
}

#[async_trait]
impl VmdbStore for MemoryStore {
    async fn list_environments(&self) -> Result<Vec<ProblemEnvironment>> {
        Ok(self.environments.clone())
    }

    async fn find_environment(&self, name: &str) -> Result<ProblemEnvironment> {
        self.environments
            .iter()
            .find(|e| e.name == name)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_answer(&self, id: Uuid) -> Result<Answer> {
        self.answers
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_latest_answer(&self, problem_id: Uuid, team_id: Uuid) -> Result<Option<Answer>> {
        Ok(self
            .answers
            .iter()
            .filter(|a| a.problem_id == problem_id && a.team_id == team_id)
            .max_by_key(|a| a.created_at)
            .cloned())
    }

    async fn list_unconfirmed_answers(&self, problem_id: Uuid) -> Result<Vec<Answer>> {
        let mut answers: Vec<Answer> = self
            .answers
            .iter()
            .filter(|a| a.problem_id == problem_id && !a.confirming)
            .cloned()
            .collect();
        answers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(answers)
    }

    async fn find_problem(&self, id: Uuid) -> Result<Problem> {
        self.problems
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_problem_by_code(&self, code: &str) -> Result<Problem> {
        self.problems
            .iter()
            .find(|p| p.code == code)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_config(&self, key: &str) -> Result<Config> {
        self.configs
            .iter()
            .find(|c| c.key == key)
            .cloned()
            .ok_or(StorageError::NotFound)
    }
}

fn contest_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 2)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub(crate) fn problem(code: &str) -> Problem {
    Problem {
        id: Uuid::new_v4(),
        code: code.to_string(),
        title: format!("{} title", code),
    }
}

pub(crate) fn environment(name: &str, problem: &Problem, team_id: Option<Uuid>) -> ProblemEnvironment {
    ProblemEnvironment {
        id: Uuid::new_v4(),
        inner_status: None,
        host: "192.0.2.10".to_string(),
        user: "player".to_string(),
        password: "secret".to_string(),
        problem_id: problem.id,
        team_id,
        secret_text: String::new(),
        name: name.to_string(),
        service: "SSH".to_string(),
        port: 22,
        created_at: contest_start(),
        updated_at: contest_start(),
    }
}

/// An answer submitted `minute` minutes after the contest started.
pub(crate) fn answer(problem: &Problem, team_id: Uuid, body: &str, minute: i64) -> Answer {
    let at = contest_start() + TimeDelta::minutes(minute);
    Answer {
        id: Uuid::new_v4(),
        team_id,
        problem_id: problem.id,
        bodies: Json(vec![vec![body.to_string()]]),
        confirming: false,
        created_at: at,
        updated_at: at,
    }
}

/// A config entry whose JSONB value is the string `value`.
pub(crate) fn config(key: &str, value: &str) -> Config {
    Config {
        id: Uuid::new_v4(),
        key: key.to_string(),
        value: format!("{:?}", value),
    }
}
