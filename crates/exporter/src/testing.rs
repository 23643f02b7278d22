//! In-memory store and fixtures shared by the unit tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use storage::{
    error::{Result, StorageError},
    models::{Problem, ScoredAnswer, Team},
};
use uuid::Uuid;

use crate::snapshot::Snapshot;
use crate::store::DataStore;

#[derive(Default)]
struct Contents {
    teams: Vec<Team>,
    problems: Vec<Problem>,
    answers: Vec<ScoredAnswer>,
}

/// A store whose tables can be swapped out between cycles, or made to fail.
#[derive(Default)]
pub(crate) struct MemoryStore {
    contents: Mutex<Contents>,
    failing: AtomicBool,
    team_reads: AtomicUsize,
}

impl MemoryStore {
    pub(crate) fn new(teams: Vec<Team>, problems: Vec<Problem>, answers: Vec<ScoredAnswer>) -> Self {
        let store = Self::default();
        store.reset(teams, problems, answers);
        store
    }

    /// Truncate every table and reseed it.
    pub(crate) fn reset(&self, teams: Vec<Team>, problems: Vec<Problem>, answers: Vec<ScoredAnswer>) {
        *self.contents.lock().unwrap() = Contents {
            teams,
            problems,
            answers,
        };
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn team_reads(&self) -> usize {
        self.team_reads.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn list_teams(&self) -> Result<Vec<Team>> {
        self.team_reads.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.contents.lock().unwrap().teams.clone())
    }

    async fn list_problems(&self) -> Result<Vec<Problem>> {
        self.check()?;
        Ok(self.contents.lock().unwrap().problems.clone())
    }

    async fn list_answers(&self) -> Result<Vec<ScoredAnswer>> {
        self.check()?;
        Ok(self.contents.lock().unwrap().answers.clone())
    }
}

pub(crate) fn team(name: &str, organization: &str) -> Team {
    Team {
        id: Uuid::new_v4(),
        name: name.to_string(),
        organization: organization.to_string(),
    }
}

pub(crate) fn problem(code: &str, title: &str) -> Problem {
    Problem {
        id: Uuid::new_v4(),
        code: code.to_string(),
        title: title.to_string(),
    }
}

/// An answer submitted `minute` minutes after the contest started.
pub(crate) fn answer(team: &Team, problem: &Problem, point: Option<i32>, minute: i64) -> ScoredAnswer {
    ScoredAnswer {
        id: Uuid::new_v4(),
        team_id: team.id,
        problem_id: problem.id,
        point,
        created_at: contest_start() + TimeDelta::minutes(minute),
    }
}

pub(crate) fn contest_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 2)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

pub(crate) fn snapshot(teams: &[Team], problems: &[Problem], answers: &[ScoredAnswer]) -> Snapshot {
    Snapshot {
        teams: teams.to_vec(),
        problems: problems.to_vec(),
        answers: answers.to_vec(),
    }
}
