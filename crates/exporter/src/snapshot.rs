use std::collections::HashSet;
use std::sync::Arc;

use storage::models::{Problem, ScoredAnswer, Team};

use crate::error::{CollectError, Result};
use crate::store::DataStore;

/// Team names that never show up in metrics: staff, test and observer accounts.
pub const DEFAULT_IGNORED_TEAMS: &str = "staff,team99,audience";

/// One cycle's view of the store.
///
/// The three collections are read one after the other, so `answers` may refer
/// to teams or problems missing from the other two lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub teams: Vec<Team>,
    pub problems: Vec<Problem>,
    pub answers: Vec<ScoredAnswer>,
}

/// Team names excluded from every snapshot
#[derive(Debug, Clone)]
pub struct Denylist {
    names: HashSet<String>,
}

impl Denylist {
    pub fn from_comma_separated(names: &str) -> Self {
        let names = names
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for Denylist {
    fn default() -> Self {
        Self::from_comma_separated(DEFAULT_IGNORED_TEAMS)
    }
}

/// Reads a fresh [`Snapshot`] from the store on every call.
pub struct SnapshotFetcher {
    store: Arc<dyn DataStore>,
    denylist: Denylist,
}

impl SnapshotFetcher {
    pub fn new(store: Arc<dyn DataStore>, denylist: Denylist) -> Self {
        Self { store, denylist }
    }

    /// List teams, leaving out denylisted ones
    pub async fn list_teams(&self) -> Result<Vec<Team>> {
        let mut teams = self
            .store
            .list_teams()
            .await
            .map_err(|source| CollectError::StoreUnavailable {
                what: "teams",
                source,
            })?;

        teams.retain(|team| !self.denylist.contains(&team.name));
        Ok(teams)
    }

    pub async fn list_problems(&self) -> Result<Vec<Problem>> {
        self.store
            .list_problems()
            .await
            .map_err(|source| CollectError::StoreUnavailable {
                what: "problems",
                source,
            })
    }

    /// List every answer, graded or not, whatever team or problem it refers to
    pub async fn list_answers(&self) -> Result<Vec<ScoredAnswer>> {
        self.store
            .list_answers()
            .await
            .map_err(|source| CollectError::StoreUnavailable {
                what: "answers",
                source,
            })
    }

    pub async fn fetch(&self) -> Result<Snapshot> {
        let teams = self.list_teams().await?;
        let problems = self.list_problems().await?;
        let answers = self.list_answers().await?;

        Ok(Snapshot {
            teams,
            problems,
            answers,
        })
    }
}
