//! Best-answer selection and score projection.
//!
//! Every cycle recomputes all scores from the snapshot in a single pass over
//! the answers. Ungraded answers never contribute to a score, and answers that
//! refer to a team or problem outside the snapshot are skipped.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use clap::ValueEnum;
use storage::models::{Problem, ScoredAnswer, Team};
use uuid::Uuid;

use crate::snapshot::Snapshot;

/// Which projection of the score board gets published
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ScoreMode {
    /// One score per (team, problem) pair
    #[default]
    PerProblem,
    /// One total score per team
    PerTeam,
}

#[derive(Debug, Default)]
struct PairStats<'a> {
    submitted: usize,
    best: Option<&'a ScoredAnswer>,
}

/// Score of one team on one problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemScore<'a> {
    pub team: &'a Team,
    pub problem: &'a Problem,
    pub best_answer: Option<&'a ScoredAnswer>,
    /// Answers submitted for the pair, graded or not
    pub submitted: usize,
}

impl ProblemScore<'_> {
    pub fn score(&self) -> i64 {
        points_of(self.best_answer)
    }
}

/// Sum of a team's best scores over every problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamScore<'a> {
    pub team: &'a Team,
    pub total: i64,
}

/// Best graded answer of every (team, problem) pair in a snapshot
#[derive(Debug)]
pub struct ScoreBoard<'a> {
    snapshot: &'a Snapshot,
    pairs: HashMap<(Uuid, Uuid), PairStats<'a>>,
}

impl<'a> ScoreBoard<'a> {
    pub fn aggregate(snapshot: &'a Snapshot) -> Self {
        let team_ids: HashSet<Uuid> = snapshot.teams.iter().map(|t| t.id).collect();
        let problem_ids: HashSet<Uuid> = snapshot.problems.iter().map(|p| p.id).collect();

        let mut pairs: HashMap<(Uuid, Uuid), PairStats<'a>> = HashMap::new();
        for answer in &snapshot.answers {
            if !team_ids.contains(&answer.team_id) || !problem_ids.contains(&answer.problem_id) {
                tracing::trace!(answer_id = %answer.id, "skipping answer outside the snapshot");
                continue;
            }

            let stats = pairs
                .entry((answer.team_id, answer.problem_id))
                .or_default();
            stats.submitted += 1;

            if !answer.is_graded() {
                continue;
            }
            match stats.best {
                Some(best) if !outranks(answer, best) => {}
                _ => stats.best = Some(answer),
            }
        }

        Self { snapshot, pairs }
    }

    /// Best graded answer of a team for a problem
    pub fn best_answer(&self, team_id: Uuid, problem_id: Uuid) -> Option<&'a ScoredAnswer> {
        self.pairs
            .get(&(team_id, problem_id))
            .and_then(|stats| stats.best)
    }

    /// Score of a team for a problem; 0 when nothing was graded
    pub fn score(&self, team_id: Uuid, problem_id: Uuid) -> i64 {
        points_of(self.best_answer(team_id, problem_id))
    }

    /// Every team crossed with every problem, in snapshot order
    pub fn per_problem(&self) -> Vec<ProblemScore<'a>> {
        let mut scores =
            Vec::with_capacity(self.snapshot.teams.len() * self.snapshot.problems.len());

        for team in &self.snapshot.teams {
            for problem in &self.snapshot.problems {
                let stats = self.pairs.get(&(team.id, problem.id));
                scores.push(ProblemScore {
                    team,
                    problem,
                    best_answer: stats.and_then(|s| s.best),
                    submitted: stats.map_or(0, |s| s.submitted),
                });
            }
        }

        scores
    }

    /// Total score of every team, in snapshot order
    pub fn per_team(&self) -> Vec<TeamScore<'a>> {
        let mut totals: HashMap<Uuid, i64> = HashMap::new();
        for (&(team_id, _), stats) in &self.pairs {
            *totals.entry(team_id).or_default() += points_of(stats.best);
        }

        self.snapshot
            .teams
            .iter()
            .map(|team| TeamScore {
                team,
                total: totals.get(&team.id).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Project the board the way `mode` asks for.
    pub fn project(&self, mode: ScoreMode) -> Projection<'a> {
        match mode {
            ScoreMode::PerProblem => Projection::PerProblem(self.per_problem()),
            ScoreMode::PerTeam => Projection::PerTeam(self.per_team()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection<'a> {
    PerProblem(Vec<ProblemScore<'a>>),
    PerTeam(Vec<TeamScore<'a>>),
}

fn points_of(answer: Option<&ScoredAnswer>) -> i64 {
    answer.and_then(|a| a.point).map_or(0, i64::from)
}

/// Whether `candidate` should replace `incumbent` as the best answer.
///
/// Higher point wins; equal points go to the earlier submission, then to the
/// smaller answer id, so the result does not depend on answer order.
fn outranks(candidate: &ScoredAnswer, incumbent: &ScoredAnswer) -> bool {
    let order = candidate
        .point
        .cmp(&incumbent.point)
        .then_with(|| incumbent.created_at.cmp(&candidate.created_at))
        .then_with(|| incumbent.id.cmp(&candidate.id));

    order == Ordering::Greater
}
