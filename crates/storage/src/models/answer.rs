use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

/// An answer as seen by scoring: the submission joined with its score.
///
/// `point` is `None` while the answer has not been graded, which is distinct
/// from a graded answer worth zero points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ScoredAnswer {
    pub id: Uuid,
    pub team_id: Uuid,
    pub problem_id: Uuid,
    pub point: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
}

impl ScoredAnswer {
    pub fn is_graded(&self) -> bool {
        self.point.is_some()
    }
}

/// A full answer record including the submitted bodies.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Answer {
    pub id: Uuid,
    pub team_id: Uuid,
    pub problem_id: Uuid,
    pub bodies: Json<Vec<Vec<String>>>,
    pub confirming: bool,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl Answer {
    /// All body lines of every question, in order, joined by newlines.
    pub fn flattened_body(&self) -> String {
        self.bodies
            .iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
