use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Answer, Problem};

/// Query parameters for looking up the latest answer behind an environment
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
pub struct AnswerIdQuery {
    /// Problem environment name
    #[serde(default)]
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerIdResponse {
    pub id: Uuid,
}

/// An answer with its bodies flattened into a single text block
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnswerResponse {
    pub id: Uuid,
    pub problem_id: Uuid,
    pub problem_code: String,
    pub team_id: Uuid,
    pub body: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl AnswerResponse {
    pub fn new(answer: &Answer, problem: &Problem) -> Self {
        Self {
            id: answer.id,
            problem_id: answer.problem_id,
            problem_code: problem.code.clone(),
            team_id: answer.team_id,
            body: answer.flattened_body(),
            created_at: answer.created_at,
            updated_at: answer.updated_at,
        }
    }
}
