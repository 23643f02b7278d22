use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Answer, ProblemEnvironment};

/// A problem environment together with the body of the team's latest answer
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProblemEnvironmentResponse {
    pub id: Uuid,
    pub host: String,
    pub problem_id: Uuid,
    pub team_id: Option<Uuid>,
    pub name: String,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
    /// Empty when the team has not answered the problem yet
    pub latest_answer_body: String,
}

impl ProblemEnvironmentResponse {
    pub fn new(environment: ProblemEnvironment, latest_answer: Option<&Answer>) -> Self {
        Self {
            id: environment.id,
            host: environment.host,
            problem_id: environment.problem_id,
            team_id: environment.team_id,
            name: environment.name,
            created_at: environment.created_at,
            updated_at: environment.updated_at,
            latest_answer_body: latest_answer
                .map(Answer::flattened_body)
                .unwrap_or_default(),
        }
    }
}
