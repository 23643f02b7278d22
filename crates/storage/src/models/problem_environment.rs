use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProblemEnvironment {
    pub id: Uuid,
    pub inner_status: Option<String>,
    pub host: String,
    pub user: String,
    pub password: String,
    pub problem_id: Uuid,
    pub team_id: Option<Uuid>,
    pub secret_text: String,
    pub name: String,
    pub service: String,
    pub port: i32,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}
