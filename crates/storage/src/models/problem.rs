use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A problem joined with the title of its body. `title` is empty when the
/// problem has no body row yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Problem {
    pub id: Uuid,
    pub code: String,
    pub title: String,
}
