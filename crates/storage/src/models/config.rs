use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{Result, StorageError};

/// Key of the config entry listing the problems graded on site.
pub const LOCAL_PROBLEM_CODES: &str = "local_problem_codes";

/// A row of the score server's `configs` table. `value` holds the raw JSON
/// text of the JSONB column.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Config {
    pub id: Uuid,
    pub key: String,
    pub value: String,
}

impl Config {
    /// Decode a value that is stored as a JSON string.
    pub fn string_value(&self) -> Result<String> {
        serde_json::from_str::<String>(&self.value).map_err(|e| {
            StorageError::InvalidData(format!("config {} is not a JSON string: {}", self.key, e))
        })
    }

    /// Split a comma-separated string value into its trimmed, non-empty parts.
    pub fn comma_separated_values(&self) -> Result<Vec<String>> {
        let value = self.string_value()?;

        Ok(value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect())
    }
}
