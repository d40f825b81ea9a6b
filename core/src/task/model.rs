//! Task model definitions

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A todo item in a user's list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    /// Older records store the body under `task`
    #[serde(alias = "task")]
    pub text: String,
    pub completed: bool,
    /// Local calendar date of creation, `YYYY-MM-DD`
    pub created_at: String,
}

impl Task {
    /// Create a new task with the given text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed: false,
            created_at: Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Whether `query` occurs in the text, ignoring case
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.text.to_lowercase().contains(&query.to_lowercase())
    }
}
