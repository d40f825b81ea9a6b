//! Task repository trait
//!
//! Defines the interface for operations on the logged-in user's tasks.

use async_trait::async_trait;

use super::model::Task;
use crate::Result;

/// Repository interface over one owner's task collection
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get all tasks in insertion order
    async fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Append a new, not yet completed task
    async fn add_task(&self, text: &str) -> Result<Task>;

    /// Flip the completed flag of a task
    async fn toggle_task(&self, id: &str) -> Result<Task>;

    /// Replace the text of a task
    async fn edit_task(&self, id: &str, text: &str) -> Result<Task>;

    /// Delete a task by ID; returns whether a task was removed
    async fn delete_task(&self, id: &str) -> Result<bool>;

    /// Case-insensitive substring filter over the loaded tasks
    async fn search(&self, query: &str) -> Vec<Task>;
}
