//! Session-bound task store
//!
//! Every mutation reloads the owner's full collection, applies the change
//! and writes the full collection back while holding the owner key's lock.
//! A store only acts while the stored session marker still names its
//! session; after logout or a login as someone else it fails with
//! [`Error::NoSession`].

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::model::Task;
use super::repository::TaskRepository;
use crate::account::{AccountStore, Session};
use crate::keys::SESSION_KEY;
use crate::storage::LocalStore;
use crate::{Error, Result};

/// Task collection of one logged-in user
pub struct TaskStore {
    storage: LocalStore,
    session: Option<Session>,
    /// Collection as of the last list or successful mutation
    loaded: RwLock<Vec<Task>>,
}

impl TaskStore {
    /// Create a store acting for `session`; `None` makes every
    /// collection operation fail with [`Error::NoSession`]
    pub fn new(storage: LocalStore, session: Option<Session>) -> Self {
        Self {
            storage,
            session,
            loaded: RwLock::new(Vec::new()),
        }
    }

    /// Create a store for whoever the stored session marker names
    pub async fn from_session_marker(storage: LocalStore) -> Result<Self> {
        let session = AccountStore::new(storage.clone()).get_session().await?;
        Ok(Self::new(storage, session))
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Snapshot of the loaded collection
    pub async fn loaded(&self) -> Vec<Task> {
        self.loaded.read().await.clone()
    }

    fn owner_key(&self) -> Result<String> {
        self.session
            .as_ref()
            .map(Session::tasks_key)
            .ok_or(Error::NoSession)
    }

    /// Fail unless the stored marker still names this store's session
    async fn ensure_active(&self) -> Result<()> {
        let session = self.session.as_ref().ok_or(Error::NoSession)?;
        let marker = self.storage.read_value(SESSION_KEY).await?;
        if marker.as_deref() != Some(session.email()) {
            debug!("Session of {} is no longer active", session.email());
            return Err(Error::NoSession);
        }
        Ok(())
    }

    /// Read-modify-write the owner's collection
    ///
    /// `apply` returns its result and whether the collection changed;
    /// unchanged collections are not written back.
    async fn modify<R, F>(&self, apply: F) -> Result<R>
    where
        F: FnOnce(&mut Vec<Task>) -> Result<(R, bool)> + Send,
        R: Send,
    {
        let key = self.owner_key()?;
        let _guard = self.storage.lock(&key).await;
        self.ensure_active().await?;

        let mut tasks: Vec<Task> = self.storage.read_collection(&key).await?;
        let (result, changed) = apply(&mut tasks)?;
        if changed {
            self.storage.write_collection(&key, &tasks).await?;
        }

        *self.loaded.write().await = tasks;
        Ok(result)
    }
}

#[async_trait]
impl TaskRepository for TaskStore {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let key = self.owner_key()?;
        let _guard = self.storage.lock(&key).await;
        self.ensure_active().await?;

        let tasks: Vec<Task> = self.storage.read_collection(&key).await?;
        debug!("Loaded {} tasks from '{}'", tasks.len(), key);
        *self.loaded.write().await = tasks.clone();
        Ok(tasks)
    }

    async fn add_task(&self, text: &str) -> Result<Task> {
        require_text(text)?;
        let task = self
            .modify(|tasks| {
                let mut task = Task::new(text);
                while tasks.iter().any(|t| t.id == task.id) {
                    task.id = Uuid::new_v4().to_string();
                }
                tasks.push(task.clone());
                Ok((task, true))
            })
            .await?;
        info!("Added task {}", task.id);
        Ok(task)
    }

    async fn toggle_task(&self, id: &str) -> Result<Task> {
        let task = self
            .modify(|tasks| {
                let task = find_mut(tasks, id)?;
                task.completed = !task.completed;
                Ok((task.clone(), true))
            })
            .await?;
        info!("Task {} completed={}", task.id, task.completed);
        Ok(task)
    }

    async fn edit_task(&self, id: &str, text: &str) -> Result<Task> {
        require_text(text)?;
        let task = self
            .modify(|tasks| {
                let task = find_mut(tasks, id)?;
                task.text = text.to_string();
                Ok((task.clone(), true))
            })
            .await?;
        info!("Edited task {}", task.id);
        Ok(task)
    }

    async fn delete_task(&self, id: &str) -> Result<bool> {
        let removed = self
            .modify(|tasks| {
                let before = tasks.len();
                tasks.retain(|t| t.id != id);
                let removed = tasks.len() != before;
                Ok((removed, removed))
            })
            .await?;
        if removed {
            info!("Deleted task {}", id);
        } else {
            debug!("Delete of unknown task {} ignored", id);
        }
        Ok(removed)
    }

    async fn search(&self, query: &str) -> Vec<Task> {
        self.loaded
            .read()
            .await
            .iter()
            .filter(|t| t.matches(query))
            .cloned()
            .collect()
    }
}

fn require_text(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(Error::Validation("Task text cannot be empty".to_string()));
    }
    Ok(())
}

fn find_mut<'a>(tasks: &'a mut [Task], id: &str) -> Result<&'a mut Task> {
    tasks
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| Error::TaskNotFound(id.to_string()))
}
