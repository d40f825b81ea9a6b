//! Task list of the logged-in user

use std::sync::Arc;

use todo_core::account::Session;
use todo_core::task::{Task, TaskRepository};
use todo_core::Error;
use tracing::{error, warn};

use super::{HomeScreen, Notice, Route};
use crate::state::AppState;

pub struct TaskListScreen {
    state: AppState,
    session: Session,
    tasks: Arc<dyn TaskRepository>,
    /// Text of the add/update field
    pub input: String,
    /// Search field
    pub filter: String,
    /// Task currently being edited through `input`
    editing: Option<String>,
}

impl TaskListScreen {
    pub fn new(state: AppState, session: Session) -> Self {
        let tasks = state.task_repository(session.clone());
        Self {
            state,
            session,
            tasks,
            input: String::new(),
            filter: String::new(),
            editing: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Initial fetch; a failed read shows an empty list
    pub async fn load(&mut self) {
        if let Err(err) = self.tasks.list_tasks().await {
            warn!(
                "Failed to load tasks for {}, showing empty list: {}",
                self.session.email(),
                err
            );
        }
    }

    /// Tasks matching the search field, in insertion order
    pub async fn visible_tasks(&self) -> Vec<Task> {
        self.tasks.search(&self.filter).await
    }

    /// Switch the input field to editing `id`
    pub async fn begin_edit(&mut self, id: &str) -> Result<(), Notice> {
        let task = self
            .tasks
            .search("")
            .await
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| Notice::info("That task no longer exists."))?;
        self.input = task.text;
        self.editing = Some(task.id);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.input.clear();
    }

    /// Add `input` as a new task, or save it into the task being edited
    pub async fn submit(&mut self) -> Result<Task, Notice> {
        let task = match &self.editing {
            Some(id) => self
                .tasks
                .edit_task(id, &self.input)
                .await
                .map_err(|err| match err {
                    Error::Validation(_) => Notice::info("Please enter a task to edit."),
                    err => task_notice(err, "update the task"),
                })?,
            None => self
                .tasks
                .add_task(&self.input)
                .await
                .map_err(|err| match err {
                    Error::Validation(_) => Notice::info("Please enter a task."),
                    err => task_notice(err, "save the task"),
                })?,
        };
        self.editing = None;
        self.input.clear();
        Ok(task)
    }

    pub async fn toggle(&self, id: &str) -> Result<Task, Notice> {
        self.tasks
            .toggle_task(id)
            .await
            .map_err(|err| task_notice(err, "update the task"))
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), Notice> {
        self.tasks
            .delete_task(id)
            .await
            .map_err(|err| task_notice(err, "delete the task"))?;
        if self.editing.as_deref() == Some(id) {
            self.cancel_edit();
        }
        Ok(())
    }

    pub fn profile(&self) -> Route {
        Route::Profile
    }

    /// Clear the session and go back to the login form
    ///
    /// The screen is consumed either way; after a failed logout the
    /// marker is still set and [`AppState::start`] reopens the list.
    pub async fn logout(self) -> Result<HomeScreen, Notice> {
        self.state.accounts().logout().await.map_err(|err| {
            error!("Logout failed: {}", err);
            Notice::unexpected("log out")
        })?;
        Ok(self.state.home_screen())
    }
}

fn task_notice(err: Error, action: &str) -> Notice {
    match err {
        Error::TaskNotFound(_) => Notice::info("That task no longer exists."),
        Error::NoSession => Notice::info("Please sign in again."),
        err => {
            error!("Failed to {}: {}", action, err);
            Notice::unexpected(action)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::test_support::{FailingReads, FailingWrites};
    use std::sync::atomic::Ordering;
    use todo_core::keys::{tasks_key, SESSION_KEY};
    use todo_core::storage::{KeyValueStore, LocalStore};

    const ALICE: &str = "alice@example.com";

    async fn open_screen() -> TaskListScreen {
        let state = AppState::new(AppConfig::in_memory()).await.unwrap();
        state.accounts().register(ALICE, "pw1").await.unwrap();
        let session = state.accounts().login(ALICE, "pw1").await.unwrap();
        let mut screen = TaskListScreen::new(state, session);
        screen.load().await;
        screen
    }

    async fn add(screen: &mut TaskListScreen, text: &str) -> Task {
        screen.input = text.to_string();
        screen.submit().await.unwrap()
    }

    #[tokio::test]
    async fn test_add_clears_input() {
        let mut screen = open_screen().await;
        let task = add(&mut screen, "buy milk").await;

        assert!(screen.input.is_empty());
        assert_eq!(screen.visible_tasks().await, vec![task]);
    }

    #[tokio::test]
    async fn test_empty_input_notice() {
        let mut screen = open_screen().await;
        let notice = screen.submit().await.unwrap_err();
        assert_eq!(notice, Notice::info("Please enter a task."));
    }

    #[tokio::test]
    async fn test_edit_flow() {
        let mut screen = open_screen().await;
        let task = add(&mut screen, "buy milk").await;

        screen.begin_edit(&task.id).await.unwrap();
        assert_eq!(screen.input, "buy milk");
        assert_eq!(screen.editing(), Some(task.id.as_str()));

        screen.input.clear();
        let notice = screen.submit().await.unwrap_err();
        assert_eq!(notice, Notice::info("Please enter a task to edit."));
        assert!(screen.editing().is_some());

        screen.input = "buy oat milk".to_string();
        let edited = screen.submit().await.unwrap();
        assert_eq!(edited.id, task.id);
        assert_eq!(edited.text, "buy oat milk");
        assert!(screen.editing().is_none());
        assert_eq!(screen.visible_tasks().await.len(), 1);
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_task() {
        let mut screen = open_screen().await;
        assert!(screen.begin_edit("missing").await.is_err());
        assert!(screen.editing().is_none());
    }

    #[tokio::test]
    async fn test_filter_toggle_delete() {
        let mut screen = open_screen().await;
        let milk = add(&mut screen, "buy milk").await;
        add(&mut screen, "call mom").await;

        screen.filter = "MILK".to_string();
        assert_eq!(screen.visible_tasks().await, vec![milk.clone()]);

        let toggled = screen.toggle(&milk.id).await.unwrap();
        assert!(toggled.completed);
        assert!(screen.visible_tasks().await[0].completed);

        screen.delete(&milk.id).await.unwrap();
        assert!(screen.visible_tasks().await.is_empty());
        screen.filter.clear();
        assert_eq!(screen.visible_tasks().await.len(), 1);

        // Deleting twice is fine
        screen.delete(&milk.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_logout_returns_to_login() {
        let screen = open_screen().await;
        let state = screen.state.clone();
        assert_eq!(screen.profile(), Route::Profile);

        screen.logout().await.ok().unwrap();
        assert!(state.restore_session().await.is_none());
    }

    #[tokio::test]
    async fn test_repository_kept_past_logout_cannot_write() {
        let storage = LocalStore::in_memory();
        let state = AppState::with_storage(AppConfig::in_memory(), storage.clone());
        state.accounts().register(ALICE, "pw1").await.unwrap();
        let session = state.accounts().login(ALICE, "pw1").await.unwrap();
        let screen = TaskListScreen::new(state, session);
        let tasks = Arc::clone(&screen.tasks);

        screen.logout().await.ok().unwrap();
        assert!(matches!(tasks.add_task("late").await, Err(Error::NoSession)));
        assert!(storage.read_value(&tasks_key(ALICE)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stale_screen_asks_to_sign_in_again() {
        let mut screen = open_screen().await;
        screen.state.accounts().logout().await.unwrap();

        screen.input = "late".to_string();
        let notice = screen.submit().await.unwrap_err();
        assert_eq!(notice, Notice::info("Please sign in again."));
        assert_eq!(screen.input, "late");
    }

    #[tokio::test]
    async fn test_failed_load_shows_empty_list() {
        let backend = Arc::new(FailingReads::default());
        backend.inner.set(SESSION_KEY, ALICE).await.unwrap();
        let storage = LocalStore::new(backend.clone());
        let state = AppState::with_storage(AppConfig::in_memory(), storage.clone());

        let mut screen = TaskListScreen::new(state, Session::new(ALICE));
        screen.load().await;
        assert!(screen.visible_tasks().await.is_empty());

        // Reads inside a mutation still fail closed
        screen.input = "new".to_string();
        assert!(screen.submit().await.is_err());
        backend.fail_reads.store(false, Ordering::SeqCst);
        assert!(storage.read_value(&tasks_key(ALICE)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_write_is_reported() {
        let backend = FailingWrites::default();
        backend.inner.set(SESSION_KEY, ALICE).await.unwrap();
        let storage = LocalStore::new(Arc::new(backend));
        let state = AppState::with_storage(AppConfig::in_memory(), storage);

        let mut screen = TaskListScreen::new(state, Session::new(ALICE));
        screen.input = "lost".to_string();
        let notice = screen.submit().await.unwrap_err();
        assert_eq!(notice, Notice::unexpected("save the task"));
        assert_eq!(screen.input, "lost");
        assert!(screen.visible_tasks().await.is_empty());
    }
}
