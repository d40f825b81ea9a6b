//! Application state

use std::sync::Arc;

use todo_core::account::{AccountStore, Session};
use todo_core::storage::{FileKeyValueStore, KeyValueStore, LocalStore, MemoryKeyValueStore};
use todo_core::task::{TaskRepository, TaskStore};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::screens::{HomeScreen, RegisterScreen, Startup, TaskListScreen};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    storage: LocalStore,
    accounts: AccountStore,
}

impl AppState {
    /// Open the storage backend described by `config`
    pub async fn new(config: AppConfig) -> todo_core::Result<Self> {
        let backend: Arc<dyn KeyValueStore> = if config.in_memory {
            info!("Using in-memory storage");
            Arc::new(MemoryKeyValueStore::new())
        } else {
            let path = config.storage_path();
            info!("Using storage file: {:?}", path);
            Arc::new(FileKeyValueStore::open(path).await?)
        };
        Ok(Self::with_storage(config, LocalStore::new(backend)))
    }

    /// Build state over an already opened storage handle
    pub fn with_storage(config: AppConfig, storage: LocalStore) -> Self {
        let accounts =
            AccountStore::new(storage.clone()).with_password_scheme(config.password_scheme);
        Self {
            inner: Arc::new(AppStateInner {
                storage,
                accounts,
            }),
        }
    }

    /// Get reference to the account store
    pub fn accounts(&self) -> &AccountStore {
        &self.inner.accounts
    }

    /// Task repository acting for `session`
    pub fn task_repository(&self, session: Session) -> Arc<dyn TaskRepository> {
        Arc::new(TaskStore::new(self.inner.storage.clone(), Some(session)))
    }

    /// Session stored from a previous run
    ///
    /// A failed read is logged and treated as signed out.
    pub async fn restore_session(&self) -> Option<Session> {
        match self.inner.accounts.get_session().await {
            Ok(session) => session,
            Err(err) => {
                warn!("Failed to read session marker, starting signed out: {}", err);
                None
            }
        }
    }

    /// Pick the first screen: the task list when a session is stored,
    /// otherwise the login form
    pub async fn start(&self) -> Startup {
        match self.restore_session().await {
            Some(session) => {
                let mut screen = TaskListScreen::new(self.clone(), session);
                screen.load().await;
                Startup::TaskList(screen)
            }
            None => Startup::Home(self.home_screen()),
        }
    }

    pub fn home_screen(&self) -> HomeScreen {
        HomeScreen::new(self.clone())
    }

    pub fn register_screen(&self) -> RegisterScreen {
        RegisterScreen::new(self.clone())
    }
}
