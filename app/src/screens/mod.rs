//! Screen models
//!
//! Each screen holds the form state a UI binds to and turns store
//! results into navigation or a [`Notice`] to show the user.

mod home;
mod register;
mod task_list;

pub use home::HomeScreen;
pub use register::RegisterScreen;
pub use task_list::TaskListScreen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    TaskList,
    Profile,
}

/// First screen shown after launch
pub enum Startup {
    Home(HomeScreen),
    TaskList(TaskListScreen),
}

impl Startup {
    pub fn route(&self) -> Route {
        match self {
            Self::Home(_) => Route::Home,
            Self::TaskList(_) => Route::TaskList,
        }
    }
}

/// A user-visible alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: Option<String>,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: Some("Error".to_string()),
            message: message.into(),
        }
    }

    /// Alert for a storage failure while doing `action`
    pub(crate) fn unexpected(action: &str) -> Self {
        Self::error(format!("Something went wrong while trying to {}.", action))
    }
}
