//! Registration form

use todo_core::Error;
use tracing::error;

use super::{HomeScreen, Notice};
use crate::state::AppState;

pub struct RegisterScreen {
    state: AppState,
    pub email: String,
    pub password: String,
}

impl RegisterScreen {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            email: String::new(),
            password: String::new(),
        }
    }

    /// Register the entered credentials
    ///
    /// On success the returned notice is shown and the user goes back to
    /// the login form; no session is started.
    pub async fn submit(&self) -> Result<Notice, Notice> {
        self.state
            .accounts()
            .register(&self.email, &self.password)
            .await
            .map_err(|err| match err {
                Error::Validation(_) => Notice::info("Please enter your email and password."),
                Error::DuplicateUser(_) => {
                    Notice::info("Email already in use. Please choose another.")
                }
                err => {
                    error!("Registration failed: {}", err);
                    Notice::unexpected("register")
                }
            })?;
        Ok(Notice::info("Registration successful!"))
    }

    pub fn login(&self) -> HomeScreen {
        self.state.home_screen()
    }
}
