//! Login form

use todo_core::Error;
use tracing::error;

use super::{Notice, RegisterScreen, TaskListScreen};
use crate::state::AppState;

pub struct HomeScreen {
    state: AppState,
    pub email: String,
    pub password: String,
}

impl HomeScreen {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            email: String::new(),
            password: String::new(),
        }
    }

    /// Log in and open the user's task list
    pub async fn sign_in(&self) -> Result<TaskListScreen, Notice> {
        let session = self
            .state
            .accounts()
            .login(&self.email, &self.password)
            .await
            .map_err(|err| match err {
                Error::Validation(_) => Notice::info("Please enter your email and password."),
                Error::InvalidCredentials => Notice::info("Invalid email or password."),
                err => {
                    error!("Login failed: {}", err);
                    Notice::unexpected("sign in")
                }
            })?;

        let mut screen = TaskListScreen::new(self.state.clone(), session);
        screen.load().await;
        Ok(screen)
    }

    pub fn register(&self) -> RegisterScreen {
        self.state.register_screen()
    }
}
