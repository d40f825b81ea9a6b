//! Account store
//!
//! Owns the `users` collection and the `userToken` session marker.

use tracing::{debug, info};

use super::model::{Session, User};
use super::password::PasswordScheme;
use crate::keys::{SESSION_KEY, USERS_KEY};
use crate::storage::LocalStore;
use crate::{Error, Result};

/// Registration, credential checks and session lifecycle
#[derive(Clone)]
pub struct AccountStore {
    storage: LocalStore,
    scheme: PasswordScheme,
}

impl AccountStore {
    pub fn new(storage: LocalStore) -> Self {
        Self {
            storage,
            scheme: PasswordScheme::default(),
        }
    }

    /// Set how newly registered passwords are stored and checked
    pub fn with_password_scheme(mut self, scheme: PasswordScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Register a new user. Does not log them in.
    pub async fn register(&self, email: &str, password: &str) -> Result<()> {
        require_credentials(email, password)?;

        let _guard = self.storage.lock(USERS_KEY).await;
        let mut users: Vec<User> = self.storage.read_collection(USERS_KEY).await?;
        if users.iter().any(|user| user.email == email) {
            return Err(Error::DuplicateUser(email.to_string()));
        }

        users.push(User::new(email, self.scheme.encode(password)));
        self.storage.write_collection(USERS_KEY, &users).await?;
        info!("Registered user {} ({} total)", email, users.len());
        Ok(())
    }

    /// Check credentials and set the session marker
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        require_credentials(email, password)?;

        let users: Vec<User> = self.storage.read_collection(USERS_KEY).await?;
        let matched = users
            .iter()
            .any(|user| user.email == email && self.scheme.verify(&user.password, password));
        if !matched {
            debug!("Rejected login for {}", email);
            return Err(Error::InvalidCredentials);
        }

        self.storage.write_value(SESSION_KEY, email).await?;
        info!("User {} logged in", email);
        Ok(Session::new(email))
    }

    /// Clear the session marker, whether or not one is set
    pub async fn logout(&self) -> Result<()> {
        self.storage.remove(SESSION_KEY).await?;
        info!("Session cleared");
        Ok(())
    }

    /// The current session, if a user is logged in
    pub async fn get_session(&self) -> Result<Option<Session>> {
        let marker = self.storage.read_value(SESSION_KEY).await?;
        Ok(marker
            .filter(|email| !email.is_empty())
            .map(Session::new))
    }

    /// All registered users in registration order
    pub async fn users(&self) -> Result<Vec<User>> {
        self.storage.read_collection(USERS_KEY).await
    }
}

fn require_credentials(email: &str, password: &str) -> Result<()> {
    if email.is_empty() || password.is_empty() {
        return Err(Error::Validation(
            "Email and password are required".to_string(),
        ));
    }
    Ok(())
}
