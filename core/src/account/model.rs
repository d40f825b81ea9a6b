//! Account model definitions

use serde::{Deserialize, Serialize};

use crate::keys;

/// A registered user as stored in the `users` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    /// Plaintext, or an encoded hash when hashing is enabled
    pub password: String,
}

impl User {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// The logged-in user, identified by email
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Session {
    email: String,
}

impl Session {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Storage key of this user's task collection
    pub fn tasks_key(&self) -> String {
        keys::tasks_key(&self.email)
    }
}
