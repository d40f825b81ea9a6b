//! Fixed storage keys

/// Serialized list of registered users.
pub const USERS_KEY: &str = "users";

/// Email of the logged-in user, stored as a plain string.
pub const SESSION_KEY: &str = "userToken";

const TASKS_KEY_PREFIX: &str = "tasks_";

/// Key of the task collection owned by `email`.
pub fn tasks_key(email: &str) -> String {
    format!("{}{}", TASKS_KEY_PREFIX, email)
}
