//! Account module
//!
//! Registered users, credential checks and the session marker.

mod model;
mod password;
mod store;

pub use model::{Session, User};
pub use password::PasswordScheme;
pub use store::AccountStore;
