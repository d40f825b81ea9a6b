//! Application layer for the local todo list
//!
//! Wires configuration, logging and storage together and exposes the
//! state each screen needs. Rendering is left to the host UI.

pub mod config;
pub mod logging;
pub mod screens;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::AppConfig;
pub use state::AppState;
