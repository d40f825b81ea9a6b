//! Core library for the local todo list
//!
//! This crate contains the data and session model, including:
//! - The key-value persistence boundary
//! - Account registration, login and the session marker
//! - Per-user task collections

pub mod account;
pub mod error;
pub mod keys;
pub mod storage;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
