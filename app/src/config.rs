//! Application configuration from environment variables

use std::path::PathBuf;

use todo_core::account::PasswordScheme;

const DEFAULT_DATA_DIR: &str = ".todo-data";
const DEFAULT_STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the storage file
    pub data_dir: PathBuf,
    pub storage_file: String,
    pub password_scheme: PasswordScheme,
    /// Keep everything in memory instead of on disk
    pub in_memory: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_file: DEFAULT_STORAGE_FILE.to_string(),
            password_scheme: PasswordScheme::default(),
            in_memory: false,
        }
    }
}

impl AppConfig {
    /// Read `TODO_DATA_DIR`, `TODO_STORAGE_FILE`, `TODO_PASSWORD_SCHEME`
    /// and `TODO_IN_MEMORY`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_dir = lookup("TODO_DATA_DIR")
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let storage_file = lookup("TODO_STORAGE_FILE")
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or(defaults.storage_file);
        let password_scheme = match lookup("TODO_PASSWORD_SCHEME") {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!("{}; using {}", err, defaults.password_scheme.as_str());
                defaults.password_scheme
            }),
            None => defaults.password_scheme,
        };
        let in_memory = env_flag(lookup("TODO_IN_MEMORY"), defaults.in_memory);

        Self {
            data_dir,
            storage_file,
            password_scheme,
            in_memory,
        }
    }

    /// In-memory configuration, used by tests and previews
    pub fn in_memory() -> Self {
        Self {
            in_memory: true,
            ..Self::default()
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(&self.storage_file)
    }
}

fn env_flag(value: Option<String>, default: bool) -> bool {
    match value {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => default,
        },
        None => default,
    }
}
