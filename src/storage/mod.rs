//! # Storage Layer
//!
//! Local persistence for todo-notes.
//!
//! ## Storage Layout
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | JSON array | `{data_dir}/my_todo_list_data` |
//! | Theme | `dark` / `light` | `{data_dir}/my_todo_list_theme` |
//! | Config | TOML | `{config_dir}/config.toml` |
//!
//! ## Concurrency Safety
//!
//! - [`FileStore`] takes a shared lock for reads and an exclusive lock for writes (`fs2`)
//! - All writes are atomic (temp file + rename)
//!
//! ## Key Types
//!
//! - [`Persistence`] - What the task store needs from storage
//! - [`LocalStorage`] - [`Persistence`] over any [`KeyValueStore`]
//! - [`FileStore`] / [`MemoryStore`] - Key-value backends
//! - [`Config`] - Application configuration

mod config;
mod kv;
mod local;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use config::{Config, ConfigError, SuggestionConfig, UiConfig, DEFAULT_SUGGESTION_ENDPOINT};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use local::{LocalStorage, Persistence, TASKS_KEY, THEME_KEY};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
