//! Typed persistence on top of a key-value store
//!
//! Two independent entries are kept:
//!
//! | Key | Value |
//! |-----|-------|
//! | `my_todo_list_data` | JSON array of `{"id", "text", "completed"}` |
//! | `my_todo_list_theme` | `dark` or `light` |
//!
//! Anything unreadable or malformed loads as "nothing saved".

use std::collections::HashSet;

use super::kv::KeyValueStore;
use super::StorageError;
use crate::domain::{Task, Theme};

/// Key holding the serialized task collection
pub const TASKS_KEY: &str = "my_todo_list_data";

/// Key holding the theme preference
pub const THEME_KEY: &str = "my_todo_list_theme";

/// What the task store needs from storage
pub trait Persistence {
    /// Previously saved collection, or `None` if never saved or malformed
    ///
    /// Duplicate ids or blank task text count as malformed.
    fn load_tasks(&self) -> Option<Vec<Task>>;

    /// Overwrites the saved collection
    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError>;

    /// Previously saved theme, or `None` if never saved or unrecognized
    fn load_theme(&self) -> Option<Theme>;

    /// Overwrites the saved theme
    fn save_theme(&self, theme: Theme) -> Result<(), StorageError>;
}

/// [`Persistence`] over any [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct LocalStorage<K> {
    kv: K,
}

impl<K: KeyValueStore> LocalStorage<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Returns the underlying key-value store
    pub fn kv(&self) -> &K {
        &self.kv
    }
}

/// Parses a saved collection, rejecting duplicate ids and blank text
fn parse_tasks(raw: &str) -> Option<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(raw).ok()?;

    let mut seen = HashSet::with_capacity(tasks.len());
    let valid = tasks
        .iter()
        .all(|task| !task.text.trim().is_empty() && seen.insert(task.id));

    valid.then_some(tasks)
}

impl<K: KeyValueStore> Persistence for LocalStorage<K> {
    fn load_tasks(&self) -> Option<Vec<Task>> {
        let raw = self.kv.get(TASKS_KEY).ok()??;
        parse_tasks(&raw)
    }

    fn save_tasks(&self, tasks: &[Task]) -> Result<(), StorageError> {
        let json = serde_json::to_string(tasks)?;
        self.kv.set(TASKS_KEY, &json)
    }

    fn load_theme(&self) -> Option<Theme> {
        let raw = self.kv.get(THEME_KEY).ok()??;
        raw.parse().ok()
    }

    fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        self.kv.set(THEME_KEY, theme.as_str())
    }
}
