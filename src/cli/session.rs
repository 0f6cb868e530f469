//! Opening the configured storage
//!
//! Every command starts by loading the configuration, resolving the data
//! directory and initializing the task store over it.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Result;

use super::Output;
use crate::storage::{Config, FileStore, LocalStorage, Persistence, TASKS_KEY, THEME_KEY};
use crate::store::TaskStore;

/// Loaded configuration plus an initialized task store
pub struct Session {
    pub config: Config,
    pub data_dir: PathBuf,
    pub store: TaskStore,
}

impl Session {
    pub fn open(output: &Output, data_dir: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        let data_dir = config.resolve_data_dir(data_dir)?;
        output.verbose_ctx("storage", &format!("Using data directory: {}", data_dir.display()));

        let storage = LocalStorage::new(FileStore::new(&data_dir));
        let store = TaskStore::initialize(Rc::new(storage));
        output.verbose_ctx("storage", &format!("Loaded {} task(s)", store.len()));

        Ok(Self {
            config,
            data_dir,
            store,
        })
    }

    pub fn persistence(&self) -> &Rc<dyn Persistence> {
        self.store.persistence()
    }

    /// Fails if the last mutation could not be written through
    pub fn ensure_saved(&mut self) -> Result<()> {
        match self.store.take_storage_error() {
            Some(e) => Err(anyhow::Error::new(e).context("Failed to save tasks")),
            None => Ok(()),
        }
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(TASKS_KEY)
    }

    pub fn theme_path(&self) -> PathBuf {
        self.data_dir.join(THEME_KEY)
    }
}
