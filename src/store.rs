//! Task store
//!
//! [`TaskStore`] owns the authoritative, ordered task collection. Every
//! mutation goes through [`TaskStore::commit`], which writes the whole
//! collection through to [`Persistence`] and then notifies the render
//! listeners, so storage, memory and display never drift apart.
//!
//! Operations on an id that is not in the collection are silent no-ops:
//! they return `false` and neither persist nor notify.

use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::domain::{starter_tasks, Task, TaskId};
use crate::storage::{Persistence, StorageError};

/// Callback invoked with the current collection after every change
pub type RenderListener = Box<dyn FnMut(&[Task])>;

/// Single source of truth for the task collection
pub struct TaskStore {
    tasks: Vec<Task>,
    persistence: Rc<dyn Persistence>,
    listeners: Vec<RenderListener>,
    clock: fn() -> DateTime<Utc>,
    storage_error: Option<StorageError>,
}

impl fmt::Debug for TaskStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskStore")
            .field("tasks", &self.tasks)
            .field("listeners", &self.listeners.len())
            .field("storage_error", &self.storage_error)
            .finish()
    }
}

impl TaskStore {
    /// Loads the saved collection, seeding the starter set if none is saved
    pub fn initialize(persistence: Rc<dyn Persistence>) -> Self {
        Self::initialize_with_clock(persistence, Utc::now)
    }

    /// Like [`TaskStore::initialize`] with an explicit clock for id generation
    pub fn initialize_with_clock(
        persistence: Rc<dyn Persistence>,
        clock: fn() -> DateTime<Utc>,
    ) -> Self {
        let loaded = persistence.load_tasks();
        let seeded = loaded.is_none();

        let mut store = Self {
            tasks: loaded.unwrap_or_else(starter_tasks),
            persistence,
            listeners: Vec::new(),
            clock,
            storage_error: None,
        };

        if seeded {
            store.commit();
        }

        store
    }

    /// Registers a render listener and immediately renders the current state
    pub fn subscribe(&mut self, mut listener: RenderListener) {
        listener(&self.tasks);
        self.listeners.push(listener);
    }

    /// Appends a new task; blank text is rejected
    pub fn add(&mut self, text: impl Into<String>) -> Option<TaskId> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }

        let id = TaskId::generate(self.tasks.iter().map(|t| &t.id), (self.clock)());
        self.tasks.push(Task::new(id, text));
        self.commit();
        Some(id)
    }

    /// Replaces the text of the task with `id`; blank text is rejected
    pub fn update(&mut self, id: TaskId, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            return false;
        }
        self.replace(id, |task| task.with_text(text))
    }

    /// Flips the completion flag of the task with `id`
    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        self.replace(id, Task::toggled)
    }

    /// Removes the task with `id`
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            return false;
        }
        self.commit();
        true
    }

    fn replace(&mut self, id: TaskId, f: impl FnOnce(&Task) -> Task) -> bool {
        let Some(slot) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return false;
        };
        *slot = f(slot);
        self.commit();
        true
    }

    /// Post-mutation hook: write through to storage, then re-render
    fn commit(&mut self) {
        if let Err(e) = self.persistence.save_tasks(&self.tasks) {
            self.storage_error = Some(e);
        }
        for listener in &mut self.listeners {
            listener(&self.tasks);
        }
    }

    /// The collection in display order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The storage backing this store
    pub fn persistence(&self) -> &Rc<dyn Persistence> {
        &self.persistence
    }

    /// Returns and clears the most recent failed write, if any
    pub fn take_storage_error(&mut self) -> Option<StorageError> {
        self.storage_error.take()
    }
}
