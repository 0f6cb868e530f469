//! List projection
//!
//! Turns the task collection plus the current search term and status filter
//! into the rows that should be displayed. This is a pure function: it never
//! touches storage or the terminal, so calling it repeatedly with the same
//! inputs yields the same rows.

use serde::Serialize;

use super::id::TaskId;
use super::task::{StatusFilter, Task};

/// Transient view state, never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search_term: String,
    pub status_filter: StatusFilter,
}

impl ViewQuery {
    pub fn new(search_term: impl Into<String>, status_filter: StatusFilter) -> Self {
        Self {
            search_term: search_term.into(),
            status_filter,
        }
    }

    /// Returns true if the task passes both the search and status predicates
    pub fn matches(&self, task: &Task) -> bool {
        let term = self.search_term.to_lowercase();
        task.text.to_lowercase().contains(&term) && self.status_filter.admits(task.completed)
    }
}

/// One displayed row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl From<&Task> for Row {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            text: task.text.clone(),
            completed: task.completed,
        }
    }
}

/// Result of rendering the list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub rows: Vec<Row>,
    /// True when no row passed the filters
    pub empty_state: bool,
}

impl RenderedView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Projects the collection through the query, preserving collection order
pub fn render(tasks: &[Task], query: &ViewQuery) -> RenderedView {
    let term = query.search_term.to_lowercase();

    let rows: Vec<Row> = tasks
        .iter()
        .filter(|task| task.text.to_lowercase().contains(&term))
        .filter(|task| query.status_filter.admits(task.completed))
        .map(Row::from)
        .collect();

    RenderedView {
        empty_state: rows.is_empty(),
        rows,
    }
}
