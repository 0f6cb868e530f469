//! todo-notes - A local-first task list for the terminal
//!
//! Tasks live in a [`store::TaskStore`] that writes every change through to
//! a key-value [`storage::Persistence`] backend and re-renders subscribed
//! views. [`domain::render`] turns the collection plus a search term and
//! status filter into the rows a view displays.

pub mod cli;
pub mod domain;
pub mod storage;
pub mod store;
pub mod suggestion;

pub use domain::{StatusFilter, Task, TaskId, Theme};
pub use store::TaskStore;
