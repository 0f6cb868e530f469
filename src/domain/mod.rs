//! Domain models for todo-notes
//!
//! Contains the core data types and the list projection, without any I/O
//! concerns.

mod id;
mod task;
pub mod view;

pub use id::{IdError, TaskId};
pub use task::{starter_tasks, ParseError, StatusFilter, Task, Theme};
pub use view::{render, RenderedView, Row, ViewQuery};
