//! Task domain model
//!
//! A task is a short text note with a completion flag. Tasks are kept in an
//! ordered collection whose insertion order is the display order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::TaskId;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid status filter '{0}': expected all, active or completed")]
    StatusFilter(String),

    #[error("Invalid theme '{0}': expected light or dark")]
    Theme(String),
}

/// A single note with completion status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Creates a new, not yet completed task
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
        }
    }

    /// Returns a copy with the completion flag flipped
    pub fn toggled(&self) -> Self {
        Self {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Returns a copy with replaced text
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }
}

/// The collection every fresh installation starts with
pub fn starter_tasks() -> Vec<Task> {
    vec![
        Task {
            id: TaskId::new(1),
            text: "Go shopping".to_string(),
            completed: false,
        },
        Task {
            id: TaskId::new(2),
            text: "Prepare a report".to_string(),
            completed: true,
        },
        Task {
            id: TaskId::new(3),
            text: "Make an appointment with a doctor".to_string(),
            completed: false,
        },
    ]
}

/// Status restriction applied when rendering the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Active, StatusFilter::Completed];

    /// Returns true if a task with the given completion flag passes
    pub fn admits(&self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !completed,
            StatusFilter::Completed => completed,
        }
    }

    /// Next filter in selector order (wraps around)
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            _ => Err(ParseError::StatusFilter(s.to_string())),
        }
    }
}

/// Visual theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ParseError::Theme(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_not_completed() {
        let task = Task::new(TaskId::new(7), "Water plants");
        assert_eq!(task.id, TaskId::new(7));
        assert_eq!(task.text, "Water plants");
        assert!(!task.completed);
    }

    #[test]
    fn toggled_keeps_id_and_text() {
        let task = Task::new(TaskId::new(7), "Water plants");
        let toggled = task.toggled();
        assert!(toggled.completed);
        assert_eq!(toggled.id, task.id);
        assert_eq!(toggled.text, task.text);
        assert_eq!(toggled.toggled(), task);
    }

    #[test]
    fn with_text_keeps_id_and_status() {
        let task = Task::new(TaskId::new(7), "Water plants").toggled();
        let edited = task.with_text("Water the garden");
        assert_eq!(edited.id, task.id);
        assert!(edited.completed);
        assert_eq!(edited.text, "Water the garden");
    }

    #[test]
    fn starter_set_contents() {
        let tasks = starter_tasks();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].text, "Go shopping");
        assert!(!tasks[0].completed);
        assert_eq!(tasks[1].text, "Prepare a report");
        assert!(tasks[1].completed);
        assert_eq!(tasks[2].text, "Make an appointment with a doctor");
        assert_eq!(tasks[2].id, TaskId::new(3));
    }

    #[test]
    fn task_json_shape() {
        let task = Task::new(TaskId::new(1), "Go shopping");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "text": "Go shopping", "completed": false})
        );
    }

    #[test]
    fn status_filter_admits() {
        assert!(StatusFilter::All.admits(true));
        assert!(StatusFilter::All.admits(false));
        assert!(StatusFilter::Active.admits(false));
        assert!(!StatusFilter::Active.admits(true));
        assert!(StatusFilter::Completed.admits(true));
        assert!(!StatusFilter::Completed.admits(false));
    }

    #[test]
    fn status_filter_cycles() {
        let start = StatusFilter::All;
        assert_eq!(start.next(), StatusFilter::Active);
        assert_eq!(start.next().next(), StatusFilter::Completed);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn status_filter_from_str() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!("ACTIVE".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!("completed".parse::<StatusFilter>().unwrap(), StatusFilter::Completed);
        assert!("pending".parse::<StatusFilter>().is_err());
        assert!("done".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn theme_toggle_roundtrip() {
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
        assert!(Theme::Dark.is_dark());
        assert!(!Theme::default().is_dark());
    }

    #[test]
    fn theme_from_str() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert!("Dark mode".parse::<Theme>().is_err());
    }
}
