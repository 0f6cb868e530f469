//! Output formatting for CLI commands
//!
//! Commands print either human-readable text or one JSON document per
//! invocation. Diagnostics from `--verbose` always go to stderr so they never
//! mix with JSON on stdout.

use serde::Serialize;

use crate::domain::{RenderedView, Task, TaskId};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Line printed when a view has no rows
pub const EMPTY_VIEW: &str = "No tasks to show";

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints structured data
    pub fn data<T: Serialize>(&self, data: &T) {
        match self.format {
            OutputFormat::Text => {
                if let Ok(json) = serde_json::to_string_pretty(data) {
                    println!("{}", json);
                }
            }
            OutputFormat::Json => {
                if let Ok(json) = serde_json::to_string(data) {
                    println!("{}", json);
                }
            }
        }
    }

    /// Prints a rendered view as a table, or `{"tasks": [...], "empty": bool}`
    pub fn view(&self, view: &RenderedView) {
        match self.format {
            OutputFormat::Text => print!("{}", view_table(view)),
            OutputFormat::Json => self.data(&serde_json::json!({
                "tasks": view.rows,
                "empty": view.empty_state,
            })),
        }
    }

    /// Reports a newly added task
    pub fn created(&self, task: &Task) {
        if self.is_json() {
            self.data(task);
        } else {
            println!("Created task: {} - {}", task.id, task.text);
        }
    }

    /// Reports the outcome of an edit, toggle or delete on `id`
    ///
    /// `task` is the task after the change (`None` once deleted or when the
    /// id was never present).
    pub fn change(&self, id: TaskId, changed: bool, verb: &str, task: Option<&Task>) {
        if self.is_json() {
            self.data(&serde_json::json!({
                "id": id,
                "changed": changed,
                "task": task,
            }));
        } else {
            println!("{}", change_line(id, changed, verb));
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}

fn completed_mark(completed: bool) -> &'static str {
    if completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Text rendering of a view: header, one row per task, and a count
fn view_table(view: &RenderedView) -> String {
    if view.empty_state {
        return format!("{}\n", EMPTY_VIEW);
    }

    let mut out = format!("{:<14} {:<4} TEXT\n{}\n", "ID", "DONE", "-".repeat(60));
    for row in &view.rows {
        out.push_str(&format!(
            "{:<14} {:<4} {}\n",
            row.id,
            completed_mark(row.completed),
            row.text
        ));
    }
    out.push_str(&format!("\n{} task(s)\n", view.len()));
    out
}

fn change_line(id: TaskId, changed: bool, verb: &str) -> String {
    if changed {
        format!("{} task {}", verb, id)
    } else {
        format!("No task with id {}; nothing changed", id)
    }
}
