//! Task CLI commands

use anyhow::{Context, Result};

use super::output::Output;
use super::session::Session;
use crate::domain::{render, StatusFilter, TaskId, Theme, ViewQuery};
use crate::suggestion::{HttpSuggestionSource, SuggestionSource};

/// Theme change requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

pub fn list(output: &Output, session: &Session, search: &str, filter: StatusFilter) -> Result<()> {
    let query = ViewQuery::new(search, filter);
    output.verbose_ctx("list", &format!("search={:?} filter={}", search, filter));

    let view = render(session.store.tasks(), &query);
    output.view(&view);

    Ok(())
}

pub fn add(output: &Output, session: &mut Session, text: &str) -> Result<()> {
    let text = text.trim();
    let id = session
        .store
        .add(text)
        .ok_or_else(|| anyhow::anyhow!("Task text must not be empty"))?;
    session.ensure_saved()?;

    if let Some(task) = session.store.get(id) {
        output.created(task);
    }

    Ok(())
}

fn report_change(output: &Output, session: &Session, id: TaskId, changed: bool, verb: &str) {
    output.change(id, changed, verb, session.store.get(id));
}

pub fn edit(output: &Output, session: &mut Session, id: TaskId, text: &str) -> Result<()> {
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("Task text must not be empty");
    }

    let changed = session.store.update(id, text);
    session.ensure_saved()?;
    report_change(output, session, id, changed, "Updated");
    Ok(())
}

pub fn toggle(output: &Output, session: &mut Session, id: TaskId) -> Result<()> {
    let changed = session.store.toggle_completed(id);
    session.ensure_saved()?;

    let verb = match session.store.get(id) {
        Some(task) if task.completed => "Completed",
        _ => "Reopened",
    };
    report_change(output, session, id, changed, verb);
    Ok(())
}

pub fn delete(output: &Output, session: &mut Session, id: TaskId) -> Result<()> {
    let changed = session.store.delete(id);
    session.ensure_saved()?;
    report_change(output, session, id, changed, "Deleted");
    Ok(())
}

pub fn suggest(output: &Output, session: &mut Session) -> Result<()> {
    let source = HttpSuggestionSource::new(&session.config.suggestion)?;
    output.verbose_ctx("suggest", &format!("Fetching from {}", source.endpoint()));

    let text = source
        .fetch_suggestion_text()
        .context("Could not fetch a suggestion")?;

    match session.store.add(text.as_str()) {
        Some(id) => {
            session.ensure_saved()?;
            if let Some(task) = session.store.get(id) {
                output.created(task);
            }
        }
        None => anyhow::bail!("Suggestion service returned an empty task"),
    }

    Ok(())
}

pub fn theme(output: &Output, session: &Session, change: Option<ThemeArg>) -> Result<()> {
    let storage = session.persistence();
    let current = storage.load_theme().unwrap_or_default();

    let theme = match change {
        None => current,
        Some(arg) => {
            let next = match arg {
                ThemeArg::Light => Theme::Light,
                ThemeArg::Dark => Theme::Dark,
                ThemeArg::Toggle => current.toggle(),
            };
            storage.save_theme(next).context("Failed to save theme")?;
            next
        }
    };

    if output.is_json() {
        output.data(&serde_json::json!({ "theme": theme }));
    } else {
        println!("Theme: {}", theme);
    }

    Ok(())
}

pub fn paths(output: &Output, session: &Session) -> Result<()> {
    let tasks = session.tasks_path();
    let theme = session.theme_path();

    if output.is_json() {
        output.data(&serde_json::json!({
            "data_dir": session.data_dir.display().to_string(),
            "tasks": tasks.display().to_string(),
            "theme": theme.display().to_string(),
        }));
    } else {
        println!("Data directory: {}", session.data_dir.display());
        println!("Tasks:          {}", tasks.display());
        println!("Theme:          {}", theme.display());
    }

    Ok(())
}
