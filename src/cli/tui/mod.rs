//! Interactive TUI for the task list
//!
//! A single list view with live search, a status filter, an add/edit
//! modal, a theme toggle and a suggestion trigger, built on ratatui.

mod app;
mod bindings;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::{anyhow, Result};

use super::{Output, Session};
use crate::domain::{StatusFilter, ViewQuery};
use crate::suggestion::HttpSuggestionSource;
use app::App;
use event::EventHandler;

/// Launch the TUI
pub fn run(output: &Output, session: Session, filter: StatusFilter, search: String) -> Result<()> {
    output.verbose_ctx("tui", "Initializing TUI application");

    let theme = session.persistence().load_theme().unwrap_or_default();
    output.verbose_ctx("tui", &format!("Theme: {}", theme));

    let source = HttpSuggestionSource::new(&session.config.suggestion)?;
    output.verbose_ctx("tui", &format!("Suggestion endpoint: {}", source.endpoint()));

    let tick_rate_ms = session.config.ui.tick_rate_ms;
    let event_handler = EventHandler::new(tick_rate_ms);

    let mut app = App::new(
        session.store,
        theme,
        ViewQuery::new(search, filter),
        Arc::new(source),
        event_handler.sender(),
    );

    // Initialize terminal
    let mut terminal = ui::init_terminal()?;

    // Run the main loop with panic safety
    // This ensures terminal is restored even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, &event_handler)
    }));

    // Always restore terminal, even on panic
    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}

