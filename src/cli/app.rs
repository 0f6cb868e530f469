//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::session::Session;
use super::task::{self, ThemeArg};
use super::tui;
use crate::domain::{StatusFilter, TaskId};

#[derive(Parser)]
#[command(name = "todo")]
#[command(author, version, about = "Local-first task list for the terminal")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Directory holding the saved tasks and theme
    #[arg(long, global = true, env = "TODO_NOTES_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to the configuration file
    #[arg(long, global = true, env = "TODO_NOTES_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run (launches the interactive UI when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive terminal UI
    Ui {
        /// Initial status filter (all, active, completed)
        #[arg(long)]
        filter: Option<StatusFilter>,

        /// Initial search term
        #[arg(long, short)]
        search: Option<String>,
    },

    /// List tasks matching a search term and status filter
    List {
        /// Case-insensitive substring to look for
        #[arg(long, short)]
        search: Option<String>,

        /// Status filter (all, active, completed)
        #[arg(long, default_value = "all")]
        filter: StatusFilter,
    },

    /// Add a task
    Add {
        /// Task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Replace the text of a task
    Edit {
        /// Task ID
        id: TaskId,

        /// New task text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Mark a task as done, or reopen it
    Toggle {
        /// Task ID
        id: TaskId,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: TaskId,
    },

    /// Fetch a random suggestion and add it as a task
    Suggest,

    /// Show or change the theme preference
    Theme {
        /// New theme (omit to show the current one)
        value: Option<ThemeArg>,
    },

    /// Show where data is stored
    Path,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("todo starting");

    let mut session = Session::open(&output, cli.data_dir.as_deref(), cli.config.as_deref())?;

    match cli.command {
        None => {
            let filter = session.config.ui.default_filter;
            tui::run(&output, session, filter, String::new())?
        }
        Some(Commands::Ui { filter, search }) => {
            let filter = filter.unwrap_or(session.config.ui.default_filter);
            tui::run(&output, session, filter, search.unwrap_or_default())?
        }
        Some(Commands::List { search, filter }) => {
            task::list(&output, &session, search.as_deref().unwrap_or(""), filter)?
        }
        Some(Commands::Add { text }) => task::add(&output, &mut session, &text.join(" "))?,
        Some(Commands::Edit { id, text }) => {
            task::edit(&output, &mut session, id, &text.join(" "))?
        }
        Some(Commands::Toggle { id }) => task::toggle(&output, &mut session, id)?,
        Some(Commands::Delete { id }) => task::delete(&output, &mut session, id)?,
        Some(Commands::Suggest) => task::suggest(&output, &mut session)?,
        Some(Commands::Theme { value }) => task::theme(&output, &session, value)?,
        Some(Commands::Path) => task::paths(&output, &session)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_ui() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_list_with_filter() {
        let cli = Cli::try_parse_from(["todo", "list", "--filter", "completed", "-s", "report"]).unwrap();
        match cli.command {
            Some(Commands::List { search, filter }) => {
                assert_eq!(search.as_deref(), Some("report"));
                assert_eq!(filter, StatusFilter::Completed);
            }
            _ => panic!("Expected list command"),
        }
    }

    #[test]
    fn parse_add_joins_words() {
        let cli = Cli::try_parse_from(["todo", "add", "Buy", "milk"]).unwrap();
        match cli.command {
            Some(Commands::Add { text }) => assert_eq!(text.join(" "), "Buy milk"),
            _ => panic!("Expected add command"),
        }
    }

    #[test]
    fn parse_rejects_bad_id() {
        assert!(Cli::try_parse_from(["todo", "toggle", "abc"]).is_err());
    }

    #[test]
    fn parse_rejects_bad_filter() {
        assert!(Cli::try_parse_from(["todo", "list", "--filter", "pending"]).is_err());
    }
}
