//! # Command-Line Interface
//!
//! User-facing commands, output formatting and the interactive UI.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | *(none)*, `ui` | Interactive terminal UI |
//! | `list` | Filtered, searchable task list |
//! | `add`, `edit`, `toggle`, `delete` | Task mutations |
//! | `suggest` | Add a random suggestion from the configured endpoint |
//! | `theme` | Show or change the theme preference |
//! | `path` | Show where data is stored |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! todo --verbose list
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod session;
mod task;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
pub use session::Session;
