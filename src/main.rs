//! todo-notes - Local-first task list for the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = todo_notes::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
