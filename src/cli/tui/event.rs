//! Event handling for the TUI

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::suggestion::SuggestionError;

/// Events processed by the UI loop, one at a time in arrival order
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal was resized; the next draw picks up the new size
    Resize,
    /// Tick event for periodic updates
    Tick,
    /// A suggestion fetch finished
    Suggestion(Result<String, SuggestionError>),
}

/// Polls terminal input on a separate thread
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    /// Kept so workers can post results back into the loop
    tx: mpsc::Sender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate in milliseconds
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();

        thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                if let Ok(evt) = event::read() {
                    let forwarded = match evt {
                        // Only key presses, not releases
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            Some(Event::Key(key))
                        }
                        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                        _ => None,
                    };
                    if let Some(evt) = forwarded {
                        if tx_clone.send(evt).is_err() {
                            break;
                        }
                    }
                }
            } else if tx_clone.send(Event::Tick).is_err() {
                break;
            }
        });

        Self { rx, tx }
    }

    /// A sender for posting events from worker threads
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    /// Receive the next event (blocking)
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}
