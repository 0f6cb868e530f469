//! TUI application state and logic

use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread;

use anyhow::Result;

use super::bindings::{self, Action, Mode};
use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use crate::domain::{render, RenderedView, StatusFilter, TaskId, Theme, ViewQuery};
use crate::store::TaskStore;
use crate::suggestion::{SuggestionError, SuggestionSource};

/// What the note modal applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Add,
    Edit(TaskId),
}

/// Add/edit modal with its text input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal {
    pub kind: ModalKind,
    pub input: String,
}

impl Modal {
    fn add() -> Self {
        Self {
            kind: ModalKind::Add,
            input: String::new(),
        }
    }

    fn edit(id: TaskId, text: &str) -> Self {
        Self {
            kind: ModalKind::Edit(id),
            input: text.to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            ModalKind::Add => "NEW NOTE",
            ModalKind::Edit(_) => "EDIT NOTE",
        }
    }
}

/// Application state
pub struct App {
    /// Task collection and write-through storage
    store: TaskStore,

    /// Search term and status filter
    query: ViewQuery,

    /// Last rendered projection of the store
    view: RenderedView,

    /// Set by the store's render listener and by query changes
    dirty: Rc<Cell<bool>>,

    /// Whether keys go to the search box
    searching: bool,

    /// Open add/edit modal
    modal: Option<Modal>,

    /// Blocking message, dismissed by any key
    alert: Option<String>,

    /// Selected row in the rendered view
    selected: usize,

    theme: Theme,

    /// Suggestion fetches still in flight
    pending_suggestions: usize,

    /// Advances on ticks while a fetch is in flight
    spinner_frame: usize,

    suggestions: Arc<dyn SuggestionSource>,

    /// Where suggestion workers post their result
    events: Sender<Event>,

    /// Status message to display
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create a new application around an initialized store
    pub fn new(
        mut store: TaskStore,
        theme: Theme,
        query: ViewQuery,
        suggestions: Arc<dyn SuggestionSource>,
        events: Sender<Event>,
    ) -> Self {
        let dirty = Rc::new(Cell::new(true));
        let flag = Rc::clone(&dirty);
        store.subscribe(Box::new(move |_| flag.set(true)));

        let status_message = store
            .take_storage_error()
            .map(|e| format!("Could not save tasks: {}", e));

        let mut app = Self {
            store,
            query,
            view: RenderedView::default(),
            dirty,
            searching: false,
            modal: None,
            alert: None,
            selected: 0,
            theme,
            pending_suggestions: 0,
            spinner_frame: 0,
            suggestions,
            events,
            status_message,
            should_quit: false,
        };
        app.refresh_view();
        app
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: &EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| views::list::draw(frame, self))?;
            self.handle_event(events.next()?);
        }

        Ok(())
    }

    /// Current input mode, used for key lookup
    pub fn mode(&self) -> Mode {
        if self.alert.is_some() {
            Mode::Alert
        } else if self.modal.is_some() {
            Mode::Modal
        } else if self.searching {
            Mode::Search
        } else {
            Mode::Normal
        }
    }

    /// Process one event to completion
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // A status message lasts until the next key press
                self.status_message = None;
                if let Some(action) = bindings::lookup(self.mode(), &key) {
                    self.dispatch(action);
                }
            }
            Event::Resize => {} // Terminal handles resize automatically
            Event::Tick => {
                if self.pending_suggestions > 0 {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
            }
            Event::Suggestion(result) => self.finish_suggestion(result),
        }

        if let Some(e) = self.store.take_storage_error() {
            self.status_message = Some(format!("Could not save tasks: {}", e));
        }
        self.refresh_view();
    }

    /// Apply an action from the binding table
    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::MoveDown => self.move_selection_down(),
            Action::MoveUp => self.move_selection_up(),
            Action::ToggleSelected => {
                if let Some(id) = self.selected_id() {
                    self.store.toggle_completed(id);
                }
            }
            Action::EditSelected => {
                if let Some(task) = self.selected_id().and_then(|id| self.store.get(id)) {
                    self.modal = Some(Modal::edit(task.id, &task.text));
                }
            }
            Action::DeleteSelected => {
                if let Some(id) = self.selected_id() {
                    if self.store.delete(id) {
                        self.status_message = Some(format!("Deleted task {}", id));
                    }
                }
            }
            Action::OpenAddModal => self.modal = Some(Modal::add()),
            Action::FocusSearch => self.searching = true,
            Action::ConfirmSearch => self.searching = false,
            Action::ClearSearch => {
                self.searching = false;
                self.query.search_term.clear();
                self.dirty.set(true);
            }
            Action::CycleFilter => {
                self.query.status_filter = self.query.status_filter.next();
                self.dirty.set(true);
            }
            Action::ToggleTheme => self.toggle_theme(),
            Action::FetchSuggestion => self.start_suggestion(),
            Action::ShowHelp => self.status_message = Some(bindings::help_line()),
            Action::Apply => self.apply_modal(),
            Action::Cancel => self.modal = None,
            Action::InsertChar(c) => self.edit_input(|input| input.push(c)),
            Action::DeleteChar => self.edit_input(|input| {
                input.pop();
            }),
            Action::DismissAlert => self.alert = None,
        }
    }

    /// Routes text editing to the modal input or the search box
    fn edit_input(&mut self, f: impl FnOnce(&mut String)) {
        if let Some(modal) = self.modal.as_mut() {
            f(&mut modal.input);
        } else if self.searching {
            f(&mut self.query.search_term);
            self.dirty.set(true);
        }
    }

    /// Submits the modal; blank input leaves it open
    fn apply_modal(&mut self) {
        let Some(modal) = self.modal.as_ref() else {
            return;
        };
        let text = modal.input.trim().to_string();
        if text.is_empty() {
            return;
        }

        match modal.kind {
            ModalKind::Add => {
                self.store.add(text);
            }
            ModalKind::Edit(id) => {
                self.store.update(id, text);
            }
        }
        self.modal = None;
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        if let Err(e) = self.store.persistence().save_theme(self.theme) {
            self.status_message = Some(format!("Could not save theme: {}", e));
        }
    }

    /// Fetches a suggestion on a worker thread; the result comes back as an event
    fn start_suggestion(&mut self) {
        self.pending_suggestions += 1;

        let source = Arc::clone(&self.suggestions);
        let events = self.events.clone();
        thread::spawn(move || {
            // A panicking fetch still reports back so the busy indicator clears
            let result = panic::catch_unwind(AssertUnwindSafe(|| source.fetch_suggestion_text()))
                .unwrap_or_else(|_| {
                    Err(SuggestionError::Network("suggestion worker panicked".to_string()))
                });
            let _ = events.send(Event::Suggestion(result));
        });
    }

    fn finish_suggestion(&mut self, result: Result<String, SuggestionError>) {
        self.pending_suggestions = self.pending_suggestions.saturating_sub(1);

        match result {
            Ok(text) => {
                if let Some(id) = self.store.add(text) {
                    self.status_message = Some("Added a suggestion".to_string());
                    self.refresh_view();
                    if let Some(idx) = self.view.rows.iter().position(|row| row.id == id) {
                        self.selected = idx;
                    }
                }
            }
            Err(e) => {
                self.alert = Some(format!(
                    "Could not fetch an idea. Check your internet connection!\n\n{}",
                    e
                ));
            }
        }
    }

    /// Re-renders the list if the store or the query changed
    fn refresh_view(&mut self) {
        if !self.dirty.replace(false) {
            return;
        }

        self.view = render(self.store.tasks(), &self.query);
        if self.selected >= self.view.len() {
            self.selected = self.view.len().saturating_sub(1);
        }
    }

    fn move_selection_down(&mut self) {
        if !self.view.is_empty() {
            self.selected = (self.selected + 1) % self.view.len();
        }
    }

    fn move_selection_up(&mut self) {
        if !self.view.is_empty() {
            self.selected = if self.selected == 0 {
                self.view.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.view.rows.get(self.selected).map(|row| row.id)
    }

    // Public accessors for views

    pub fn view(&self) -> &RenderedView {
        &self.view
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.query.status_filter
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_fetching(&self) -> bool {
        self.pending_suggestions > 0
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{starter_tasks, Task};
    use crate::storage::{LocalStorage, MemoryStore, Persistence};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::mpsc::{self, Receiver};
    use std::time::Duration;

    struct FixedSuggestion(Result<&'static str, &'static str>);

    impl SuggestionSource for FixedSuggestion {
        fn fetch_suggestion_text(&self) -> Result<String, SuggestionError> {
            self.0
                .map(str::to_string)
                .map_err(|e| SuggestionError::Network(e.to_string()))
        }
    }

    struct Harness {
        app: App,
        storage: LocalStorage<MemoryStore>,
        rx: Receiver<Event>,
    }

    fn harness_with(suggestion: Result<&'static str, &'static str>) -> Harness {
        let storage = LocalStorage::new(MemoryStore::new());
        let store = TaskStore::initialize(Rc::new(storage.clone()));
        let (tx, rx) = mpsc::channel();
        let app = App::new(
            store,
            Theme::Light,
            ViewQuery::default(),
            Arc::new(FixedSuggestion(suggestion)),
            tx,
        );
        Harness { app, storage, rx }
    }

    fn harness() -> Harness {
        harness_with(Ok("Learn to juggle"))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn texts(app: &App) -> Vec<String> {
        app.view().rows.iter().map(|r| r.text.clone()).collect()
    }

    fn pump_suggestion(h: &mut Harness) {
        let event = h.rx.recv_timeout(Duration::from_secs(5)).unwrap();
        h.app.handle_event(event);
    }

    #[test]
    fn starts_with_starter_set_rendered() {
        let h = harness();
        assert_eq!(h.app.view().len(), 3);
        assert_eq!(h.app.mode(), Mode::Normal);
        assert!(!h.app.view().empty_state);
    }

    #[test]
    fn add_through_modal() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('n'));
        assert_eq!(h.app.mode(), Mode::Modal);
        assert_eq!(h.app.modal().unwrap().title(), "NEW NOTE");

        type_text(&mut h.app, "  Buy milk ");
        press(&mut h.app, KeyCode::Enter);

        assert_eq!(h.app.mode(), Mode::Normal);
        assert_eq!(texts(&h.app).last().unwrap(), "Buy milk");
        assert_eq!(h.storage.load_tasks().unwrap().len(), 4);
    }

    #[test]
    fn blank_modal_submission_stays_open() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('n'));
        type_text(&mut h.app, "   ");
        press(&mut h.app, KeyCode::Enter);

        assert_eq!(h.app.mode(), Mode::Modal);
        assert_eq!(h.app.store().len(), 3);
    }

    #[test]
    fn cancel_discards_modal() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('n'));
        type_text(&mut h.app, "Never mind");
        press(&mut h.app, KeyCode::Esc);

        assert_eq!(h.app.mode(), Mode::Normal);
        assert!(h.app.modal().is_none());
        assert_eq!(h.app.store().len(), 3);
    }

    #[test]
    fn edit_prefills_and_updates() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('e'));

        let modal = h.app.modal().unwrap();
        assert_eq!(modal.title(), "EDIT NOTE");
        assert_eq!(modal.input, "Go shopping");

        type_text(&mut h.app, " today");
        press(&mut h.app, KeyCode::Enter);

        assert_eq!(texts(&h.app)[0], "Go shopping today");
        assert_eq!(h.storage.load_tasks().unwrap()[0].text, "Go shopping today");
    }

    #[test]
    fn toggle_and_delete_selected() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char(' '));
        assert!(h.app.store().tasks()[0].completed);

        press(&mut h.app, KeyCode::Char('j'));
        press(&mut h.app, KeyCode::Char('d'));
        assert_eq!(
            h.storage.load_tasks().unwrap(),
            vec![
                Task {
                    completed: true,
                    ..starter_tasks()[0].clone()
                },
                starter_tasks()[2].clone(),
            ]
        );
    }

    #[test]
    fn live_search_filters_each_keystroke() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('/'));
        assert_eq!(h.app.mode(), Mode::Search);

        type_text(&mut h.app, "rep");
        assert_eq!(texts(&h.app), vec!["Prepare a report"]);

        type_text(&mut h.app, "zzz");
        assert!(h.app.view().empty_state);

        press(&mut h.app, KeyCode::Esc);
        assert_eq!(h.app.query().search_term, "");
        assert_eq!(h.app.view().len(), 3);
    }

    #[test]
    fn filter_selector_cycles() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('f'));
        assert_eq!(h.app.status_filter(), StatusFilter::Active);
        assert_eq!(h.app.view().len(), 2);

        press(&mut h.app, KeyCode::Char('f'));
        assert_eq!(h.app.status_filter(), StatusFilter::Completed);
        assert_eq!(texts(&h.app), vec!["Prepare a report"]);
    }

    #[test]
    fn selection_clamps_when_rows_disappear() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('k'));
        assert_eq!(h.app.selected(), 2);

        press(&mut h.app, KeyCode::Char('f'));
        press(&mut h.app, KeyCode::Char('f'));
        assert_eq!(h.app.selected(), 0);
    }

    #[test]
    fn status_message_clears_on_next_key() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('d'));
        assert_eq!(h.app.status_message(), Some("Deleted task 1"));

        press(&mut h.app, KeyCode::Char('j'));
        assert_eq!(h.app.status_message(), None);
    }

    #[test]
    fn theme_toggle_persists() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('t'));
        assert_eq!(h.app.theme(), Theme::Dark);
        assert_eq!(h.storage.load_theme(), Some(Theme::Dark));

        press(&mut h.app, KeyCode::Char('t'));
        assert_eq!(h.storage.load_theme(), Some(Theme::Light));
    }

    #[test]
    fn suggestion_success_adds_and_selects() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('g'));
        assert!(h.app.is_fetching());

        pump_suggestion(&mut h);

        assert!(!h.app.is_fetching());
        assert_eq!(texts(&h.app).last().unwrap(), "Learn to juggle");
        assert_eq!(h.app.selected(), 3);
        assert_eq!(h.storage.load_tasks().unwrap().len(), 4);
    }

    #[test]
    fn suggestion_failure_alerts_and_adds_nothing() {
        let mut h = harness_with(Err("offline"));
        press(&mut h.app, KeyCode::Char('g'));
        pump_suggestion(&mut h);

        assert!(!h.app.is_fetching());
        assert_eq!(h.app.mode(), Mode::Alert);
        assert!(h.app.alert().unwrap().contains("offline"));
        assert_eq!(h.app.store().len(), 3);

        press(&mut h.app, KeyCode::Char('q'));
        assert_eq!(h.app.mode(), Mode::Normal);
        assert!(!h.app.should_quit());
    }

    #[test]
    fn ctrl_c_quits_from_modal() {
        let mut h = harness();
        press(&mut h.app, KeyCode::Char('n'));
        h.app
            .handle_event(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(h.app.should_quit());
    }

    #[test]
    fn storage_failure_shows_in_status_bar() {
        let kv = MemoryStore::new();
        let storage = LocalStorage::new(kv.clone());
        let store = TaskStore::initialize(Rc::new(storage));
        let (tx, _rx) = mpsc::channel();
        let mut app = App::new(
            store,
            Theme::Light,
            ViewQuery::default(),
            Arc::new(FixedSuggestion(Ok("unused"))),
            tx,
        );

        kv.set_fail_writes(true);
        press(&mut app, KeyCode::Char(' '));

        assert!(app.status_message().unwrap().starts_with("Could not save tasks"));
        assert!(app.store().tasks()[0].completed);
    }
}
