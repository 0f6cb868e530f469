//! Key bindings
//!
//! A single table maps (input mode, key) to an [`Action`]. The app never
//! inspects raw keys itself: it looks the key up here and dispatches the
//! resulting action. Printable characters typed into the search box or the
//! note modal become [`Action::InsertChar`]; any key dismisses an alert.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which part of the UI receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Search,
    Modal,
    Alert,
}

/// Everything a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    ToggleSelected,
    EditSelected,
    DeleteSelected,
    OpenAddModal,
    FocusSearch,
    ConfirmSearch,
    ClearSearch,
    CycleFilter,
    ToggleTheme,
    FetchSuggestion,
    ShowHelp,
    Apply,
    Cancel,
    InsertChar(char),
    DeleteChar,
    DismissAlert,
}

/// One row of the binding table
#[derive(Debug, Clone, Copy)]
pub struct Binding {
    /// `None` applies in every mode
    pub mode: Option<Mode>,
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: Action,
    /// Shown in the help line when set
    pub help: Option<&'static str>,
}

const fn bind(mode: Mode, code: KeyCode, action: Action, help: Option<&'static str>) -> Binding {
    Binding {
        mode: Some(mode),
        code,
        modifiers: KeyModifiers::NONE,
        action,
        help,
    }
}

pub const BINDINGS: &[Binding] = &[
    Binding {
        mode: None,
        code: KeyCode::Char('c'),
        modifiers: KeyModifiers::CONTROL,
        action: Action::Quit,
        help: None,
    },
    // Normal
    bind(Mode::Normal, KeyCode::Char('q'), Action::Quit, Some("q:quit")),
    bind(Mode::Normal, KeyCode::Char('j'), Action::MoveDown, Some("j/k:move")),
    bind(Mode::Normal, KeyCode::Down, Action::MoveDown, None),
    bind(Mode::Normal, KeyCode::Char('k'), Action::MoveUp, None),
    bind(Mode::Normal, KeyCode::Up, Action::MoveUp, None),
    bind(Mode::Normal, KeyCode::Char(' '), Action::ToggleSelected, Some("space:done")),
    bind(Mode::Normal, KeyCode::Char('x'), Action::ToggleSelected, None),
    bind(Mode::Normal, KeyCode::Char('e'), Action::EditSelected, Some("e:edit")),
    bind(Mode::Normal, KeyCode::Enter, Action::EditSelected, None),
    bind(Mode::Normal, KeyCode::Char('d'), Action::DeleteSelected, Some("d:delete")),
    bind(Mode::Normal, KeyCode::Delete, Action::DeleteSelected, None),
    bind(Mode::Normal, KeyCode::Char('n'), Action::OpenAddModal, Some("n:new")),
    bind(Mode::Normal, KeyCode::Char('a'), Action::OpenAddModal, None),
    bind(Mode::Normal, KeyCode::Char('/'), Action::FocusSearch, Some("/:search")),
    bind(Mode::Normal, KeyCode::Esc, Action::ClearSearch, None),
    bind(Mode::Normal, KeyCode::Char('f'), Action::CycleFilter, Some("f:filter")),
    bind(Mode::Normal, KeyCode::Tab, Action::CycleFilter, None),
    bind(Mode::Normal, KeyCode::Char('t'), Action::ToggleTheme, Some("t:theme")),
    bind(Mode::Normal, KeyCode::Char('g'), Action::FetchSuggestion, Some("g:idea")),
    bind(Mode::Normal, KeyCode::Char('?'), Action::ShowHelp, None),
    // Search box
    bind(Mode::Search, KeyCode::Enter, Action::ConfirmSearch, None),
    bind(Mode::Search, KeyCode::Esc, Action::ClearSearch, None),
    bind(Mode::Search, KeyCode::Backspace, Action::DeleteChar, None),
    bind(Mode::Search, KeyCode::Down, Action::MoveDown, None),
    bind(Mode::Search, KeyCode::Up, Action::MoveUp, None),
    // Note modal
    bind(Mode::Modal, KeyCode::Enter, Action::Apply, None),
    bind(Mode::Modal, KeyCode::Esc, Action::Cancel, None),
    bind(Mode::Modal, KeyCode::Backspace, Action::DeleteChar, None),
];

/// Resolves a key press in `mode` to an action
pub fn lookup(mode: Mode, key: &KeyEvent) -> Option<Action> {
    let bound = BINDINGS
        .iter()
        .filter(|b| b.mode.map_or(true, |m| m == mode))
        .find(|b| b.code == key.code && key.modifiers.contains(b.modifiers))
        .map(|b| b.action);

    if bound.is_some() {
        return bound;
    }

    match (mode, key.code) {
        (Mode::Alert, _) => Some(Action::DismissAlert),
        (Mode::Search | Mode::Modal, KeyCode::Char(c))
            if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(Action::InsertChar(c))
        }
        _ => None,
    }
}

/// Help line listing the main normal-mode keys
pub fn help_line() -> String {
    BINDINGS
        .iter()
        .filter_map(|b| b.help)
        .collect::<Vec<_>>()
        .join(" ")
}
