//! List view: header, search and filter controls, task list, status bar

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::cli::tui::app::App;
use crate::cli::tui::bindings::{help_line, Mode};
use crate::cli::tui::ui::Palette;
use crate::cli::tui::utils::fit_to_width;
use crate::domain::StatusFilter;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let palette = Palette::for_theme(app.theme());

    frame.render_widget(Block::default().style(palette.base()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Search + filter
            Constraint::Min(5),    // Tasks
            Constraint::Length(3), // Status bar
        ])
        .split(area);

    draw_header(frame, app, &palette, chunks[0]);
    draw_controls(frame, app, &palette, chunks[1]);
    draw_tasks(frame, app, &palette, chunks[2]);
    draw_status_bar(frame, app, &palette, chunks[3]);

    if app.modal().is_some() {
        draw_modal(frame, app, &palette, area);
    }
    if app.alert().is_some() {
        draw_alert(frame, app, &palette, area);
    }
}

fn draw_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let fetching = if app.is_fetching() {
        format!("  {} fetching idea", SPINNER[app.spinner_frame() % SPINNER.len()])
    } else {
        String::new()
    };
    let text = format!("TODO LIST  [{} theme]{}", app.theme(), fetching);

    let header = Paragraph::new(text)
        .style(palette.accent().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).style(palette.base()));

    frame.render_widget(header, area);
}

fn draw_controls(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(65), // Search
            Constraint::Percentage(35), // Filter
        ])
        .split(area);

    let searching = app.mode() == Mode::Search;
    let term = &app.query().search_term;
    let search_text = if searching {
        format!("{}_", term)
    } else if term.is_empty() {
        "Search note...".to_string()
    } else {
        term.clone()
    };
    let search_style = if searching {
        palette.accent()
    } else if term.is_empty() {
        palette.base().fg(palette.muted)
    } else {
        palette.base()
    };

    let search = Paragraph::new(search_text).style(search_style).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(if searching { palette.accent() } else { palette.base() })
            .style(palette.base()),
    );
    frame.render_widget(search, chunks[0]);

    let spans: Vec<Span> = StatusFilter::ALL
        .iter()
        .flat_map(|filter| {
            let label = filter.as_str().to_uppercase();
            let span = if *filter == app.status_filter() {
                Span::styled(format!("[{}]", label), palette.accent().add_modifier(Modifier::BOLD))
            } else {
                Span::styled(format!(" {} ", label), palette.base())
            };
            [span, Span::raw(" ")]
        })
        .collect();

    let filter = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("Filter")
            .borders(Borders::ALL)
            .style(palette.base()),
    );
    frame.render_widget(filter, chunks[1]);
}

fn draw_tasks(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .title(format!("Notes ({})", app.view().len()))
        .borders(Borders::ALL)
        .style(palette.base());

    if app.view().empty_state {
        let empty = Paragraph::new("Empty...")
            .style(palette.base().fg(palette.muted))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // Borders, highlight symbol and checkbox
    let width = area.width.saturating_sub(10) as usize;

    let items: Vec<ListItem> = app
        .view()
        .rows
        .iter()
        .map(|row| {
            let checkbox = if row.completed { "[x]" } else { "[ ]" };
            let content = format!("{} {}", checkbox, fit_to_width(&row.text, width));
            let style = if row.completed {
                palette.completed()
            } else {
                palette.base()
            };
            ListItem::new(content).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.highlight())
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let (content, style) = match app.mode() {
        Mode::Search => (
            "Type to filter  [Enter]keep [Esc]clear".to_string(),
            palette.accent(),
        ),
        Mode::Modal => (
            "[Enter]apply [Esc]cancel".to_string(),
            palette.accent(),
        ),
        Mode::Alert => ("Press any key".to_string(), palette.base().fg(palette.alert)),
        Mode::Normal => match app.status_message() {
            Some(msg) => (msg.to_string(), palette.base()),
            None => (help_line(), palette.base()),
        },
    };

    let paragraph = Paragraph::new(content)
        .style(style)
        .block(Block::default().borders(Borders::ALL).style(palette.base()));

    frame.render_widget(paragraph, area);
}

fn draw_modal(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let Some(modal) = app.modal() else {
        return;
    };

    let popup = centered_rect(60, 5, area);
    frame.render_widget(Clear, popup);

    let input = Paragraph::new(format!("{}_", modal.input))
        .style(palette.base())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(modal.title())
                .borders(Borders::ALL)
                .border_style(palette.accent())
                .style(palette.base()),
        );

    frame.render_widget(input, popup);
}

fn draw_alert(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let Some(message) = app.alert() else {
        return;
    };

    let popup = centered_rect(60, 7, area);
    frame.render_widget(Clear, popup);

    let alert = Paragraph::new(message)
        .style(palette.base().fg(palette.alert))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Error")
                .borders(Borders::ALL)
                .border_style(palette.base().fg(palette.alert))
                .style(palette.base()),
        );

    frame.render_widget(alert, popup);
}

/// Rect of `percent_x` width and `height` rows centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
