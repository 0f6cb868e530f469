//! Terminal initialization, restoration and theme colors

use std::io::{self, stdout, Stdout};

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::domain::Theme;

/// Terminal type alias
pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode
pub fn init_terminal() -> Result<Terminal> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = ratatui::Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Colors for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub highlight_bg: Color,
    pub alert: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                bg: Color::White,
                fg: Color::Black,
                accent: Color::Blue,
                muted: Color::Gray,
                highlight_bg: Color::LightBlue,
                alert: Color::Red,
            },
            Theme::Dark => Self {
                bg: Color::Black,
                fg: Color::White,
                accent: Color::Cyan,
                muted: Color::DarkGray,
                highlight_bg: Color::DarkGray,
                alert: Color::LightRed,
            },
        }
    }

    /// Base style for every panel
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn accent(&self) -> Style {
        self.base().fg(self.accent)
    }

    /// Completed rows are dimmed and struck through
    pub fn completed(&self) -> Style {
        self.base().fg(self.muted).add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn themes_have_distinct_backgrounds() {
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);
        assert_ne!(light.bg, dark.bg);
        assert_ne!(light.fg, dark.fg);
    }

    #[test]
    fn completed_style_is_struck_through() {
        let style = Palette::for_theme(Theme::Dark).completed();
        assert!(style.add_modifier.contains(Modifier::CROSSED_OUT));
    }
}
