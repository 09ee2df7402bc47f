//! Header and common widget rendering
//!
//! This module contains the ASCII art header, title rendering, the status
//! line, progress bars and the navigation bar.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::components::nav_bar::NavBar;
use crate::theme::{Colors, Styles, UiText};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Header renderer containing the ASCII art header
pub struct HeaderRenderer {
    /// ASCII art header lines
    header_lines: Vec<Line<'static>>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    /// Create a new header renderer
    pub fn new() -> Self {
        Self {
            header_lines: Self::create_header(),
        }
    }

    /// Render the ASCII art header
    pub fn render_header(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let header = Paragraph::new(self.header_lines.clone())
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Render a title section
    pub fn render_title(&self, f: &mut Frame, area: Rect, title: &str) {
        let title_widget = Paragraph::new(title)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active()),
            )
            .alignment(Alignment::Center)
            .style(Styles::title());
        f.render_widget(title_widget, area);
    }

    fn create_header() -> Vec<Line<'static>> {
        let art = [
            " ___           _  ___ _         _          _   ___ ",
            "|   \\ ___ __ _| || __(_)_ _  __| |___ _ _ /_\\ |_ _|",
            "| |) / -_) _` | || _|| | ' \\/ _` / -_) '_/ _ \\ | | ",
            "|___/\\___\\__,_|_||_| |_|_||_\\__,_\\___|_|/_/ \\_\\___|",
        ];
        let mut lines: Vec<Line<'static>> = art
            .iter()
            .map(|row| Line::from(Span::styled(*row, Style::default().fg(Colors::PRIMARY))))
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Your Personal Black Friday Shopping Assistant",
            Styles::header(),
        )));
        lines
    }
}

/// Render the one-line status bar
pub fn render_status(f: &mut Frame, state: &AppState, area: Rect) {
    let mut spans = Vec::new();
    if state.loading {
        spans.push(Span::styled(format!(" {} ", UiText::LOADING), Styles::warning()));
    }
    spans.push(Span::styled(format!(" {}", state.status_message), Styles::text_secondary()));
    if let Some(email) = &state.identity {
        spans.push(Span::styled(format!("  [{}]", email), Styles::text_muted()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render progress bar
pub fn render_progress_bar(f: &mut Frame, area: Rect, label: &str, percent: u16) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_inactive()),
        )
        .gauge_style(Styles::progress())
        .label(label.to_string())
        .percent(percent.min(100));
    f.render_widget(gauge, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let nav_items = keybinding_ctx.get_nav_items(&state.mode);
    let nav_bar = NavBar::new(nav_items);
    nav_bar.render(f, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let area = f.area();
    let help_overlay = HelpOverlay::new(&state.mode, keybinding_ctx);
    help_overlay.render(f, area);
}
