//! User interface rendering module
//!
//! This module is organized into submodules for better maintainability:
//! - `header` - Banner, status line, progress bars and the navigation bar
//! - `landing` - Marketing page and entry menu
//! - `screens` - Preferences wizard steps
//! - `dashboard` - Deals dashboard
//! - `admin` - SuperAdmin login and dashboard

mod admin;
mod dashboard;
mod header;
mod landing;
mod screens;

use crate::app::{AppMode, AppState};
use crate::components::keybindings::KeybindingContext;
use crate::theme::UiConstants;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use header::HeaderRenderer;

/// UI renderer for the application
///
/// This is the main entry point for UI rendering. It delegates to specialized
/// submodules for different parts of the UI.
pub struct UiRenderer {
    /// Header renderer instance
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    /// Create a new UI renderer
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI based on application state
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),                                 // Main content area
                Constraint::Length(UiConstants::STATUS_BAR_HEIGHT), // Status line
                Constraint::Length(UiConstants::NAV_BAR_HEIGHT),    // Navigation bar
            ])
            .split(f.area());

        let content_area = main_chunks[0];

        match state.mode {
            AppMode::Landing => landing::render_landing(f, state, content_area, &self.header),
            AppMode::Preferences => screens::render_wizard(f, state, content_area),
            AppMode::Dashboard => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(1)])
                    .split(content_area);
                self.header.render_title(f, chunks[0], "Your Personalized Deals");
                dashboard::render_dashboard(f, state, chunks[1]);
            }
            AppMode::AdminLogin => admin::render_admin_login(f, state, content_area),
            AppMode::Admin => admin::render_admin(f, state, content_area),
        }

        header::render_status(f, state, main_chunks[1]);
        header::render_nav_bar(f, state, keybinding_ctx, main_chunks[2]);

        // Help overlay goes on top of everything
        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}
