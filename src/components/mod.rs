//! Reusable TUI components shared by every screen.

pub mod help_overlay;
pub mod keybindings;
pub mod nav_bar;
