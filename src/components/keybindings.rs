//! Keybinding system for context-aware keyboard shortcuts
//!
//! Provides a registry of keybindings that change based on the current
//! application mode. The registry drives the navigation bar and the help
//! overlay; key dispatch itself lives in `app::handlers`.

use crate::app::AppMode;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Actions that can be triggered by keybindings
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyAction {
    NavigateUp,
    NavigateDown,
    PreviousOption,
    NextOption,
    PageUp,
    PageDown,
    Select,
    Toggle,
    NextStep,
    PreviousStep,
    Search,
    SaveDeal,
    Refresh,
    Report,
    EditPreferences,
    OpenAdmin,
    Logout,
    Back,
    Quit,
    Help,
}

/// A keybinding definition
#[derive(Debug, Clone)]
pub struct Keybinding {
    pub key: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: KeyAction,
    pub display: String,
    pub description: String,
}

impl Keybinding {
    /// Create a new keybinding with no modifiers
    pub fn new(key: KeyCode, action: KeyAction, display: &str, description: &str) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::NONE,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }

    /// Create a keybinding with modifiers
    pub fn with_modifiers(
        key: KeyCode,
        modifiers: KeyModifiers,
        action: KeyAction,
        display: &str,
        description: &str,
    ) -> Self {
        Self {
            key,
            modifiers,
            action,
            display: display.to_string(),
            description: description.to_string(),
        }
    }
}

/// Context-aware keybinding registry
pub struct KeybindingContext {
    /// Mode-specific keybindings
    mode_bindings: HashMap<AppMode, Vec<Keybinding>>,
    /// Global keybindings (available in modes without a text field)
    global_bindings: Vec<Keybinding>,
}

impl Default for KeybindingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingContext {
    /// Create a new keybinding context with default bindings
    pub fn new() -> Self {
        let mut ctx = Self {
            mode_bindings: HashMap::new(),
            global_bindings: Vec::new(),
        };
        ctx.register_defaults();
        ctx
    }

    /// Register default keybindings for all modes
    fn register_defaults(&mut self) {
        self.global_bindings = vec![
            Keybinding::new(KeyCode::Char('?'), KeyAction::Help, "?", "Help"),
            Keybinding::new(KeyCode::Char('q'), KeyAction::Quit, "Q", "Quit"),
        ];

        self.mode_bindings.insert(
            AppMode::Landing,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Navigate up"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Navigate down"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Select"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Preferences,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous field"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next field"),
                Keybinding::new(KeyCode::Left, KeyAction::PreviousOption, "Left", "Previous option / lower"),
                Keybinding::new(KeyCode::Right, KeyAction::NextOption, "Right", "Next option / raise"),
                Keybinding::new(KeyCode::PageUp, KeyAction::PageUp, "PgUp", "Page up"),
                Keybinding::new(KeyCode::PageDown, KeyAction::PageDown, "PgDn", "Page down"),
                Keybinding::new(KeyCode::Char(' '), KeyAction::Toggle, "Space", "Toggle category"),
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Next / pay"),
                Keybinding::new(KeyCode::Tab, KeyAction::NextStep, "Tab", "Next step"),
                Keybinding::with_modifiers(
                    KeyCode::BackTab,
                    KeyModifiers::SHIFT,
                    KeyAction::PreviousStep,
                    "S-Tab",
                    "Previous step",
                ),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Back to home"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Dashboard,
            vec![
                Keybinding::new(KeyCode::Up, KeyAction::NavigateUp, "Up", "Previous deal"),
                Keybinding::new(KeyCode::Down, KeyAction::NavigateDown, "Down", "Next deal"),
                Keybinding::new(KeyCode::Left, KeyAction::PreviousOption, "Left", "Previous category"),
                Keybinding::new(KeyCode::Right, KeyAction::NextOption, "Right", "Next category"),
                Keybinding::new(KeyCode::Char('/'), KeyAction::Search, "/", "Search"),
                Keybinding::new(KeyCode::Char('s'), KeyAction::SaveDeal, "S", "Save deal"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Refresh, "R", "Refresh"),
                Keybinding::new(KeyCode::Char('g'), KeyAction::Report, "G", "Report"),
                Keybinding::new(KeyCode::Char('p'), KeyAction::EditPreferences, "P", "Preferences"),
                Keybinding::new(KeyCode::Char('a'), KeyAction::OpenAdmin, "A", "Admin"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Home"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::AdminLogin,
            vec![
                Keybinding::new(KeyCode::Enter, KeyAction::Select, "Enter", "Sign in"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Home"),
            ],
        );

        self.mode_bindings.insert(
            AppMode::Admin,
            vec![
                Keybinding::new(KeyCode::Left, KeyAction::PreviousOption, "Left", "Previous tab"),
                Keybinding::new(KeyCode::Right, KeyAction::NextOption, "Right", "Next tab"),
                Keybinding::new(KeyCode::Char('r'), KeyAction::Refresh, "R", "Reload"),
                Keybinding::new(KeyCode::Char('o'), KeyAction::Logout, "O", "Log out"),
                Keybinding::new(KeyCode::Esc, KeyAction::Back, "Esc", "Home"),
            ],
        );
    }

    /// Get keybindings for a specific mode (includes global bindings)
    pub fn get_bindings(&self, mode: &AppMode) -> Vec<&Keybinding> {
        let mut bindings: Vec<&Keybinding> = Vec::new();

        if let Some(mode_bindings) = self.mode_bindings.get(mode) {
            bindings.extend(mode_bindings.iter());
        }

        // The password prompt is a text field; ? and q are typed there
        if *mode != AppMode::AdminLogin {
            bindings.extend(self.global_bindings.iter());
        }

        bindings
    }

    /// Get navigation bar items for display
    pub fn get_nav_items(&self, mode: &AppMode) -> Vec<NavBarItem> {
        let bindings = self.get_bindings(mode);

        let priority_actions = match mode {
            AppMode::Landing => vec![
                KeyAction::NavigateUp,
                KeyAction::Select,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::Preferences => vec![
                KeyAction::NavigateUp,
                KeyAction::PreviousOption,
                KeyAction::Toggle,
                KeyAction::NextStep,
                KeyAction::PreviousStep,
                KeyAction::Back,
                KeyAction::Help,
            ],
            AppMode::Dashboard => vec![
                KeyAction::NavigateUp,
                KeyAction::PreviousOption,
                KeyAction::Search,
                KeyAction::SaveDeal,
                KeyAction::Refresh,
                KeyAction::Report,
                KeyAction::Help,
                KeyAction::Quit,
            ],
            AppMode::AdminLogin => vec![KeyAction::Select, KeyAction::Back],
            AppMode::Admin => vec![
                KeyAction::PreviousOption,
                KeyAction::Refresh,
                KeyAction::Logout,
                KeyAction::Back,
                KeyAction::Quit,
            ],
        };

        // Combine Up/Down and Left/Right into single items for cleaner display
        let mut items: Vec<NavBarItem> = Vec::new();
        for action in priority_actions {
            let Some(binding) = bindings.iter().find(|b| b.action == action) else {
                continue;
            };
            let item = match action {
                KeyAction::NavigateUp | KeyAction::NavigateDown => NavBarItem {
                    key_display: "Up/Dn".to_string(),
                    action_label: "Navigate".to_string(),
                },
                KeyAction::PreviousOption | KeyAction::NextOption => NavBarItem {
                    key_display: "Lt/Rt".to_string(),
                    action_label: match mode {
                        AppMode::Preferences => "Change",
                        AppMode::Dashboard => "Category",
                        _ => "Tab",
                    }
                    .to_string(),
                },
                _ => NavBarItem {
                    key_display: binding.display.clone(),
                    action_label: binding.description.clone(),
                },
            };
            items.push(item);
        }

        items
    }

    /// Get full help content for a mode (for help overlay)
    pub fn get_help_content(&self, mode: &AppMode) -> Vec<HelpSection> {
        let groups: [(&str, fn(&KeyAction) -> bool); 3] = [
            ("Navigation", |a| {
                matches!(
                    a,
                    KeyAction::NavigateUp
                        | KeyAction::NavigateDown
                        | KeyAction::PreviousOption
                        | KeyAction::NextOption
                        | KeyAction::PageUp
                        | KeyAction::PageDown
                        | KeyAction::NextStep
                        | KeyAction::PreviousStep
                )
            }),
            ("Actions", |a| {
                matches!(
                    a,
                    KeyAction::Select
                        | KeyAction::Toggle
                        | KeyAction::Search
                        | KeyAction::SaveDeal
                        | KeyAction::Refresh
                        | KeyAction::Report
                        | KeyAction::EditPreferences
                        | KeyAction::OpenAdmin
                        | KeyAction::Logout
                )
            }),
            ("General", |a| {
                matches!(a, KeyAction::Back | KeyAction::Help | KeyAction::Quit)
            }),
        ];

        let bindings = self.get_bindings(mode);
        groups
            .iter()
            .filter_map(|(title, belongs)| {
                let items: Vec<(String, String)> = bindings
                    .iter()
                    .filter(|b| belongs(&b.action))
                    .map(|b| (b.display.clone(), b.description.clone()))
                    .collect();
                (!items.is_empty()).then(|| HelpSection {
                    title: title.to_string(),
                    items,
                })
            })
            .collect()
    }
}

/// Navigation bar item for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavBarItem {
    pub key_display: String,
    pub action_label: String,
}

/// Help section for the help overlay
#[derive(Debug, Clone)]
pub struct HelpSection {
    pub title: String,
    pub items: Vec<(String, String)>,
}
