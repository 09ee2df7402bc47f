//! Single-line text input
//!
//! Used for the dashboard search box, the admin password prompt and the
//! payment-method field. Masked inputs never echo their value.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Outcome of feeding a key to an input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResult {
    /// Keep editing
    Continue,
    /// Enter pressed; carries the value
    Confirm(String),
    /// Esc pressed
    Cancel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    placeholder: String,
    masked: bool,
}

impl TextInput {
    pub fn new(placeholder: &str) -> Self {
        Self {
            value: String::new(),
            placeholder: placeholder.to_string(),
            masked: false,
        }
    }

    /// Input that shows `*` for every character typed
    pub fn masked(placeholder: &str) -> Self {
        Self {
            masked: true,
            ..Self::new(placeholder)
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) -> InputResult {
        match key.code {
            KeyCode::Enter => return InputResult::Confirm(self.value.clone()),
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Backspace => {
                self.value.pop();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.clear();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.push(c);
            }
            _ => {}
        }
        InputResult::Continue
    }

    /// Get the current display value for the input
    pub fn display_value(&self) -> String {
        if self.value.is_empty() {
            self.placeholder.clone()
        } else if self.masked {
            "*".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_and_confirm() {
        let mut input = TextInput::new("Search deals...");
        assert_eq!(input.display_value(), "Search deals...");

        for c in "tv".chars() {
            assert_eq!(input.handle_key(key(KeyCode::Char(c))), InputResult::Continue);
        }
        input.handle_key(key(KeyCode::Char('x')));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "tv");
        assert_eq!(
            input.handle_key(key(KeyCode::Enter)),
            InputResult::Confirm("tv".to_string())
        );
    }

    #[test]
    fn test_masked_display() {
        let mut input = TextInput::masked("Password");
        for c in "s3cret".chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(input.display_value(), "******");
        assert_eq!(input.value(), "s3cret");
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::new("");
        input.handle_key(key(KeyCode::Char('a')));
        input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert!(input.is_empty());
        assert_eq!(input.handle_key(key(KeyCode::Esc)), InputResult::Cancel);
    }
}
