//! Bottom navigation bar with the key hints for the current mode.

use super::keybindings::NavBarItem;
use crate::theme::Styles;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub struct NavBar {
    items: Vec<NavBarItem>,
}

impl NavBar {
    pub fn new(items: Vec<NavBarItem>) -> Self {
        Self { items }
    }

    /// Spans of the form ` Key  Label `, one pair per item.
    pub fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::with_capacity(self.items.len() * 2);
        for item in &self.items {
            spans.push(Span::styled(format!(" {} ", item.key_display), Styles::nav_key()));
            spans.push(Span::styled(format!(" {}  ", item.action_label), Styles::nav_hint()));
        }
        spans
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        f.render_widget(Paragraph::new(Line::from(self.spans())), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_spans_per_item() {
        let bar = NavBar::new(vec![
            NavBarItem {
                key_display: "Q".to_string(),
                action_label: "Quit".to_string(),
            },
            NavBarItem {
                key_display: "?".to_string(),
                action_label: "Help".to_string(),
            },
        ]);
        let spans = bar.spans();
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].content, " Q ");
        assert_eq!(spans[1].content, " Quit  ");
    }
}
