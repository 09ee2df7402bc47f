//! Landing page
//!
//! Headline, the three "How It Works" cards, the Premium plan and the menu.

use super::header::HeaderRenderer;
use crate::app::{AppState, LandingAction};
use crate::theme::{Styles, UiConstants};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use strum::IntoEnumIterator;

const HOW_IT_WORKS: [(&str, &str); 3] = [
    ("Set Your Preferences", "Choose categories, brands, and your budget."),
    ("AI Finds Deals", "Our AI scans thousands of retailers for the best matches."),
    ("Get Notified", "Receive instant alerts for the best deals."),
];

const PREMIUM_FEATURES: [&str; 6] = [
    "Advanced AI deal analysis",
    "Unlimited categories",
    "Real-time price tracking",
    "Priority deal notifications",
    "Price history & predictions",
    "Exclusive early access to deals",
];

pub fn render_landing(f: &mut Frame, state: &AppState, area: Rect, header: &HeaderRenderer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(UiConstants::HEADER_HEIGHT),
            Constraint::Length(3), // Pitch
            Constraint::Length(5), // How it works
            Constraint::Min(8),    // Pricing + menu
        ])
        .split(area);

    header.render_header(f, chunks[0]);

    let pitch = Paragraph::new(
        "AI-powered deal hunting and auto-purchasing. Save time, money, and grab the best \
         discounts before they're gone.",
    )
    .style(Styles::text_secondary())
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    f.render_widget(pitch, chunks[1]);

    render_how_it_works(f, chunks[2]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[3]);
    render_pricing(f, state, bottom[0]);
    render_menu(f, state, bottom[1]);
}

fn render_how_it_works(f: &mut Frame, area: Rect) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (i, (title, text)) in HOW_IT_WORKS.iter().enumerate() {
        let card = Paragraph::new(*text)
            .style(Styles::text())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_inactive())
                    .title(Span::styled(format!(" {}. {} ", i + 1, title), Styles::header())),
            );
        f.render_widget(card, cards[i]);
    }
}

fn render_pricing(f: &mut Frame, state: &AppState, area: Rect) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Premium  ", Styles::title()),
            Span::styled(state.payment_request.price_label(), Styles::price()),
            Span::styled(" /one-time", Styles::text_muted()),
        ]),
        Line::from(Span::styled("Full access to all features", Styles::text_secondary())),
        Line::from(""),
    ];
    lines.extend(
        PREMIUM_FEATURES
            .iter()
            .map(|feature| Line::from(vec![Span::styled("  + ", Styles::success()), Span::raw(*feature)])),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Secure payment. Money-back guarantee.",
        Styles::text_muted(),
    )));

    let pricing = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_inactive())
            .title(" Simple, Transparent Pricing "),
    );
    f.render_widget(pricing, area);
}

fn render_menu(f: &mut Frame, state: &AppState, area: Rect) {
    let items: Vec<ListItem> = LandingAction::iter()
        .enumerate()
        .map(|(i, action)| {
            let style = if i == state.landing_selection {
                Styles::selected()
            } else {
                Styles::unselected()
            };
            ListItem::new(format!("  {}", action)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(" Start Finding Deals "),
    );
    let mut list_state = ListState::default();
    list_state.select(Some(state.landing_selection));
    f.render_stateful_widget(list, area, &mut list_state);
}
