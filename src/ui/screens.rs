//! Preferences wizard screens
//!
//! One render function per step. The caption, progress gauge and button row
//! are shared.

use crate::app::{AppState, LocationField, PriceField};
use crate::location::COUNTRIES;
use crate::payment::PaymentStatus;
use crate::theme::{Styles, Theme, UiText};
use crate::wizard::WizardStep;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use strum::IntoEnumIterator;

use super::header::render_progress_bar;

/// Render the wizard: progress, the current step and the button row.
pub fn render_wizard(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Progress
            Constraint::Min(8),    // Step content
            Constraint::Length(3), // Buttons
        ])
        .split(area);

    let title = Paragraph::new("Set Up Your Deal Preferences")
        .style(Styles::title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    let step = state.wizard_step;
    render_progress_bar(f, chunks[1], &step.caption(), step.progress_percent());

    match step {
        WizardStep::Location => render_location_step(f, state, chunks[2]),
        WizardStep::Categories => render_categories_step(f, state, chunks[2]),
        WizardStep::PriceRange => render_price_step(f, state, chunks[2]),
        WizardStep::Review => render_review_step(f, state, chunks[2]),
        WizardStep::Payment => render_payment_step(f, state, chunks[2]),
    }

    render_buttons(f, state, chunks[3]);
}

fn render_buttons(f: &mut Frame, state: &AppState, area: Rect) {
    let step = state.wizard_step;
    let back_style = if step.can_go_back() {
        Styles::button_inactive()
    } else {
        Styles::text_muted()
    };

    let buttons = Paragraph::new(Line::from(vec![
        Span::styled(" [Shift+Tab] Previous ", back_style),
        Span::raw("   "),
        Span::styled(format!(" [Tab] {} ", step.forward_label()), Styles::button_active()),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(buttons, area);
}

fn field_block(label: String, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(label)
        .border_style(if focused {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        })
}

fn render_location_step(f: &mut Frame, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let location = &state.preferences.location;
    let division = location
        .division_label()
        .unwrap_or_else(|| "State/Region".to_string());

    for (i, field) in LocationField::iter().enumerate() {
        let focused = i == state.location_field;
        let (label, value, hint) = match field {
            LocationField::Country => (
                "Country".to_string(),
                location.country().map(|c| c.name),
                COUNTRIES.iter().map(|c| c.name).collect::<Vec<_>>().join(" / "),
            ),
            LocationField::Region => (
                division.clone(),
                location.region().map(|r| r.name),
                "Choose a country first".to_string(),
            ),
            LocationField::City => (
                "City".to_string(),
                location.city.as_deref(),
                "Choose a region first".to_string(),
            ),
        };

        let line = match value {
            Some(v) => Line::from(vec![
                Span::styled(if focused { "< " } else { "  " }, Styles::focused()),
                Span::styled(v.to_string(), Styles::text()),
                Span::styled(if focused { " >" } else { "" }, Styles::focused()),
            ]),
            None => Line::from(Span::styled(format!("  {}", hint), Styles::text_muted())),
        };

        let label = format!(" {} ", label);
        let widget = Paragraph::new(line).block(field_block(label, focused));
        f.render_widget(widget, rows[i]);
    }

    let status = if location.is_complete() {
        Span::styled(format!("  {}", location.summary()), Styles::success())
    } else {
        Span::styled("  Use Left/Right to choose each field", Styles::text_muted())
    };
    f.render_widget(Paragraph::new(Line::from(status)), rows[3]);
}

fn render_categories_step(f: &mut Frame, state: &AppState, area: Rect) {
    let selection = &state.preferences.selection;
    let items: Vec<ListItem> = state
        .category_rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let (checked, text) = match &row.subcategory {
                None => (
                    selection.is_category_selected(&row.category),
                    state.catalog.display_name(&row.category).to_string(),
                ),
                Some(sub) => (selection.is_subcategory_selected(sub), format!("    {}", sub)),
            };
            let marker = if checked { "[x]" } else { "[ ]" };
            let style = if i == state.category_cursor {
                Styles::selected()
            } else if checked {
                Styles::success()
            } else if row.subcategory.is_none() {
                Styles::text()
            } else {
                Styles::unselected()
            };
            ListItem::new(format!(" {} {}", marker, text)).style(style)
        })
        .collect();

    let title = format!(
        " Categories ({} selected, {} subcategories) ",
        selection.category_count(),
        selection.subcategory_count()
    );
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(title),
    );
    let mut list_state = ListState::default();
    list_state.select(Some(state.category_cursor));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_price_step(f: &mut Frame, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    let range = &state.preferences.price_range;
    let level = state.preferences.notification();

    for (i, field) in PriceField::iter().enumerate() {
        let focused = i == state.price_field;
        let label = format!(" {} ", field);
        let body = match field {
            PriceField::Min => vec![Line::from(Span::styled(format!("  ${}", range.min()), Styles::price()))],
            PriceField::Max => vec![Line::from(Span::styled(format!("  ${}", range.max()), Styles::price()))],
            PriceField::Notifications => vec![
                Line::from(vec![
                    Span::styled(format!("  {:>3}  ", state.preferences.notification_level), Styles::text()),
                    Span::styled(level.to_string(), Theme::notification_style(level)),
                ]),
                Line::from(Span::styled(format!("  {}", level.description()), Styles::text_secondary())),
            ],
        };
        let widget = Paragraph::new(body).block(field_block(label, focused));
        f.render_widget(widget, rows[i]);
    }

    let summary = Paragraph::new(Line::from(vec![
        Span::styled("  Price Range: ", Styles::text_muted()),
        Span::styled(range.label(), Styles::text()),
    ]));
    f.render_widget(summary, rows[3]);
}

fn render_review_step(f: &mut Frame, state: &AppState, area: Rect) {
    let mut lines = vec![Line::from("")];
    for (label, value) in state.preferences.review_lines(&state.catalog) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<20}", format!("{}:", label)), Styles::header()),
            Span::styled(value, Styles::text()),
        ]));
        lines.push(Line::from(""));
    }

    let review = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(" Review Your Preferences "),
    );
    f.render_widget(review, area);
}

fn render_payment_step(f: &mut Frame, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Fee
            Constraint::Length(3), // Token input
            Constraint::Min(2),    // Status
        ])
        .split(area);

    let fee = Paragraph::new(Line::from(vec![
        Span::styled("  One-time setup fee: ", Styles::text_secondary()),
        Span::styled(state.payment_request.price_label(), Styles::price()),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(fee, rows[0]);

    let processing = state.payment.is_processing();
    let input = Paragraph::new(format!("  {}", state.payment_input.display_value()))
        .style(if state.payment_input.is_empty() {
            Styles::text_muted()
        } else {
            Styles::text()
        })
        .block(field_block(" Payment method ".to_string(), !processing));
    f.render_widget(input, rows[1]);

    let status = match state.payment.status() {
        PaymentStatus::Idle => Line::from(Span::styled(
            "  Press Enter to pay, or Tab to finish setup without paying",
            Styles::text_muted(),
        )),
        PaymentStatus::Processing => Line::from(Span::styled(
            format!("  {}", UiText::PROCESSING),
            Styles::warning(),
        )),
        PaymentStatus::Succeeded => Line::from(Span::styled("  Payment succeeded", Styles::success())),
        PaymentStatus::Failed(msg) => Line::from(Span::styled(format!("  {}", msg), Styles::error())),
    };
    f.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), rows[2]);
}
