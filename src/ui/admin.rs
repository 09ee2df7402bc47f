//! SuperAdmin screens: the password prompt and the read-only dashboard.

use crate::admin::{
    succeeded_revenue, AccessState, AdminStats, Customer, DashboardData, Payment, DEFAULT_REVENUE_DAYS,
    SIGN_IN_REQUIRED,
};
use crate::app::{AdminTab, AppState};
use crate::components::help_overlay::centered_rect;
use crate::theme::{Styles, UiText};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs},
    Frame,
};
use strum::IntoEnumIterator;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn render_admin_login(f: &mut Frame, state: &AppState, area: Rect) {
    let form = centered_rect(50, 50, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Password
            Constraint::Length(2), // Error
            Constraint::Min(0),
        ])
        .split(form);

    let title = Paragraph::new("SuperAdmin Login")
        .style(Styles::title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    if state.gate.check(state.identity.as_deref()) == AccessState::SignInRequired {
        let notice = Paragraph::new(SIGN_IN_REQUIRED)
            .style(Styles::warning())
            .alignment(Alignment::Center);
        f.render_widget(notice, chunks[1]);
        return;
    }

    let password = Paragraph::new(format!(" {}_", state.password_input.display_value()))
        .style(if state.password_input.is_empty() {
            Styles::text_muted()
        } else {
            Styles::text()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .title(" Password "),
        );
    f.render_widget(password, chunks[1]);

    if let Some(error) = &state.admin_error {
        let error = Paragraph::new(error.as_str())
            .style(Styles::error())
            .alignment(Alignment::Center);
        f.render_widget(error, chunks[2]);
    }
}

pub fn render_admin(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Content
        ])
        .split(area);

    let title = Paragraph::new("SuperAdmin Dashboard")
        .style(Styles::title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, chunks[0]);

    let tab_titles: Vec<Line> = AdminTab::iter().map(|t| Line::from(format!(" {} ", t))).collect();
    let selected = AdminTab::iter().position(|t| t == state.admin_tab).unwrap_or(0);
    let tabs = Tabs::new(tab_titles)
        .select(selected)
        .style(Styles::unselected())
        .highlight_style(Styles::selected())
        .block(Block::default().borders(Borders::ALL).border_style(Styles::border_inactive()));
    f.render_widget(tabs, chunks[1]);

    let Some(snapshot) = &state.admin else {
        let loading = Paragraph::new(format!("  {}", UiText::LOADING)).style(Styles::text_secondary());
        f.render_widget(loading, chunks[2]);
        return;
    };

    match state.admin_tab {
        AdminTab::Overview => render_overview(f, &snapshot.dashboard, chunks[2]),
        AdminTab::Customers => render_customers(f, &snapshot.customers, chunks[2]),
        AdminTab::Revenue => render_revenue(f, &snapshot.revenue, chunks[2]),
    }
}

fn render_overview(f: &mut Frame, dashboard: &DashboardData, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("  Customers:      ", Styles::text_secondary()),
            Span::styled(dashboard.customer_count.to_string(), Styles::text()),
        ]),
        Line::from(vec![
            Span::styled("  Total revenue:  ", Styles::text_secondary()),
            Span::styled(format!("${:.2}", dashboard.total_revenue), Styles::price()),
        ]),
        Line::from(""),
    ];
    if let Some(stats) = &dashboard.stats {
        lines.extend(stats_lines(stats));
    }
    let summary = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(" Overview "),
    );
    f.render_widget(summary, columns[0]);

    let mut recent = vec![Line::from(Span::styled("  Recent payments", Styles::header()))];
    recent.extend(dashboard.recent_payments.iter().map(|p| {
        Line::from(vec![
            Span::styled(format!("  {}  ", p.timestamp.format(TIME_FORMAT)), Styles::text_muted()),
            Span::styled(format!("{:.2} {}", p.amount, p.currency.to_uppercase()), Styles::text()),
            Span::styled(format!("  {}", p.status), status_style(p.succeeded())),
        ])
    }));
    recent.push(Line::from(""));
    recent.push(Line::from(Span::styled("  Recent customers", Styles::header())));
    recent.extend(dashboard.recent_customers.iter().map(|c| {
        Line::from(vec![
            Span::styled(format!("  {}", c.name), Styles::text()),
            Span::styled(format!("  {}", c.email), Styles::text_muted()),
        ])
    }));
    let activity = Paragraph::new(recent).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_inactive())
            .title(" Activity "),
    );
    f.render_widget(activity, columns[1]);
}

fn stats_lines(stats: &AdminStats) -> Vec<Line<'static>> {
    let growth = |value: f64| {
        let style = if value >= 0.0 { Styles::success() } else { Styles::error() };
        Span::styled(format!(" ({:+.1}%)", value), style)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("  Deals:   {}", stats.total_deals), Styles::text()),
            growth(stats.deal_growth),
        ]),
        Line::from(vec![
            Span::styled(format!("  Stores:  {}", stats.total_stores), Styles::text()),
            growth(stats.store_growth),
        ]),
        Line::from(vec![
            Span::styled("  Revenue growth", Styles::text()),
            growth(stats.revenue_growth),
        ]),
        Line::from(vec![
            Span::styled("  Customer growth", Styles::text()),
            growth(stats.customer_growth),
        ]),
        Line::from(Span::styled(
            format!("  Total savings: ${:.2}", stats.total_savings),
            Styles::success(),
        )),
    ];

    if !stats.category_distribution.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("  Category distribution", Styles::header())));
        for (category, share) in &stats.category_distribution {
            lines.push(Line::from(Span::styled(
                format!("  {:<16}{:>6.1}", category, share),
                Styles::text_secondary(),
            )));
        }
    }
    lines
}

fn status_style(succeeded: bool) -> Style {
    if succeeded {
        Styles::success()
    } else {
        Styles::warning()
    }
}

fn render_customers(f: &mut Frame, customers: &[Customer], area: Rect) {
    let header = Row::new(["Name", "Email", "Joined", "Spent", "Premium"]).style(Styles::header());
    let rows = customers.iter().map(|c| {
        Row::new(vec![
            Cell::from(c.name.clone()),
            Cell::from(c.email.clone()),
            Cell::from(c.joined_date.format(TIME_FORMAT).to_string()),
            Cell::from(format!("${:.2}", c.total_spent)),
            Cell::from(if c.is_premium { "yes" } else { "no" }),
        ])
        .style(Styles::text())
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(35),
            Constraint::Percentage(20),
            Constraint::Percentage(13),
            Constraint::Percentage(12),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(format!(" Customers ({}) ", customers.len())),
    );
    f.render_widget(table, area);
}

fn render_revenue(f: &mut Frame, payments: &[Payment], area: Rect) {
    let header = Row::new(["Time", "Customer", "Amount", "Status"]).style(Styles::header());
    let rows = payments.iter().map(|p| {
        Row::new(vec![
            Cell::from(p.timestamp.format(TIME_FORMAT).to_string()),
            Cell::from(p.customer_id.to_string()),
            Cell::from(format!("{:.2} {}", p.amount, p.currency.to_uppercase())),
            Cell::from(Span::styled(p.status.clone(), status_style(p.succeeded()))),
        ])
    });

    let title = format!(
        " Revenue, last {} days: ${:.2} succeeded ",
        DEFAULT_REVENUE_DAYS,
        succeeded_revenue(payments)
    );
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(title),
    );
    f.render_widget(table, area);
}
