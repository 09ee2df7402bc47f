//! Deals dashboard
//!
//! Category tabs, the search box, the browse list with the selected deal's
//! details, and the side panels (trending, local, saved, or the report).

use crate::app::AppState;
use crate::deals::{Deal, DealReport};
use crate::theme::{Styles, Theme, UiText};
use chrono::Utc;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render_dashboard(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category tabs
            Constraint::Length(3), // Search
            Constraint::Min(10),   // Deals
        ])
        .split(area);

    render_tabs(f, state, chunks[0]);
    render_search(f, state, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(7)])
        .split(body[0]);
    render_browse_list(f, state, left[0]);
    render_deal_details(f, state, left[1]);

    if state.show_report {
        render_report(f, state, body[1]);
    } else {
        render_side_panels(f, state, body[1]);
    }
}

fn render_tabs(f: &mut Frame, state: &AppState, area: Rect) {
    let mut titles = vec![Line::from(" All Deals ")];
    titles.extend(
        state
            .catalog
            .categories()
            .iter()
            .map(|c| Line::from(format!(" {} ", c.name))),
    );

    let tabs = Tabs::new(titles)
        .select(state.deal_tab)
        .style(Styles::unselected())
        .highlight_style(Styles::selected())
        .divider("|")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_inactive())
                .title(" Browse by Category "),
        );
    f.render_widget(tabs, area);
}

fn render_search(f: &mut Frame, state: &AppState, area: Rect) {
    let style = if state.search.is_empty() {
        Styles::text_muted()
    } else {
        Styles::text()
    };
    let cursor = if state.search_focused { "_" } else { "" };
    let border = if state.search_focused {
        Styles::border_active()
    } else {
        Styles::border_inactive()
    };

    let search = Paragraph::new(format!(" {}{}", state.search.display_value(), cursor))
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(border).title(" Search "));
    f.render_widget(search, area);
}

/// One list row: title, sale price, struck-through original, discount.
fn deal_line<'a>(deal: &'a Deal, saved: bool) -> Line<'a> {
    let mut spans = vec![
        Span::styled(if saved { "* " } else { "  " }, Styles::saved()),
        Span::styled(deal.title.as_str(), Styles::text()),
        Span::raw("  "),
        Span::styled(format!("${:.2}", deal.price), Styles::price()),
        Span::raw(" "),
        Span::styled(format!("${:.2}", deal.original_price), Styles::original_price()),
        Span::raw(" "),
        Span::styled(format!("-{:.0}%", deal.discount()), Styles::discount()),
    ];
    if !deal.in_stock {
        spans.push(Span::styled("  out of stock", Styles::warning()));
    }
    Line::from(spans)
}

fn render_browse_list(f: &mut Frame, state: &AppState, area: Rect) {
    let deals = state.board.filtered();
    let title = match state.active_category() {
        None => " All Deals ".to_string(),
        Some(id) => format!(" {} ", state.catalog.display_name(id)),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_active())
        .title(title);

    if state.loading && state.board.deals().is_empty() {
        let loading = Paragraph::new(format!("  {}", UiText::LOADING))
            .style(Styles::text_secondary())
            .block(block);
        f.render_widget(loading, area);
        return;
    }
    if deals.is_empty() {
        let empty = Paragraph::new(format!("  {}", UiText::NO_DEALS))
            .style(Styles::warning())
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = deals
        .iter()
        .map(|deal| ListItem::new(deal_line(deal, state.board.is_saved(deal.id))))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Styles::focused())
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.deal_cursor.min(deals.len() - 1)));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn render_deal_details(f: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_inactive())
        .title(" Details ");
    let Some(deal) = state.selected_deal() else {
        f.render_widget(block, area);
        return;
    };

    let mut header = vec![
        Span::styled(deal.retailer.as_str(), Styles::header()),
        Span::styled(format!("  save ${:.2}", deal.savings()), Styles::success()),
    ];
    if let (Some(tier), Some(score)) = (deal.quality_tier(), deal.quality_score) {
        header.push(Span::styled(
            format!("  {} ({})", tier, score),
            Theme::quality_style(tier),
        ));
    }
    if let Some(rating) = deal.rating {
        header.push(Span::styled(format!("  {:.1}/5", rating), Styles::text_secondary()));
    }

    let mut lines = vec![Line::from(header)];
    if let Some(description) = &deal.description {
        lines.push(Line::from(Span::styled(description.as_str(), Styles::text())));
    }
    if !deal.url.is_empty() {
        lines.push(Line::from(Span::styled(deal.url.as_str(), Styles::text_muted())));
    }

    let details = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    f.render_widget(details, area);
}

fn render_side_panels(f: &mut Frame, state: &AppState, area: Rect) {
    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let saved: Vec<&Deal> = state.board.saved().iter().collect();
    let local_empty = if state.board.home_city.is_some() {
        "No local deals yet"
    } else {
        "Set your city in preferences"
    };

    render_section(f, panels[0], "Trending in Your Region", &state.board.trending(), "No deals yet");
    render_section(f, panels[1], "Local Deals for You", &state.board.local(), local_empty);
    render_section(f, panels[2], "Your Saved Deals", &saved, "Press s to save a deal");
}

fn render_section(f: &mut Frame, area: Rect, title: &str, deals: &[&Deal], empty: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Styles::border_inactive())
        .title(Span::styled(format!(" {} ", title), Styles::header()));

    if deals.is_empty() {
        let widget = Paragraph::new(format!("  {}", empty))
            .style(Styles::text_muted())
            .block(block);
        f.render_widget(widget, area);
        return;
    }

    let items: Vec<ListItem> = deals
        .iter()
        .map(|deal| {
            ListItem::new(Line::from(vec![
                Span::styled(deal.title.as_str(), Styles::text()),
                Span::raw(" "),
                Span::styled(format!("${:.2}", deal.price), Styles::price()),
            ]))
        })
        .collect();
    f.render_widget(List::new(items).block(block), area);
}

fn render_report(f: &mut Frame, state: &AppState, area: Rect) {
    let now = Utc::now().naive_utc();
    let lines: Vec<Line> = match DealReport::compute(state.board.deals(), now) {
        Some(report) => report
            .lines()
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Styles::text())))
            .collect(),
        None => vec![Line::from(Span::styled(UiText::NO_DEALS, Styles::text_muted()))],
    };

    let report = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Styles::border_active())
            .title(" Deal Report "),
    );
    f.render_widget(report, area);
}
