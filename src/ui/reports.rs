//! Report table and search result rendering

use crate::app::AppState;
use crate::intake::{NO_RECORDS_NOTICE, ReportCard, SearchOutcome};
use crate::theme::{Colors, Styles};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

const COLUMN_WIDTHS: [Constraint; 8] = [
    Constraint::Length(5),
    Constraint::Min(14),
    Constraint::Length(4),
    Constraint::Length(7),
    Constraint::Length(11),
    Constraint::Min(20),
    Constraint::Length(11),
    Constraint::Min(14),
];

/// Render every stored report as a table
pub fn render_table(f: &mut Frame, state: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" All Scan Reports ({}) ", state.table.rows.len()))
        .title_style(Styles::title())
        .border_style(Styles::border_active());

    let header = Row::new(
        state
            .table
            .columns()
            .iter()
            .map(|c| Cell::from(*c).style(Styles::table_header())),
    );
    let rows: Vec<Row> = state
        .table
        .rows
        .iter()
        .map(|row| Row::new(row.cells.iter().map(|c| Cell::from(c.clone()))))
        .collect();

    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .block(block)
        .style(Styles::panel_bg())
        .row_highlight_style(Styles::selected())
        .highlight_symbol("▸ ");

    let mut table_state = TableState::default();
    if !state.table.is_empty() {
        table_state.select(Some(state.table_selection));
    }
    f.render_stateful_widget(table, area, &mut table_state);
}

fn card_lines(card: &ReportCard) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(card.heading.clone(), Styles::title()))];
    let labelled = [
        ("Scan Type", card.scan_type.clone()),
        ("Date", card.date.clone()),
        ("Radiologist", card.radiologist.clone()),
    ];
    for (label, value) in labelled {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", label), Styles::label()),
            Span::styled(value, Styles::text()),
        ]));
    }
    lines.push(Line::from(Span::styled("Summary:", Styles::label())));
    for summary_line in card.summary.lines() {
        lines.push(Line::from(Span::styled(format!("  {}", summary_line), Styles::text())));
    }
    if let Some(link) = &card.file_link {
        lines.push(Line::from(vec![
            Span::styled("View Scan File: ", Styles::label()),
            Span::styled(link.clone(), Styles::link()),
        ]));
    }
    lines.push(Line::from(Span::styled("─".repeat(40), Styles::text_muted())));
    lines
}

/// Render the search box and the cards (or notice) below it
pub fn render_search(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let input = Paragraph::new(Line::from(vec![
        Span::styled(state.search_query.clone(), Styles::focused()),
        Span::styled("█", Style::default().fg(Colors::SECONDARY)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Enter Patient Name ")
            .title_style(Styles::title())
            .border_style(Styles::border_active()),
    );
    f.render_widget(input, chunks[0]);

    let (title, lines) = match &state.search_outcome {
        SearchOutcome::Idle => (
            " Results ".to_string(),
            vec![Line::from(Span::styled(
                "Type a name to search.",
                Styles::text_muted(),
            ))],
        ),
        SearchOutcome::NoRecords => (
            " Results (0) ".to_string(),
            vec![Line::from(Span::styled(
                NO_RECORDS_NOTICE,
                Style::default().fg(Colors::WARNING),
            ))],
        ),
        SearchOutcome::Found(cards) => (
            format!(" Results ({}) ", cards.len()),
            cards.iter().flat_map(card_lines).collect(),
        ),
    };

    let results = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(Colors::FG_MUTED)),
        )
        .style(Styles::panel_bg())
        .wrap(Wrap { trim: false })
        .scroll((state.search_scroll, 0));
    f.render_widget(results, chunks[1]);
}
