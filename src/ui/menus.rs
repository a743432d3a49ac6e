//! Main menu rendering

use crate::app::{AppState, MenuItem};
use crate::theme::{Colors, Styles};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

fn icon(item: MenuItem) -> &'static str {
    match item {
        MenuItem::RegisterScanReport => "📝",
        MenuItem::ViewAllReports => "📋",
        MenuItem::SearchByPatient => "🔍",
        MenuItem::Quit => "🚪",
    }
}

/// Render the main menu with a description of the highlighted entry
pub fn render_main_menu(f: &mut Frame, state: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let items: Vec<ListItem> = MenuItem::iter()
        .enumerate()
        .map(|(index, item)| {
            let selected = index == state.main_menu_selection;
            let style = if selected {
                Style::default()
                    .fg(Colors::SECONDARY)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Colors::FG_PRIMARY)
            };
            let prefix = if selected { "▸ " } else { "  " };
            ListItem::new(format!("{}{} {}. {}", prefix, icon(item), index + 1, item)).style(style)
        })
        .collect();

    let menu = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Main Menu ")
                .title_style(Styles::title())
                .border_style(Styles::border_active()),
        )
        .style(Styles::panel_bg());
    f.render_widget(menu, chunks[0]);

    let selected = state.selected_menu_item();
    let description = Paragraph::new(vec![
        Line::from(vec![Span::styled(selected.to_string(), Styles::label())]),
        Line::from(""),
        Line::from(Span::styled(selected.description(), Styles::text())),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Description ")
            .border_style(Style::default().fg(Colors::FG_MUTED)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(description, chunks[1]);
}
