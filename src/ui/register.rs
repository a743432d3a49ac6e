//! Registration form rendering

use crate::input::{FormField, ReportForm};
use crate::theme::{Colors, Styles};
use crate::types::UploadKind;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use strum::IntoEnumIterator;

/// Hint shown beside the focused field
fn field_hint(field: FormField) -> String {
    match field {
        FormField::Age => "0-120, ←/→ to step".to_string(),
        FormField::Gender | FormField::ScanType => "←/→ to choose".to_string(),
        FormField::ScanDate => "←/→ by day, t for today".to_string(),
        FormField::ScanFile => format!("Enter to browse ({})", UploadKind::accepted_list()),
        FormField::Submit => "Enter or Ctrl+S".to_string(),
        _ => String::new(),
    }
}

/// Render the form, one field per line, focused field highlighted
pub fn render_form(f: &mut Frame, form: &ReportForm, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for field in FormField::iter() {
        let focused = field == form.focused;
        let marker = if focused { "▸ " } else { "  " };

        if field == FormField::Submit {
            lines.push(Line::from(""));
            let style = if focused { Styles::selected() } else { Styles::label() };
            lines.push(
                Line::from(Span::styled(format!("[ {} ]", field), style)).alignment(Alignment::Center),
            );
            continue;
        }

        let mut value = form.display_value(field);
        if focused && field.is_text() {
            value.push('█');
        }
        if field == FormField::ScanFile && value.is_empty() {
            value = "(none)".to_string();
        }

        let value_style = if focused { Styles::focused() } else { Styles::text() };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Colors::SECONDARY)),
            Span::styled(format!("{:<28}", format!("{}:", field)), Styles::label()),
            Span::styled(value, value_style),
        ];
        if focused {
            let hint = field_hint(field);
            if !hint.is_empty() {
                spans.push(Span::styled(format!("   {}", hint), Styles::text_muted()));
            }
        }
        lines.push(Line::from(spans));
    }

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Register New Scan Report ")
                .title_style(Styles::title())
                .border_style(Styles::border_active()),
        )
        .style(Styles::panel_bg())
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
