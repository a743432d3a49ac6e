//! Header and common widget rendering
//!
//! Title banner, status line, bottom navigation bar and the help overlay.

use crate::app::{AppState, StatusMessage};
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::theme::{Colors, Styles, Theme};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const PORTAL_NAME: &str = "🏥 Hospital Scan Report Portal";

/// Header renderer for the title banner
pub struct HeaderRenderer {
    banner: Line<'static>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    pub fn new() -> Self {
        Self {
            banner: Line::from(vec![Span::styled(PORTAL_NAME, Styles::title())]),
        }
    }

    /// Render the banner with the current screen title on the right
    pub fn render_title(&self, f: &mut Frame, area: Rect, title: &str) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title_widget = Paragraph::new(self.banner.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active())
                    .title(Line::from(format!(" {} ", title)).alignment(Alignment::Right))
                    .title_style(Style::default().fg(Colors::SECONDARY)),
            )
            .alignment(Alignment::Center)
            .style(Styles::panel_bg());
        f.render_widget(title_widget, area);
    }
}

/// Render the status line
pub fn render_status(f: &mut Frame, status: &StatusMessage, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", Theme::status_icon(status.kind)),
            Theme::status_style(status.kind),
        ),
        Span::styled(status.text.clone(), Theme::status_style(status.kind)),
    ]);
    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Status ")
            .border_style(Style::default().fg(Colors::FG_MUTED)),
    );
    f.render_widget(widget, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let mut spans = Vec::new();
    for (i, item) in keybinding_ctx.get_nav_items(&state.mode).iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Styles::text_muted()));
        }
        spans.push(Span::styled(format!("[{}]", item.key_display), Styles::nav_hint()));
        spans.push(Span::styled(format!(" {}", item.action_label), Styles::text()));
    }
    let nav = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(nav, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(&state.mode, keybinding_ctx);
    help_overlay.render(f, f.area());
}
