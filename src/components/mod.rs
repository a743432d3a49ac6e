//! Reusable TUI components
//!
//! - `keybindings` - Context-aware keybinding registry
//! - `help_overlay` - Help popup built from the keybinding registry
//! - `file_browser` - Picker for the scan file to upload

pub mod file_browser;
pub mod help_overlay;
pub mod keybindings;

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rectangle of the given percentage size centered in `area`
pub fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - height_percent) / 2),
            Constraint::Percentage(height_percent),
            Constraint::Percentage((100 - height_percent) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(vertical[1])[1]
}
