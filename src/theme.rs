//! Centralized theme and styling for the TUI
//!
//! Single source of truth for the colors and styles used by the portal's
//! screens, so menus, forms, tables and cards look consistent.
//!
//! # Usage
//! ```rust
//! use scan_portal::theme::{Colors, Styles};
//! use ratatui::style::Style;
//!
//! let style = Style::default().fg(Colors::PRIMARY);
//! let title_style = Styles::title();
//! ```

use ratatui::style::{Color, Modifier, Style};

use crate::app::StatusKind;

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Primary dark background - used for most panels and dialogs
    pub const BG_PRIMARY: Color = Color::Rgb(20, 20, 30);

    /// Alternative dark background - used for overlays
    pub const BG_SECONDARY: Color = Color::Rgb(30, 30, 40);

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent color - borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    /// Success/positive feedback
    pub const SUCCESS: Color = Color::Green;

    /// Warning/caution feedback
    pub const WARNING: Color = Color::Yellow;

    /// Error/failure feedback
    pub const ERROR: Color = Color::Red;

    /// Informational feedback
    pub const INFO: Color = Color::Blue;

    /// Selected item foreground (on yellow background)
    pub const SELECTED_FG: Color = Color::Black;

    /// Navigation hint text
    pub const NAV_HINT: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI elements
pub struct Styles;

impl Styles {
    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Muted text style
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Field label style
    pub fn label() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Title style (bold cyan)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Active border style
    pub fn border_active() -> Style {
        Style::default().fg(Colors::PRIMARY)
    }

    /// Panel background
    pub fn panel_bg() -> Style {
        Style::default().bg(Colors::BG_PRIMARY)
    }

    /// Selected item style (yellow background)
    pub fn selected() -> Style {
        Style::default()
            .bg(Colors::SECONDARY)
            .fg(Colors::SELECTED_FG)
            .add_modifier(Modifier::BOLD)
    }

    /// Focused form field
    pub fn focused() -> Style {
        Style::default()
            .fg(Colors::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header row
    pub fn table_header() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Hyperlink-like text for attached files
    pub fn link() -> Style {
        Style::default()
            .fg(Colors::INFO)
            .add_modifier(Modifier::UNDERLINED)
    }

    /// Navigation hint style
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }
}

/// Semantic style lookups
pub struct Theme;

impl Theme {
    /// Style of the status line for a given message kind
    pub fn status_style(kind: StatusKind) -> Style {
        match kind {
            StatusKind::Info => Style::default().fg(Colors::FG_SECONDARY),
            StatusKind::Success => Style::default()
                .fg(Colors::SUCCESS)
                .add_modifier(Modifier::BOLD),
            StatusKind::Warning => Style::default().fg(Colors::WARNING),
            StatusKind::Error => Style::default()
                .fg(Colors::ERROR)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Leading icon for a status message
    pub fn status_icon(kind: StatusKind) -> &'static str {
        match kind {
            StatusKind::Info => "ℹ",
            StatusKind::Success => "✓",
            StatusKind::Warning => "⚠",
            StatusKind::Error => "✗",
        }
    }
}

// =============================================================================
// LAYOUT CONSTANTS
// =============================================================================

/// UI dimension constants
pub struct UiConstants;

impl UiConstants {
    /// Height of the title banner
    pub const HEADER_HEIGHT: u16 = 3;

    /// Height of the status line block
    pub const STATUS_BAR_HEIGHT: u16 = 3;

    /// Rows moved by PageUp/PageDown
    pub const PAGE_SCROLL_SIZE: usize = 10;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_is_red() {
        assert_eq!(Theme::status_style(StatusKind::Error).fg, Some(Colors::ERROR));
        assert_eq!(Theme::status_icon(StatusKind::Success), "✓");
    }
}
