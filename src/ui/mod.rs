//! User interface rendering module
//!
//! - `header` - Title banner, status line, nav bar and help overlay
//! - `menus` - Main menu with its description panel
//! - `register` - Registration form
//! - `reports` - Report table and search results

mod header;
mod menus;
mod register;
mod reports;

use crate::app::{AppMode, AppState};
use crate::components::file_browser::FileBrowser;
use crate::components::keybindings::KeybindingContext;
use crate::theme::UiConstants;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

pub use header::HeaderRenderer;

/// UI renderer for the application
///
/// Entry point for drawing a frame. Delegates the content area to the
/// renderer of the current mode.
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI for the current state
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(UiConstants::HEADER_HEIGHT),
                Constraint::Min(5),
                Constraint::Length(UiConstants::STATUS_BAR_HEIGHT),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.header.render_title(f, chunks[0], state.mode.title());

        match state.mode {
            AppMode::MainMenu => menus::render_main_menu(f, state, chunks[1]),
            AppMode::Register => register::render_form(f, &state.form, chunks[1]),
            AppMode::ViewAll => reports::render_table(f, state, chunks[1]),
            AppMode::Search => reports::render_search(f, state, chunks[1]),
            AppMode::FileBrowser => {
                register::render_form(f, &state.form, chunks[1]);
                if let Some(browser) = &state.file_browser {
                    FileBrowser::render(f, browser);
                }
            }
        }

        header::render_status(f, &state.status, chunks[2]);
        header::render_nav_bar(f, state, keybinding_ctx, chunks[3]);

        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}
