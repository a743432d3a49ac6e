//! Application module
//!
//! Contains the main application loop, key dispatch per mode, and the
//! glue between the terminal UI and the intake service.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, MenuItem, StatusMessage)
//! - Main module - App struct and event loop

mod state;

pub use state::{AppMode, AppState, MenuItem, StatusKind, StatusMessage};

use crate::components::file_browser::{BrowserSelection, FileBrowserState};
use crate::components::keybindings::KeybindingContext;
use crate::error::{PortalError, Result};
use crate::input::{FormAction, edit_text};
use crate::intake::Intake;
use crate::theme::UiConstants;
use crate::ui::UiRenderer;
use crate::uploads::Upload;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::Backend};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info};

/// Main application struct
pub struct App {
    state: AppState,
    intake: Intake,
    ui_renderer: UiRenderer,
    /// Keybinding context for navigation hints and help
    keybinding_context: KeybindingContext,
    /// Directory the file picker opens in
    browse_root: PathBuf,
}

impl App {
    /// Create a new application instance over an opened intake service
    pub fn new(intake: Intake) -> Self {
        Self::with_state(intake, AppState::default())
    }

    /// Create an application with a prepared state
    pub fn with_state(intake: Intake, state: AppState) -> Self {
        info!("Creating new App instance");
        let browse_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self {
            state,
            intake,
            ui_renderer: UiRenderer::new(),
            keybinding_context: KeybindingContext::new(),
            browse_root,
        }
    }

    /// Start the file picker somewhere other than the working directory
    pub fn set_browse_root(&mut self, dir: impl Into<PathBuf>) {
        self.browse_root = dir.into();
    }

    /// Current application state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Mutable application state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Get reference to keybinding context
    pub fn keybinding_context(&self) -> &KeybindingContext {
        &self.keybinding_context
    }

    /// Run the main application loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Starting main application loop");

        loop {
            terminal.draw(|f| {
                self.ui_renderer
                    .render(f, &self.state, &self.keybinding_context);
            })?;

            if crossterm::event::poll(Duration::from_millis(250))? {
                if let Event::Key(key_event) = crossterm::event::read()? {
                    if key_event.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key_event(key_event)? {
                        break;
                    }
                }
            }
        }

        info!("Main application loop finished");
        Ok(())
    }

    /// Handle keyboard input events. Returns `true` when the user quits.
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            info!("Quit requested with Ctrl+C");
            return Ok(true);
        }

        if self.state.help_visible {
            self.state.help_visible = false;
            return Ok(false);
        }

        if key_event.code == KeyCode::F(1) {
            self.state.help_visible = true;
            return Ok(false);
        }

        debug!(mode = ?self.state.mode, key = ?key_event.code, "Key event");
        match self.state.mode {
            AppMode::MainMenu => self.handle_main_menu_key(key_event),
            AppMode::Register => self.handle_register_key(key_event),
            AppMode::ViewAll => self.handle_view_all_key(key_event),
            AppMode::Search => self.handle_search_key(key_event),
            AppMode::FileBrowser => self.handle_file_browser_key(key_event),
        }
    }

    fn handle_main_menu_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        let count = MenuItem::count();
        match key_event.code {
            KeyCode::Up => {
                self.state.main_menu_selection = (self.state.main_menu_selection + count - 1) % count;
            }
            KeyCode::Down => {
                self.state.main_menu_selection = (self.state.main_menu_selection + 1) % count;
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.state.main_menu_selection = c as usize - '1' as usize;
                return self.open_menu_item(self.state.selected_menu_item());
            }
            KeyCode::Enter => return self.open_menu_item(self.state.selected_menu_item()),
            KeyCode::Char('?') => self.state.help_visible = true,
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            _ => {}
        }
        Ok(false)
    }

    /// Switch to the flow behind a menu item
    fn open_menu_item(&mut self, item: MenuItem) -> Result<bool> {
        info!("Menu selection: {}", item);
        match item {
            MenuItem::RegisterScanReport => {
                self.state.mode = AppMode::Register;
                self.state.status = StatusMessage::info("Fill in the form, then submit with Ctrl+S");
            }
            MenuItem::ViewAllReports => {
                self.state.mode = AppMode::ViewAll;
                self.refresh_table();
            }
            MenuItem::SearchByPatient => {
                self.state.mode = AppMode::Search;
                self.state.search_query.clear();
                self.state.search_scroll = 0;
                self.run_search();
                self.state.status = StatusMessage::info("Enter patient name");
            }
            MenuItem::Quit => return Ok(true),
        }
        Ok(false)
    }

    fn back_to_menu(&mut self) {
        self.state.mode = AppMode::MainMenu;
        self.state.status = StatusMessage::info("Select an option");
    }

    fn handle_register_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        match self.state.form.handle_key(key_event) {
            FormAction::None => {}
            FormAction::Cancel => self.back_to_menu(),
            FormAction::OpenFilePicker => self.open_file_browser(),
            FormAction::Submit => self.submit_form(),
        }
        Ok(false)
    }

    /// Save the chosen file (if any) and store the form as a new report
    fn submit_form(&mut self) {
        let chosen = self.state.form.scan_file.clone();
        let upload = match chosen {
            Some(path) => match Upload::from_path(&path) {
                Ok(upload) => Some(upload),
                Err(e) => {
                    self.report_error("Could not read the chosen file", &e);
                    return;
                }
            },
            None => None,
        };

        let fields = self.state.form.to_fields();
        match self.intake.submit(&fields, upload.as_ref()) {
            Ok(receipt) => {
                info!(id = receipt.id, "Report submitted from form");
                self.state.status = StatusMessage::success(receipt.message());
                self.state.form.reset();
            }
            Err(e) => self.report_error("Report was not saved", &e),
        }
    }

    fn open_file_browser(&mut self) {
        let start = self
            .state
            .form
            .scan_file
            .as_ref()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| self.browse_root.clone());

        match FileBrowserState::open(start) {
            Ok(browser) => {
                self.state.file_browser = Some(browser);
                self.state.mode = AppMode::FileBrowser;
            }
            Err(e) => self.report_error("Cannot open file picker", &e),
        }
    }

    fn handle_file_browser_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        if key_event.code == KeyCode::Esc {
            self.close_file_browser();
            return Ok(false);
        }

        let Some(browser) = self.state.file_browser.as_mut() else {
            self.state.mode = AppMode::Register;
            return Ok(false);
        };

        let outcome = match key_event.code {
            KeyCode::Up => {
                browser.move_up();
                Ok(None)
            }
            KeyCode::Down => {
                browser.move_down();
                Ok(None)
            }
            KeyCode::Backspace => browser.go_up().map(|_| None),
            KeyCode::Enter => browser.activate().map(Some),
            _ => Ok(None),
        };

        match outcome {
            Ok(Some(BrowserSelection::File(path))) => {
                info!(path = %path.display(), "Scan file chosen");
                self.state.status = StatusMessage::info(format!("Attached {}", path.display()));
                self.state.form.scan_file = Some(path);
                self.close_file_browser();
            }
            Ok(_) => {}
            Err(e) => self.report_error("Cannot read directory", &e),
        }
        Ok(false)
    }

    fn close_file_browser(&mut self) {
        self.state.file_browser = None;
        self.state.mode = AppMode::Register;
    }

    fn handle_view_all_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        let last = self.state.table.rows.len().saturating_sub(1);
        let current = self.state.table_selection;
        let page = UiConstants::PAGE_SCROLL_SIZE;
        match key_event.code {
            KeyCode::Up => self.state.table_selection = current.saturating_sub(1),
            KeyCode::Down => self.state.table_selection = (current + 1).min(last),
            KeyCode::PageUp => self.state.table_selection = current.saturating_sub(page),
            KeyCode::PageDown => self.state.table_selection = (current + page).min(last),
            KeyCode::Home => self.state.table_selection = 0,
            KeyCode::End => self.state.table_selection = last,
            KeyCode::Char('r') => self.refresh_table(),
            KeyCode::Char('?') => self.state.help_visible = true,
            KeyCode::Char('q') => return Ok(true),
            KeyCode::Esc => self.back_to_menu(),
            _ => {}
        }
        Ok(false)
    }

    /// Reload every report into the table
    fn refresh_table(&mut self) {
        match self.intake.render_all() {
            Ok(table) => {
                let count = table.rows.len();
                self.state.table = table;
                self.state.table_selection = self.state.table_selection.min(count.saturating_sub(1));
                self.state.status = if count == 0 {
                    StatusMessage::warning("No scan reports have been registered yet")
                } else {
                    StatusMessage::info(format!("{} report(s) on file", count))
                };
            }
            Err(e) => self.report_error("Could not load reports", &e),
        }
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) -> Result<bool> {
        match key_event.code {
            KeyCode::Esc => self.back_to_menu(),
            KeyCode::Up => self.state.search_scroll = self.state.search_scroll.saturating_sub(1),
            KeyCode::Down => self.state.search_scroll = self.state.search_scroll.saturating_add(1),
            KeyCode::Char(_) | KeyCode::Backspace => {
                if key_event.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(false);
                }
                edit_text(&mut self.state.search_query, key_event.code);
                self.state.search_scroll = 0;
                self.run_search();
            }
            _ => {}
        }
        Ok(false)
    }

    /// Re-run the search for the current query
    fn run_search(&mut self) {
        match self.intake.render_search(&self.state.search_query) {
            Ok(outcome) => self.state.search_outcome = outcome,
            Err(e) => self.report_error("Search failed", &e),
        }
    }

    /// Show an error on the status line and keep going
    fn report_error(&mut self, context: &str, err: &PortalError) {
        error!("{}: {}", context, err);
        self.state.status = StatusMessage::error(format!("{}: {}", context, err));
    }
}
