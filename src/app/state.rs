//! Application state definitions
//!
//! Contains the state rendered by the UI: the current mode, the main menu
//! selection, the registration form, the loaded table, the search query and
//! its outcome, and the status line.

use chrono::NaiveDate;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::components::file_browser::FileBrowserState;
use crate::input::ReportForm;
use crate::intake::{ReportTable, SearchOutcome};

/// Entries of the main menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum MenuItem {
    #[strum(serialize = "Register Scan Report")]
    RegisterScanReport,
    #[strum(serialize = "View All Reports")]
    ViewAllReports,
    #[strum(serialize = "Search by Patient")]
    SearchByPatient,
    #[strum(serialize = "Quit")]
    Quit,
}

impl MenuItem {
    /// Menu item at a selection index
    pub fn at(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Number of menu entries
    pub fn count() -> usize {
        Self::iter().count()
    }

    /// One-line explanation shown beside the menu
    pub fn description(&self) -> &'static str {
        match self {
            Self::RegisterScanReport => {
                "Record a new scan report: patient details, scan type and date, the \
                 radiologist's summary, and an optional scan file (pdf, jpg, png, jpeg)."
            }
            Self::ViewAllReports => "List every stored scan report in the order it was registered.",
            Self::SearchByPatient => {
                "Find reports whose patient name contains the text you type. \
                 Matching is case-sensitive unless configured otherwise."
            }
            Self::Quit => "Leave the portal. Stored reports and uploads stay on disk.",
        }
    }
}

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppMode {
    /// Main menu - entry point for the three flows
    MainMenu,
    /// Registration form
    Register,
    /// Table of every report
    ViewAll,
    /// Patient-name search with result cards
    Search,
    /// File picker opened from the registration form
    FileBrowser,
}

impl AppMode {
    /// Screen title for this mode
    pub fn title(&self) -> &'static str {
        match self {
            Self::MainMenu => "Main Menu",
            Self::Register => "Register New Scan Report",
            Self::ViewAll => "All Scan Reports",
            Self::Search => "Search Scan Reports by Patient Name",
            Self::FileBrowser => "Select Scan File",
        }
    }
}

/// Kind of status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Status line message for user feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Main menu selection index
    pub main_menu_selection: usize,
    /// Status message for user feedback
    pub status: StatusMessage,
    /// Registration form
    pub form: ReportForm,
    /// Rows loaded for "View All Reports"
    pub table: ReportTable,
    /// Highlighted table row
    pub table_selection: usize,
    /// Current search text
    pub search_query: String,
    /// Outcome of the current search text
    pub search_outcome: SearchOutcome,
    /// Vertical scroll of the search results, in lines
    pub search_scroll: u16,
    /// File picker state while choosing an upload
    pub file_browser: Option<FileBrowserState>,
    /// Whether the help overlay is visible
    pub help_visible: bool,
}

impl AppState {
    /// Fresh state with the form's scan date set to `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            mode: AppMode::MainMenu,
            main_menu_selection: 0,
            status: StatusMessage::info("Welcome to the Hospital Scan Report Portal"),
            form: ReportForm::new(today),
            table: ReportTable::default(),
            table_selection: 0,
            search_query: String::new(),
            search_outcome: SearchOutcome::Idle,
            search_scroll: 0,
            file_browser: None,
            help_visible: false,
        }
    }

    /// Menu item under the cursor
    pub fn selected_menu_item(&self) -> MenuItem {
        MenuItem::at(self.main_menu_selection).unwrap_or(MenuItem::RegisterScanReport)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }
}
