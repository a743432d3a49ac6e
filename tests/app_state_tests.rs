//! Tests for application state and key handling
//!
//! These tests verify:
//! - AppState default initialization
//! - Main menu navigation and flow switching
//! - Registration through the form, with and without a scan file
//! - Table scrolling and live search
//! - Help overlay and quit keys

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use scan_portal::app::{App, AppMode, AppState, MenuItem, StatusKind};
use scan_portal::config::PortalConfig;
use scan_portal::input::FormField;
use scan_portal::intake::{Intake, SearchOutcome};
use std::fs;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 17).unwrap()
}

fn app_in(dir: &TempDir) -> App {
    let intake = Intake::open(&PortalConfig::in_dir(dir.path())).unwrap();
    let mut app = App::with_state(intake, AppState::new(today()));
    app.set_browse_root(dir.path());
    app
}

fn press(app: &mut App, code: KeyCode) -> bool {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
        .unwrap()
}

fn ctrl(app: &mut App, c: char) -> bool {
    app.handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
        .unwrap()
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

/// Fill the form's name, age and radiologist fields
fn fill_form(app: &mut App, name: &str, age: &str) {
    type_text(app, name);
    press(app, KeyCode::Tab);
    type_text(app, age);
    for _ in 0..5 {
        press(app, KeyCode::Tab);
    }
    assert_eq!(app.state().form.focused, FormField::RadiologistName);
    type_text(app, "Dr. House");
}

// =============================================================================
// AppState Default Tests
// =============================================================================

#[test]
fn test_app_state_default_mode_is_main_menu() {
    let state = AppState::default();
    assert_eq!(state.mode, AppMode::MainMenu);
    assert_eq!(state.main_menu_selection, 0);
    assert!(!state.help_visible);
}

#[test]
fn test_app_state_default_has_welcome_message() {
    let state = AppState::default();
    assert!(state.status.text.contains("Welcome"));
    assert_eq!(state.status.kind, StatusKind::Info);
}

#[test]
fn test_app_state_new_sets_form_date() {
    let state = AppState::new(today());
    assert_eq!(state.form.scan_date, today());
    assert_eq!(state.search_outcome, SearchOutcome::Idle);
    assert!(state.file_browser.is_none());
}

#[test]
fn test_menu_items_in_order() {
    assert_eq!(MenuItem::count(), 4);
    assert_eq!(MenuItem::at(0), Some(MenuItem::RegisterScanReport));
    assert_eq!(MenuItem::at(3), Some(MenuItem::Quit));
    assert_eq!(MenuItem::at(4), None);
    assert_eq!(MenuItem::SearchByPatient.to_string(), "Search by Patient");
}

// =============================================================================
// Main Menu
// =============================================================================

#[test]
fn test_main_menu_navigation_wraps() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Up);
    assert_eq!(app.state().selected_menu_item(), MenuItem::Quit);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.state().selected_menu_item(), MenuItem::RegisterScanReport);
}

#[test]
fn test_main_menu_enter_opens_register() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    assert!(!press(&mut app, KeyCode::Enter));
    assert_eq!(app.state().mode, AppMode::Register);
}

#[test]
fn test_main_menu_digit_shortcuts() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.state().mode, AppMode::ViewAll);
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.state().mode, AppMode::Search);
}

#[test]
fn test_quit_from_menu() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    assert!(press(&mut app, KeyCode::Char('q')));
}

#[test]
fn test_ctrl_c_quits_from_form() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Enter);
    assert!(ctrl(&mut app, 'c'));
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_register_flow_stores_report_and_resets_form() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Enter);
    fill_form(&mut app, "Alice Smith", "34");

    assert!(!ctrl(&mut app, 's'));
    assert_eq!(app.state().status.kind, StatusKind::Success);
    assert_eq!(
        app.state().status.text,
        "Scan report for 'Alice Smith' added successfully!"
    );
    assert!(app.state().form.patient_name.is_empty());
    assert_eq!(app.state().mode, AppMode::Register);

    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('2'));
    let table = &app.state().table;
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].cells[1], "Alice Smith");
    assert_eq!(table.rows[0].cells[2], "34");
    assert_eq!(table.rows[0].cells[6], "2025-01-17");
}

#[test]
fn test_register_with_picked_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("knee.png"), b"png-bytes").unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Enter);
    fill_form(&mut app, "Bob", "60");

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.state().form.focused, FormField::ScanFile);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().mode, AppMode::FileBrowser);

    let browser = app.state().file_browser.as_ref().unwrap();
    let index = browser
        .entries
        .iter()
        .position(|e| e.name == "knee.png")
        .unwrap();
    for _ in 0..index {
        press(&mut app, KeyCode::Down);
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().mode, AppMode::Register);
    assert_eq!(
        app.state().form.scan_file,
        Some(dir.path().join("knee.png"))
    );

    ctrl(&mut app, 's');
    assert_eq!(app.state().status.kind, StatusKind::Success);
    let saved = dir.path().join("uploaded_scans").join("knee.png");
    assert_eq!(fs::read(saved).unwrap(), b"png-bytes");
}

#[test]
fn test_file_browser_escape_returns_to_form() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Enter);
    for _ in 0..7 {
        press(&mut app, KeyCode::Tab);
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.state().mode, AppMode::FileBrowser);
    press(&mut app, KeyCode::Esc);
    assert_eq!(app.state().mode, AppMode::Register);
    assert!(app.state().file_browser.is_none());
    assert!(app.state().form.scan_file.is_none());
}

#[test]
fn test_register_failure_keeps_session_usable() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Enter);
    type_text(&mut app, "Carol");
    app.state_mut().form.scan_file = Some(dir.path().join("gone.pdf"));

    ctrl(&mut app, 's');
    assert_eq!(app.state().status.kind, StatusKind::Error);
    assert_eq!(app.state().form.patient_name, "Carol");

    app.state_mut().form.scan_file = None;
    ctrl(&mut app, 's');
    assert_eq!(app.state().status.kind, StatusKind::Success);
}

#[test]
fn test_age_field_clamps() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "999");
    assert_eq!(app.state().form.age, 120);
}

// =============================================================================
// View All
// =============================================================================

#[test]
fn test_view_all_selection_is_bounded() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Enter);
    for name in ["A", "B", "C"] {
        type_text(&mut app, name);
        ctrl(&mut app, 's');
    }
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.state().table.rows.len(), 3);

    press(&mut app, KeyCode::End);
    assert_eq!(app.state().table_selection, 2);
    press(&mut app, KeyCode::Down);
    assert_eq!(app.state().table_selection, 2);
    press(&mut app, KeyCode::PageUp);
    assert_eq!(app.state().table_selection, 0);
}

// =============================================================================
// Search
// =============================================================================

#[test]
fn test_search_updates_on_every_keystroke() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Enter);
    for name in ["John Smith", "Jane Doe"] {
        type_text(&mut app, name);
        ctrl(&mut app, 's');
    }
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.state().search_outcome, SearchOutcome::Idle);

    type_text(&mut app, "J");
    match &app.state().search_outcome {
        SearchOutcome::Found(cards) => assert_eq!(cards.len(), 2),
        other => panic!("Expected two matches, got {:?}", other),
    }

    type_text(&mut app, "ohn");
    match &app.state().search_outcome {
        SearchOutcome::Found(cards) => {
            assert_eq!(cards.len(), 1);
            assert!(cards[0].heading.contains("John Smith"));
        }
        other => panic!("Expected one match, got {:?}", other),
    }

    type_text(&mut app, "x");
    assert_eq!(app.state().search_outcome, SearchOutcome::NoRecords);

    for _ in 0..5 {
        press(&mut app, KeyCode::Backspace);
    }
    assert!(app.state().search_query.is_empty());
    assert_eq!(app.state().search_outcome, SearchOutcome::Idle);
}

#[test]
fn test_search_letter_q_is_typed_not_quit() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Char('3'));
    assert!(!press(&mut app, KeyCode::Char('q')));
    assert_eq!(app.state().search_query, "q");
}

// =============================================================================
// Help
// =============================================================================

#[test]
fn test_help_opens_and_any_key_closes() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Char('?'));
    assert!(app.state().help_visible);

    assert!(!press(&mut app, KeyCode::Char('q')));
    assert!(!app.state().help_visible);
    assert_eq!(app.state().mode, AppMode::MainMenu);
}

#[test]
fn test_f1_opens_help_in_form() {
    let dir = TempDir::new().unwrap();
    let mut app = app_in(&dir);
    press(&mut app, KeyCode::Enter);
    press(&mut app, KeyCode::F(1));
    assert!(app.state().help_visible);
}
