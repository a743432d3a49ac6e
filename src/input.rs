//! Input handling module
//!
//! Editing of the scan report registration form. Each field behaves like the
//! widget it stands for: text fields take characters, the age field only
//! digits within 0..=120, the selection fields cycle through their options,
//! and the date field steps by day.

use chrono::{Days, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::path::PathBuf;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::report::{MAX_AGE, NewScanReport};
use crate::types::{Gender, ScanType, cycle};

/// Fields of the registration form, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum FormField {
    #[strum(serialize = "Patient Name")]
    PatientName,
    #[strum(serialize = "Age")]
    Age,
    #[strum(serialize = "Gender")]
    Gender,
    #[strum(serialize = "Scan Type")]
    ScanType,
    #[strum(serialize = "Scan Result Summary")]
    ScanSummary,
    #[strum(serialize = "Scan Date")]
    ScanDate,
    #[strum(serialize = "Radiologist Name")]
    RadiologistName,
    #[strum(serialize = "Upload Scan File (optional)")]
    ScanFile,
    #[strum(serialize = "Submit Scan Report")]
    Submit,
}

impl FormField {
    /// Whether the field edits free text
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Self::PatientName | Self::ScanSummary | Self::RadiologistName
        )
    }
}

/// What the form asks the application to do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Key consumed, nothing else to do
    None,
    /// Open the file picker for the upload field
    OpenFilePicker,
    /// Submit the form
    Submit,
    /// Leave the form
    Cancel,
}

/// State of the registration form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportForm {
    pub focused: FormField,
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    pub scan_type: ScanType,
    pub scan_summary: String,
    pub scan_date: NaiveDate,
    pub radiologist_name: String,
    /// File chosen for upload, if any
    pub scan_file: Option<PathBuf>,
    today: NaiveDate,
}

impl ReportForm {
    /// Empty form with the scan date set to `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            focused: FormField::PatientName,
            patient_name: String::new(),
            age: 0,
            gender: Gender::default(),
            scan_type: ScanType::default(),
            scan_summary: String::new(),
            scan_date: today,
            radiologist_name: String::new(),
            scan_file: None,
            today,
        }
    }

    /// Clear every field after a successful submission
    pub fn reset(&mut self) {
        *self = Self::new(self.today);
    }

    /// Field values as a report to store; `file_name` is filled by intake
    pub fn to_fields(&self) -> NewScanReport {
        NewScanReport {
            patient_name: self.patient_name.clone(),
            age: self.age,
            gender: self.gender,
            scan_type: self.scan_type,
            scan_summary: self.scan_summary.clone(),
            scan_date: self.scan_date,
            radiologist_name: self.radiologist_name.clone(),
            file_name: String::new(),
        }
    }

    /// Text shown for a field
    pub fn display_value(&self, field: FormField) -> String {
        match field {
            FormField::PatientName => self.patient_name.clone(),
            FormField::Age => self.age.to_string(),
            FormField::Gender => self.gender.to_string(),
            FormField::ScanType => self.scan_type.to_string(),
            FormField::ScanSummary => self.scan_summary.clone(),
            FormField::ScanDate => self.scan_date.format("%Y-%m-%d").to_string(),
            FormField::RadiologistName => self.radiologist_name.clone(),
            FormField::ScanFile => self
                .scan_file
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            FormField::Submit => String::new(),
        }
    }

    /// Move focus to the next field, wrapping
    pub fn focus_next(&mut self) {
        self.focused = cycle(self.focused, true);
    }

    /// Move focus to the previous field, wrapping
    pub fn focus_previous(&mut self) {
        self.focused = cycle(self.focused, false);
    }

    /// Index of the focused field in display order
    pub fn focused_index(&self) -> usize {
        FormField::iter()
            .position(|f| f == self.focused)
            .unwrap_or(0)
    }

    /// Handle keyboard input for the form
    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('s') => FormAction::Submit,
                _ => FormAction::None,
            };
        }

        match key.code {
            KeyCode::Esc => return FormAction::Cancel,
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return FormAction::None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_previous();
                return FormAction::None;
            }
            KeyCode::Enter => {
                return match self.focused {
                    FormField::Submit => FormAction::Submit,
                    FormField::ScanFile => FormAction::OpenFilePicker,
                    _ => {
                        self.focus_next();
                        FormAction::None
                    }
                };
            }
            _ => {}
        }

        match self.focused {
            FormField::PatientName => edit_text(&mut self.patient_name, key.code),
            FormField::ScanSummary => edit_text(&mut self.scan_summary, key.code),
            FormField::RadiologistName => edit_text(&mut self.radiologist_name, key.code),
            FormField::Age => self.edit_age(key.code),
            FormField::Gender => {
                if let Some(forward) = selection_direction(key.code) {
                    self.gender = cycle(self.gender, forward);
                }
            }
            FormField::ScanType => {
                if let Some(forward) = selection_direction(key.code) {
                    self.scan_type = cycle(self.scan_type, forward);
                }
            }
            FormField::ScanDate => self.edit_date(key.code),
            FormField::ScanFile => {
                if matches!(key.code, KeyCode::Backspace | KeyCode::Delete) {
                    self.scan_file = None;
                }
            }
            FormField::Submit => {}
        }
        FormAction::None
    }

    fn edit_age(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let digit = c.to_digit(10).unwrap_or(0);
                let value = u32::from(self.age) * 10 + digit;
                self.age = value.min(u32::from(MAX_AGE)) as u8;
            }
            KeyCode::Backspace => self.age /= 10,
            KeyCode::Right | KeyCode::Char('+') => self.age = (self.age + 1).min(MAX_AGE),
            KeyCode::Left | KeyCode::Char('-') => self.age = self.age.saturating_sub(1),
            _ => {}
        }
    }

    fn edit_date(&mut self, code: KeyCode) {
        match code {
            KeyCode::Right | KeyCode::Char('+') => {
                if let Some(next) = self.scan_date.checked_add_days(Days::new(1)) {
                    self.scan_date = next;
                }
            }
            KeyCode::Left | KeyCode::Char('-') => {
                if let Some(prev) = self.scan_date.checked_sub_days(Days::new(1)) {
                    self.scan_date = prev;
                }
            }
            KeyCode::Char('t') => self.scan_date = self.today,
            _ => {}
        }
    }
}

/// Apply a key to a free-text buffer
pub fn edit_text(buffer: &mut String, code: KeyCode) {
    match code {
        KeyCode::Char(c) => buffer.push(c),
        KeyCode::Backspace => {
            buffer.pop();
        }
        _ => {}
    }
}

fn selection_direction(code: KeyCode) -> Option<bool> {
    match code {
        KeyCode::Right | KeyCode::Char(' ') => Some(true),
        KeyCode::Left => Some(false),
        _ => None,
    }
}
