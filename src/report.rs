//! Scan report records
//!
//! `NewScanReport` is the caller-supplied field set; `ScanReport` is a stored
//! row with its assigned id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::{Gender, ScanType};

/// Highest age the intake widgets accept
pub const MAX_AGE: u8 = 120;

/// Field set for a report that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewScanReport {
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    pub scan_type: ScanType,
    pub scan_summary: String,
    pub scan_date: NaiveDate,
    pub radiologist_name: String,
    /// Path of the saved upload, or empty when no file was attached
    pub file_name: String,
}

/// A stored scan report row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub id: i64,
    pub patient_name: String,
    pub age: u8,
    pub gender: Gender,
    pub scan_type: ScanType,
    pub scan_summary: String,
    pub scan_date: NaiveDate,
    pub radiologist_name: String,
    pub file_name: String,
}

impl ScanReport {
    /// The attached file, if one was uploaded
    pub fn attachment(&self) -> Option<&Path> {
        if self.file_name.is_empty() {
            None
        } else {
            Some(Path::new(&self.file_name))
        }
    }

    /// True when every caller-supplied field equals `fields`
    pub fn matches(&self, fields: &NewScanReport) -> bool {
        self.patient_name == fields.patient_name
            && self.age == fields.age
            && self.gender == fields.gender
            && self.scan_type == fields.scan_type
            && self.scan_summary == fields.scan_summary
            && self.scan_date == fields.scan_date
            && self.radiologist_name == fields.radiologist_name
            && self.file_name == fields.file_name
    }

    /// ISO date text, as stored
    pub fn scan_date_text(&self) -> String {
        self.scan_date.format("%Y-%m-%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(file_name: &str) -> ScanReport {
        ScanReport {
            id: 1,
            patient_name: "Alice Smith".into(),
            age: 34,
            gender: Gender::Female,
            scan_type: ScanType::Mri,
            scan_summary: "No abnormality detected".into(),
            scan_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            radiologist_name: "Dr. Osei".into(),
            file_name: file_name.into(),
        }
    }

    #[test]
    fn attachment_is_none_for_empty_file_name() {
        assert!(report("").attachment().is_none());
        assert_eq!(
            report("uploaded_scans/scan1.png").attachment(),
            Some(Path::new("uploaded_scans/scan1.png"))
        );
    }

    #[test]
    fn scan_date_renders_iso() {
        assert_eq!(report("").scan_date_text(), "2024-03-09");
    }

    #[test]
    fn json_shape_uses_labels() {
        let json = serde_json::to_value(report("")).unwrap();
        assert_eq!(json["scan_type"], "MRI");
        assert_eq!(json["gender"], "Female");
        assert_eq!(json["scan_date"], "2024-03-09");
    }
}
