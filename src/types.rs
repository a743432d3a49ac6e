//! Type-safe report and configuration enums
//!
//! Patient gender and scan modality are closed sets chosen from selection
//! widgets, so they are enums rather than free text. The display label is
//! what gets stored in the database and shown to the user.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Patient gender as offered by the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

/// Imaging modality of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum ScanType {
    #[default]
    #[strum(serialize = "X-ray")]
    #[serde(rename = "X-ray")]
    XRay,
    #[strum(serialize = "MRI")]
    #[serde(rename = "MRI")]
    Mri,
    #[strum(serialize = "CT Scan")]
    #[serde(rename = "CT Scan")]
    CtScan,
    Ultrasound,
    Other,
}

/// What to do when an upload's name is already taken in the upload directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Replace the existing file
    #[default]
    Overwrite,
    /// Refuse the upload
    Reject,
    /// Save under the first free `<stem>-<n>.<ext>`
    Rename,
}

/// Case handling for patient-name search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchCase {
    /// Exact-case substring match
    #[default]
    Sensitive,
    /// ASCII letters compare case-insensitively
    Insensitive,
}

/// File types accepted for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum UploadKind {
    Pdf,
    Jpg,
    Png,
    Jpeg,
}

impl UploadKind {
    /// Classify a file name by its extension
    pub fn from_file_name(name: &str) -> Option<Self> {
        std::path::Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }

    /// Comma-separated list of accepted extensions, for messages
    pub fn accepted_list() -> String {
        Self::iter()
            .map(|kind| kind.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Step to the neighbouring variant of a selection enum, wrapping at the ends
pub fn cycle<T>(current: T, forward: bool) -> T
where
    T: IntoEnumIterator + PartialEq + Copy,
{
    let all: Vec<T> = T::iter().collect();
    let index = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (index + 1) % all.len()
    } else {
        (index + all.len() - 1) % all.len()
    };
    all[next]
}
