//! Scan Portal Library
//!
//! Registration, storage, listing and search of hospital scan reports,
//! with a terminal UI and headless commands on top.

pub mod app;
pub mod cli;
pub mod components;
pub mod config;
pub mod error;
pub mod input;
pub mod intake;
pub mod report;
pub mod store;
pub mod theme;
pub mod types;
pub mod ui;
pub mod uploads;

// Re-export main types for convenience
pub use config::PortalConfig;
pub use error::{PortalError, Result};
pub use intake::{Intake, ReportCard, ReportTable, SearchOutcome, SubmitReceipt};
pub use report::{NewScanReport, ScanReport};
pub use store::ReportStore;
pub use types::{DuplicatePolicy, Gender, ScanType, SearchCase, UploadKind};
pub use uploads::{Upload, UploadSink};
