//! Report intake and viewing.
//!
//! `Intake` is the request/response layer shared by the terminal UI and the
//! headless commands: it saves an optional upload, stores the report, and
//! shapes stored reports into the table and card views.

use tracing::{error, info};

use crate::config::PortalConfig;
use crate::error::Result;
use crate::report::{NewScanReport, ScanReport};
use crate::store::ReportStore;
use crate::uploads::{Upload, UploadSink};

/// Column headings of the "View All Reports" table. `file_name` is not shown.
pub const TABLE_COLUMNS: [&str; 8] = [
    "ID",
    "Patient Name",
    "Age",
    "Gender",
    "Scan Type",
    "Scan Summary",
    "Scan Date",
    "Radiologist Name",
];

/// Notice shown when a search has no matches
pub const NO_RECORDS_NOTICE: &str = "No records found.";

/// Outcome of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub id: i64,
    pub patient_name: String,
    /// Stored `file_name`: the saved upload path, or empty
    pub file_name: String,
}

impl SubmitReceipt {
    pub fn message(&self) -> String {
        format!(
            "Scan report for '{}' added successfully!",
            self.patient_name
        )
    }
}

/// One table row, cells in [`TABLE_COLUMNS`] order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: [String; 8],
}

impl From<&ScanReport> for TableRow {
    fn from(report: &ScanReport) -> Self {
        Self {
            cells: [
                report.id.to_string(),
                report.patient_name.clone(),
                report.age.to_string(),
                report.gender.to_string(),
                report.scan_type.to_string(),
                report.scan_summary.clone(),
                report.scan_date_text(),
                report.radiologist_name.clone(),
            ],
        }
    }
}

/// Every stored report as table rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportTable {
    pub rows: Vec<TableRow>,
}

impl ReportTable {
    pub fn columns(&self) -> &'static [&'static str] {
        &TABLE_COLUMNS
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A search hit rendered as a labelled card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCard {
    pub heading: String,
    pub scan_type: String,
    pub date: String,
    pub radiologist: String,
    pub summary: String,
    /// Link to the uploaded file, present only when one was attached
    pub file_link: Option<String>,
}

impl From<&ScanReport> for ReportCard {
    fn from(report: &ScanReport) -> Self {
        Self {
            heading: format!(
                "Patient: {} ({}, {} y/o)",
                report.patient_name, report.gender, report.age
            ),
            scan_type: report.scan_type.to_string(),
            date: report.scan_date_text(),
            radiologist: report.radiologist_name.clone(),
            summary: report.scan_summary.clone(),
            file_link: report
                .attachment()
                .map(|path| path.display().to_string()),
        }
    }
}

impl ReportCard {
    /// Card as plain text lines
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.heading.clone(),
            format!("Scan Type: {}", self.scan_type),
            format!("Date: {}", self.date),
            format!("Radiologist: {}", self.radiologist),
            "Summary:".to_string(),
        ];
        lines.extend(self.summary.lines().map(|l| format!("  {l}")));
        if let Some(link) = &self.file_link {
            lines.push(format!("View Scan File: {link}"));
        }
        lines
    }
}

/// Result of a patient-name search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Empty query: nothing is rendered
    Idle,
    /// Query ran and matched nothing
    NoRecords,
    /// Matching reports in insertion order
    Found(Vec<ReportCard>),
}

/// Intake and viewer service over one store and one upload directory
#[derive(Debug, Clone)]
pub struct Intake {
    store: ReportStore,
    sink: UploadSink,
}

impl Intake {
    /// Build the store and upload sink, create the table and upload directory
    pub fn open(config: &PortalConfig) -> Result<Self> {
        let store = ReportStore::new(config);
        let sink = UploadSink::new(config);
        store.ensure_schema()?;
        sink.ensure_dir()?;
        info!(
            db = %config.database_path.display(),
            uploads = %config.upload_dir.display(),
            "Intake ready"
        );
        Ok(Self { store, sink })
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    pub fn sink(&self) -> &UploadSink {
        &self.sink
    }

    /// Save the upload (if any) and store the report.
    ///
    /// `fields.file_name` is ignored: it is set from where the upload was
    /// saved, or left empty without one.
    pub fn submit(&self, fields: &NewScanReport, upload: Option<&Upload>) -> Result<SubmitReceipt> {
        let file_name = match upload {
            Some(upload) => self
                .sink
                .save(upload)
                .inspect_err(|e| error!("Upload failed: {}", e))?
                .display()
                .to_string(),
            None => String::new(),
        };

        let report = NewScanReport {
            file_name,
            ..fields.clone()
        };
        let id = self
            .store
            .insert(&report)
            .inspect_err(|e| error!("Storing report failed: {}", e))?;

        Ok(SubmitReceipt {
            id,
            patient_name: report.patient_name,
            file_name: report.file_name,
        })
    }

    /// All reports as a table without the file column
    pub fn render_all(&self) -> Result<ReportTable> {
        let reports = self.store.list_all()?;
        Ok(ReportTable {
            rows: reports.iter().map(TableRow::from).collect(),
        })
    }

    /// Search by patient name; an empty query renders nothing
    pub fn render_search(&self, query: &str) -> Result<SearchOutcome> {
        if query.is_empty() {
            return Ok(SearchOutcome::Idle);
        }

        let reports = self.store.search_by_name(query)?;
        if reports.is_empty() {
            Ok(SearchOutcome::NoRecords)
        } else {
            Ok(SearchOutcome::Found(
                reports.iter().map(ReportCard::from).collect(),
            ))
        }
    }
}
