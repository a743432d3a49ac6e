//! Report store: durable storage of scan reports in a single SQLite table.
//!
//! Every operation opens its own connection, runs one statement and drops
//! the connection before returning. There is no pool and no batching; each
//! call is atomic at the statement level only.

use rusqlite::{Connection, Row, params};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::PortalConfig;
use crate::error::{PortalError, Result};
use crate::report::{NewScanReport, ScanReport};
use crate::types::SearchCase;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS scan_reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_name TEXT NOT NULL,
    age INTEGER,
    gender TEXT,
    scan_type TEXT,
    scan_summary TEXT,
    scan_date TEXT,
    radiologist_name TEXT,
    file_name TEXT
)";

const SELECT_COLUMNS: &str = "SELECT id, patient_name, age, gender, scan_type, scan_summary, \
     scan_date, radiologist_name, file_name FROM scan_reports";

/// Handle on the `scan_reports` table in one database file
#[derive(Debug, Clone)]
pub struct ReportStore {
    db_path: PathBuf,
    search_case: SearchCase,
    busy_timeout: Duration,
}

/// Row as read from SQLite, before enum columns are parsed
struct RawReport {
    id: i64,
    patient_name: String,
    age: u8,
    gender: String,
    scan_type: String,
    scan_summary: String,
    scan_date: chrono::NaiveDate,
    radiologist_name: String,
    file_name: String,
}

impl RawReport {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            patient_name: row.get(1)?,
            age: row.get(2)?,
            gender: row.get(3)?,
            scan_type: row.get(4)?,
            scan_summary: row.get(5)?,
            scan_date: row.get(6)?,
            radiologist_name: row.get(7)?,
            file_name: row.get(8)?,
        })
    }
}

impl TryFrom<RawReport> for ScanReport {
    type Error = PortalError;

    fn try_from(raw: RawReport) -> Result<Self> {
        let gender = raw.gender.parse().map_err(|_| PortalError::InvalidStoredValue {
            column: "gender",
            value: raw.gender.clone(),
        })?;
        let scan_type = raw.scan_type.parse().map_err(|_| PortalError::InvalidStoredValue {
            column: "scan_type",
            value: raw.scan_type.clone(),
        })?;

        Ok(Self {
            id: raw.id,
            patient_name: raw.patient_name,
            age: raw.age,
            gender,
            scan_type,
            scan_summary: raw.scan_summary,
            scan_date: raw.scan_date,
            radiologist_name: raw.radiologist_name,
            file_name: raw.file_name,
        })
    }
}

impl ReportStore {
    /// Create a store for the database named in `config`
    pub fn new(config: &PortalConfig) -> Self {
        Self {
            db_path: config.database_path.clone(),
            search_case: config.search_case,
            busy_timeout: Duration::from_millis(config.busy_timeout_ms),
        }
    }

    /// Path of the backing database file
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a fresh connection for a single operation
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path).map_err(|source| PortalError::StorageOpen {
            path: self.db_path.clone(),
            source,
        })?;
        conn.busy_timeout(self.busy_timeout)?;
        Ok(conn)
    }

    /// Create the `scan_reports` table if it does not exist yet
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(CREATE_TABLE, [])?;
        info!("Report table ready in {:?}", self.db_path);
        Ok(())
    }

    /// Append one report and return its assigned id
    pub fn insert(&self, report: &NewScanReport) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO scan_reports (
                patient_name, age, gender, scan_type, scan_summary, scan_date,
                radiologist_name, file_name
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                report.patient_name,
                report.age,
                report.gender.to_string(),
                report.scan_type.to_string(),
                report.scan_summary,
                report.scan_date,
                report.radiologist_name,
                report.file_name,
            ],
        )?;
        let id = conn.last_insert_rowid();
        info!(id, patient = %report.patient_name, "Scan report stored");
        Ok(id)
    }

    /// Every stored report in insertion order
    pub fn list_all(&self) -> Result<Vec<ScanReport>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let rows = stmt
            .query_map([], RawReport::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(count = rows.len(), "Listed scan reports");
        rows.into_iter().map(ScanReport::try_from).collect()
    }

    /// Reports whose patient name contains `query` anywhere.
    ///
    /// The query is matched literally (`%` and `_` carry no meaning). With
    /// [`SearchCase::Sensitive`] case must match exactly; with
    /// [`SearchCase::Insensitive`] ASCII letters are folded. An empty query
    /// matches every report.
    pub fn search_by_name(&self, query: &str) -> Result<Vec<ScanReport>> {
        if query.is_empty() {
            return self.list_all();
        }

        let filter = match self.search_case {
            SearchCase::Sensitive => "WHERE instr(patient_name, ?1) > 0",
            SearchCase::Insensitive => "WHERE instr(lower(patient_name), lower(?1)) > 0",
        };

        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} {filter} ORDER BY id"))?;
        let rows = stmt
            .query_map(params![query], RawReport::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(query, matches = rows.len(), case = %self.search_case, "Searched scan reports");
        rows.into_iter().map(ScanReport::try_from).collect()
    }

    /// Number of stored reports
    pub fn count(&self) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM scan_reports", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Gender, ScanType};
    use chrono::NaiveDate;

    fn store_in(dir: &Path) -> ReportStore {
        let store = ReportStore::new(&PortalConfig::in_dir(dir));
        store.ensure_schema().unwrap();
        store
    }

    fn fields(name: &str) -> NewScanReport {
        NewScanReport {
            patient_name: name.into(),
            age: 52,
            gender: Gender::Male,
            scan_type: ScanType::CtScan,
            scan_summary: "Small nodule in left lower lobe".into(),
            scan_date: NaiveDate::from_ymd_opt(2025, 1, 17).unwrap(),
            radiologist_name: "Dr. Lind".into(),
            file_name: String::new(),
        }
    }

    #[test]
    fn table_has_expected_columns() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let conn = Connection::open(store.db_path()).unwrap();
        let mut stmt = conn.prepare("PRAGMA table_info(scan_reports)").unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get(1))
            .unwrap()
            .collect::<rusqlite::Result<_>>()
            .unwrap();
        assert_eq!(
            columns,
            [
                "id",
                "patient_name",
                "age",
                "gender",
                "scan_type",
                "scan_summary",
                "scan_date",
                "radiologist_name",
                "file_name"
            ]
        );
    }

    #[test]
    fn enum_columns_store_display_labels() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.insert(&fields("Ama Mensah")).unwrap();

        let conn = Connection::open(store.db_path()).unwrap();
        let (scan_type, date): (String, String) = conn
            .query_row("SELECT scan_type, scan_date FROM scan_reports", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(scan_type, "CT Scan");
        assert_eq!(date, "2025-01-17");
    }

    #[test]
    fn unknown_stored_label_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.insert(&fields("Ama Mensah")).unwrap();

        let conn = Connection::open(store.db_path()).unwrap();
        conn.execute("UPDATE scan_reports SET scan_type = 'PET'", []).unwrap();

        let err = store.list_all().unwrap_err();
        assert!(err.is_storage());
        assert!(matches!(
            err,
            PortalError::InvalidStoredValue { column: "scan_type", .. }
        ));
    }

    #[test]
    fn count_tracks_inserts() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        assert_eq!(store.count().unwrap(), 0);
        store.insert(&fields("A")).unwrap();
        store.insert(&fields("B")).unwrap();
        assert_eq!(store.count().unwrap(), 2);
    }
}
