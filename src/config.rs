//! Portal configuration: where reports and uploads live, and how the
//! store and upload sink behave.
//!
//! The configuration is an explicit value handed to the store, the upload
//! sink and the intake service at construction. It can be saved to and
//! loaded from a JSON file; command-line flags override file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{DuplicatePolicy, SearchCase};

/// Default SQLite database file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "scan_reports.db";
/// Default directory for uploaded scan files
pub const DEFAULT_UPLOAD_DIR: &str = "uploaded_scans";
/// Default log file used while the terminal UI owns the screen
pub const DEFAULT_LOG_FILE: &str = "scan_portal.log";
/// Default wait for a locked database before giving up
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

/// Persistence and behaviour settings for the portal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// SQLite file holding the `scan_reports` table
    pub database_path: PathBuf,
    /// Directory uploaded files are saved into
    pub upload_dir: PathBuf,
    /// Behaviour when an upload's name already exists
    pub duplicate_uploads: DuplicatePolicy,
    /// Case handling for patient-name search
    pub search_case: SearchCase,
    /// How long a statement waits on a locked database
    pub busy_timeout_ms: u64,
    /// Log destination for interactive sessions
    pub log_file: PathBuf,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            duplicate_uploads: DuplicatePolicy::default(),
            search_case: SearchCase::default(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl PortalConfig {
    /// Configuration rooted in `dir`: database, uploads and log inside it
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            database_path: dir.join(DEFAULT_DATABASE_PATH),
            upload_dir: dir.join(DEFAULT_UPLOAD_DIR),
            log_file: dir.join(DEFAULT_LOG_FILE),
            ..Self::default()
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file; missing keys take defaults
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Apply command-line overrides on top of file or default values
    pub fn with_overrides(mut self, database_path: Option<PathBuf>, upload_dir: Option<PathBuf>) -> Self {
        if let Some(path) = database_path {
            self.database_path = path;
        }
        if let Some(dir) = upload_dir {
            self.upload_dir = dir;
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.database_path.as_os_str().is_empty() {
            anyhow::bail!("database_path must be specified");
        }
        if self.database_path.is_dir() {
            anyhow::bail!(
                "database_path {:?} is a directory, expected a database file",
                self.database_path
            );
        }

        if self.upload_dir.as_os_str().is_empty() {
            anyhow::bail!("upload_dir must be specified");
        }
        if self.upload_dir.is_file() {
            anyhow::bail!(
                "upload_dir {:?} is a file, expected a directory",
                self.upload_dir
            );
        }

        if self.log_file.as_os_str().is_empty() {
            anyhow::bail!("log_file must be specified");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_portal_layout() {
        let config = PortalConfig::default();
        assert_eq!(config.database_path, PathBuf::from("scan_reports.db"));
        assert_eq!(config.upload_dir, PathBuf::from("uploaded_scans"));
        assert_eq!(config.duplicate_uploads, DuplicatePolicy::Overwrite);
        assert_eq!(config.search_case, SearchCase::Sensitive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn save_and_load_preserve_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portal.json");

        let mut config = PortalConfig::in_dir(dir.path());
        config.duplicate_uploads = DuplicatePolicy::Rename;
        config.search_case = SearchCase::Insensitive;
        config.save_to_file(&path).unwrap();

        let loaded = PortalConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "upload_dir": "/srv/scans", "search_case": "insensitive" }"#)
            .unwrap();

        let loaded = PortalConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.upload_dir, PathBuf::from("/srv/scans"));
        assert_eq!(loaded.search_case, SearchCase::Insensitive);
        assert_eq!(loaded.database_path, PathBuf::from(DEFAULT_DATABASE_PATH));
        assert_eq!(loaded.busy_timeout_ms, DEFAULT_BUSY_TIMEOUT_MS);
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = PortalConfig::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let config = PortalConfig::default()
            .with_overrides(Some(PathBuf::from("/tmp/other.db")), None);
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.upload_dir, PathBuf::from(DEFAULT_UPLOAD_DIR));
    }

    #[test]
    fn validate_rejects_directory_as_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = PortalConfig {
            database_path: dir.path().to_path_buf(),
            ..PortalConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_file_as_upload_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not_a_dir");
        fs::write(&file, b"x").unwrap();
        let config = PortalConfig {
            upload_dir: file,
            ..PortalConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
