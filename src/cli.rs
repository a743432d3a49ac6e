use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::{Gender, ScanType};

/// Scan Portal - register, list and search hospital scan reports
#[derive(Parser, Debug)]
#[command(name = "scan-portal")]
#[command(about = "A terminal portal for registering and finding hospital scan reports")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file (overrides the configuration file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Directory uploaded scan files are written to (overrides the configuration file)
    #[arg(long, global = true)]
    pub upload_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the interactive portal (default)
    Tui,
    /// Register a scan report without the interactive form
    Register {
        #[arg(long)]
        patient_name: String,
        /// Patient age in years (0-120)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=120))]
        age: u8,
        /// Male, Female or Other
        #[arg(long)]
        gender: Gender,
        /// X-ray, MRI, CT Scan, Ultrasound or Other
        #[arg(long)]
        scan_type: ScanType,
        /// Scan result summary
        #[arg(long)]
        summary: String,
        /// Scan date as YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        radiologist: String,
        /// Scan file to attach (pdf, jpg, png, jpeg)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List every stored report
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Find reports whose patient name contains QUERY
    Search {
        query: String,
        /// Print JSON instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Validate a configuration file
    Validate {
        /// Path to configuration file to validate
        config: PathBuf,
    },
    /// Write the default configuration to a file
    InitConfig {
        path: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::try_parse_from(["scan-portal"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.db.is_none());
    }

    #[test]
    fn test_cli_register_command() {
        let cli = Cli::try_parse_from([
            "scan-portal",
            "register",
            "--patient-name",
            "Jane Doe",
            "--age",
            "42",
            "--gender",
            "female",
            "--scan-type",
            "CT Scan",
            "--summary",
            "No fracture",
            "--date",
            "2025-01-17",
            "--radiologist",
            "Dr. Smith",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Register {
                patient_name,
                age,
                gender,
                scan_type,
                date,
                file,
                ..
            }) => {
                assert_eq!(patient_name, "Jane Doe");
                assert_eq!(age, 42);
                assert_eq!(gender, Gender::Female);
                assert_eq!(scan_type, ScanType::CtScan);
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 17));
                assert!(file.is_none());
            }
            other => panic!("Expected Register command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_register_rejects_age_over_limit() {
        let result = Cli::try_parse_from([
            "scan-portal",
            "register",
            "--patient-name",
            "A",
            "--age",
            "121",
            "--gender",
            "Male",
            "--scan-type",
            "MRI",
            "--summary",
            "s",
            "--radiologist",
            "r",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_register_rejects_unknown_scan_type() {
        let result = Cli::try_parse_from([
            "scan-portal",
            "register",
            "--patient-name",
            "A",
            "--age",
            "3",
            "--gender",
            "Male",
            "--scan-type",
            "PET",
            "--summary",
            "s",
            "--radiologist",
            "r",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_search_with_global_overrides() {
        let cli = Cli::try_parse_from([
            "scan-portal",
            "search",
            "Doe",
            "--json",
            "--db",
            "/tmp/reports.db",
        ])
        .unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/reports.db")));
        match cli.command {
            Some(Commands::Search { query, json }) => {
                assert_eq!(query, "Doe");
                assert!(json);
            }
            other => panic!("Expected Search command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_validate_command() {
        let cli = Cli::try_parse_from(["scan-portal", "validate", "/path/to/config.json"]).unwrap();
        match cli.command {
            Some(Commands::Validate { config }) => {
                assert_eq!(config, PathBuf::from("/path/to/config.json"));
            }
            other => panic!("Expected Validate command, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_init_config_command() {
        let cli = Cli::try_parse_from(["scan-portal", "init-config", "portal.json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::InitConfig { .. })));
    }
}
