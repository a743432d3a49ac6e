//! Scan Portal - Main entry point
//!
//! Builds the configuration, sets up logging, then either runs the
//! interactive portal or one headless command.

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use scan_portal::app::App;
use scan_portal::cli::{Cli, Commands};
use scan_portal::config::PortalConfig;
use scan_portal::error::PortalError;
use scan_portal::intake::{Intake, NO_RECORDS_NOTICE, SearchOutcome};
use scan_portal::report::NewScanReport;
use scan_portal::uploads::Upload;

const DEFAULT_LOG_FILTER: &str = "scan_portal=info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Log to a file so the terminal UI is never drawn over
fn init_file_logger(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Log to stderr for headless commands
fn init_stderr_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// Load the configuration file (if any), then apply flag overrides
fn build_config(cli: &Cli) -> Result<PortalConfig> {
    let base = match &cli.config {
        Some(path) => PortalConfig::load_from_file(path)?,
        None => PortalConfig::default(),
    };
    let config = base.with_overrides(cli.db.clone(), cli.upload_dir.clone());
    config.validate()?;
    Ok(config)
}

/// Main application entry point
fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Some(Commands::Validate { ref config }) => {
            init_stderr_logger();
            validate_config(config);
        }
        Some(Commands::InitConfig { ref path }) => {
            init_stderr_logger();
            PortalConfig::default().save_to_file(path)?;
            println!("✓ Default configuration written to {}", path.display());
        }
        None | Some(Commands::Tui) => {
            let config = config_or_exit(&cli);
            init_file_logger(&config.log_file)?;
            info!("Scan Portal starting up");
            run_tui(&config)?;
        }
        Some(ref command) => {
            let config = config_or_exit(&cli);
            init_stderr_logger();
            debug!(?command, "Running headless command");
            if let Err(e) = run_headless(command, &config) {
                error!("Command failed: {:#}", e);
                eprintln!("✗ {:#}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn config_or_exit(cli: &Cli) -> PortalConfig {
    match build_config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn validate_config(path: &Path) {
    info!("Validating configuration file: {:?}", path);
    match PortalConfig::load_from_file(path) {
        Ok(config) => match config.validate() {
            Ok(()) => {
                info!("Configuration validation successful");
                println!("✓ Configuration file is valid: {:?}", config);
            }
            Err(e) => {
                error!("Configuration validation failed: {}", e);
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            error!("Failed to load configuration file: {:#}", e);
            eprintln!("✗ Failed to load configuration file: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Run the interactive portal
fn run_tui(config: &PortalConfig) -> Result<()> {
    let intake = Intake::open(config)?;

    debug!("Initializing terminal for TUI mode");
    enable_raw_mode()
        .map_err(|e| PortalError::terminal(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| PortalError::terminal(format!("Failed to enter alternate screen: {}", e)))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| PortalError::terminal(format!("Failed to create terminal: {}", e)))?;

    let mut app = App::new(intake);
    let result = app.run(&mut terminal);

    // Always restore the terminal, even if the app failed
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    info!("Scan Portal exiting");
    result.map_err(Into::into)
}

/// Run one non-interactive command
fn run_headless(command: &Commands, config: &PortalConfig) -> Result<()> {
    let intake = Intake::open(config)?;

    match command {
        Commands::Register {
            patient_name,
            age,
            gender,
            scan_type,
            summary,
            date,
            radiologist,
            file,
        } => {
            let upload = file.as_deref().map(Upload::from_path).transpose()?;
            let fields = NewScanReport {
                patient_name: patient_name.clone(),
                age: *age,
                gender: *gender,
                scan_type: *scan_type,
                scan_summary: summary.clone(),
                scan_date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
                radiologist_name: radiologist.clone(),
                file_name: String::new(),
            };
            let receipt = intake.submit(&fields, upload.as_ref())?;
            println!("✓ {} (id {})", receipt.message(), receipt.id);
            if !receipt.file_name.is_empty() {
                println!("  File saved to {}", receipt.file_name);
            }
        }
        Commands::List { json: true } => {
            let reports = intake.store().list_all()?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Commands::List { json: false } => {
            let table = intake.render_all()?;
            println!("{}", table.columns().join(" | "));
            for row in &table.rows {
                println!("{}", row.cells.join(" | "));
            }
            println!("{} report(s)", table.rows.len());
        }
        Commands::Search { query, json: true } => {
            let reports = intake.store().search_by_name(query)?;
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        Commands::Search { query, json: false } => match intake.render_search(query)? {
            SearchOutcome::Found(cards) => {
                for card in cards {
                    for line in card.lines() {
                        println!("{}", line);
                    }
                    println!();
                }
            }
            SearchOutcome::Idle | SearchOutcome::NoRecords => println!("{}", NO_RECORDS_NOTICE),
        },
        Commands::Tui | Commands::Validate { .. } | Commands::InitConfig { .. } => {
            debug!("Command does not use the report store");
        }
    }

    Ok(())
}
