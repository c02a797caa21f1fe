//! `ares <IČO>`: look up a company and write the fixed-field record file.
//!
//! Diagnostics go to the log file only; the record file is written only when
//! the whole lookup succeeds.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ares::config::AppConfig;
use ares::core::{AresError, record};
use ares::lookup::Pipeline;

#[derive(Debug, Parser)]
#[command(name = "ares", version, about = "Look up a Czech company by IČO in ARES")]
struct Cli {
    /// Company identification number (IČO); spaces are ignored.
    ico: String,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output record file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Diagnostics log file.
    #[arg(long)]
    log: Option<PathBuf>,

    /// Recorded registry response to use instead of the registry request.
    #[arg(long)]
    registry_file: Option<PathBuf>,

    /// Recorded VAT listing response.
    #[arg(long)]
    vat_file: Option<PathBuf>,

    /// Recorded taxpayer status response.
    #[arg(long)]
    status_file: Option<PathBuf>,

    /// Never touch the network; calls without a recorded file fail.
    #[arg(long)]
    offline: bool,
}

impl Cli {
    fn app_config(&self) -> Result<AppConfig, AresError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };
        if let Some(path) = &self.output {
            config.output_path = path.clone();
        }
        if let Some(path) = &self.log {
            config.log_path = path.clone();
        }
        if let Some(path) = &self.registry_file {
            config.recorded.registry = Some(path.clone());
        }
        if let Some(path) = &self.vat_file {
            config.recorded.vat_listing = Some(path.clone());
        }
        if let Some(path) = &self.status_file {
            config.recorded.taxpayer_status = Some(path.clone());
        }
        config.offline |= self.offline;
        Ok(config)
    }
}

fn run(cli: &Cli, config: &AppConfig) -> Result<(), AresError> {
    tracing::info!(argument = %cli.ico, "starting lookup");
    let pipeline = Pipeline::with_config(config.fetcher()?, config.pipeline);
    let company = pipeline.lookup(&cli.ico)?;
    record::write_record(&config.output_path, &company, &config.output)
}

fn main() -> ExitCode {
    let parsed = Cli::try_parse();
    if let Err(e) = &parsed {
        if !e.use_stderr() {
            // --help and --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    }

    // Argument errors are logged to the default log file.
    let config = match &parsed {
        Ok(cli) => cli.app_config(),
        Err(_) => Ok(AppConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ares: {e}");
            return ExitCode::FAILURE;
        }
    };

    let log_file = match File::create(&config.log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("ares: cannot create log {}: {e}", config.log_path.display());
            return ExitCode::FAILURE;
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let cli = match parsed {
            Ok(cli) => cli,
            Err(e) => {
                tracing::error!(error = %e.render(), "invalid arguments");
                let _ = e.print();
                return ExitCode::FAILURE;
            }
        };
        match run(&cli, &config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "lookup failed");
                ExitCode::FAILURE
            }
        }
    })
}
