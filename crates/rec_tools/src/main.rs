//! Recording Validator - Development Tools
//!
//! # Usage
//!
//! ```bash
//! # Validate a recording directory
//! cargo run -p rec_tools -- validate recordings/s1
//!
//! # Machine-readable report, checks on a thread pool
//! cargo run -p rec_tools -- validate recordings/s1 --format json --parallel
//!
//! # Print the expected checklist
//! cargo run -p rec_tools -- checklist
//! ```
//!
//! Exit status: 0 when the dataset passes, 1 when findings were reported,
//! 2 when validation could not run.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rec_core::config::ValidationConfig;
use rec_tools::validate::{
    exit_code, render_checklist, render_report, validate, OutputFormat, Overrides, ToolError,
};

#[derive(Parser)]
#[command(name = "rec-tools")]
#[command(about = "Validation tools for sensor recording datasets")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a directory of recordings
    Validate {
        /// Path to the recording directory
        path: Option<PathBuf>,

        /// RON config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// RON checklist replacing the reference protocol
        #[arg(long)]
        checklist: Option<PathBuf>,

        /// Number of header lines in each recording
        #[arg(long)]
        header_size: Option<usize>,

        /// Run checks in parallel
        #[arg(long)]
        parallel: bool,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// Print the expected (device, activity, subtype) checklist
    Checklist {
        /// RON config file naming a checklist
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => Self::Text,
            Format::Json => Self::Json,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(2)
        }
    }
}

fn run(command: Commands) -> Result<ExitCode, ToolError> {
    match command {
        Commands::Validate {
            path,
            config,
            checklist,
            header_size,
            parallel,
            format,
        } => {
            let overrides = Overrides {
                data_dir: path,
                config,
                checklist,
                header_size,
                parallel,
            };
            let report = validate(&overrides)?;
            print!("{}", render_report(&report, format.into())?);
            if report.is_clean() {
                tracing::info!("Validation passed");
            } else {
                tracing::warn!("Validation reported {} finding(s)", report.len());
            }
            Ok(ExitCode::from(exit_code(&report)))
        }
        Commands::Checklist { config, format } => {
            let config = match config {
                Some(path) => ValidationConfig::load(&path)?,
                None => ValidationConfig::default(),
            };
            let checklist = config.load_checklist()?;
            print!("{}", render_checklist(&checklist, format.into())?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
