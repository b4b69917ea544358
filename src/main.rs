use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ebafin::cli::import::ImportArgs;
use ebafin::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for ebafin::AppCommand {
    fn from(cmd: Commands) -> ebafin::AppCommand {
        match cmd {
            Commands::Validate { sheet } => ebafin::AppCommand::Validate { sheet },
            Commands::Import {
                sheet,
                dry_run,
                out_dir,
                log,
                user,
                password,
                company,
            } => ebafin::AppCommand::Import(Box::new(ImportArgs {
                sheet,
                dry_run,
                out_dir,
                log_path: log,
                user,
                password,
                company,
            })),
            Commands::Sample { path } => ebafin::AppCommand::Sample { path },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Check a budget spreadsheet against the grid contract
    Validate {
        /// Spreadsheet file (CSV/TXT)
        sheet: PathBuf,
    },
    /// Import a budget spreadsheet into the ERP
    Import {
        /// Spreadsheet file (CSV/TXT)
        sheet: PathBuf,

        /// Render the envelopes to files instead of posting them
        #[arg(long)]
        dry_run: bool,

        /// Output directory for --dry-run envelopes
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Import log destination
        #[arg(long)]
        log: Option<PathBuf>,

        /// Web service user (overrides config)
        #[arg(long)]
        user: Option<String>,

        /// Web service password (overrides config)
        #[arg(long)]
        password: Option<String>,

        /// Company code / codEmp (overrides config)
        #[arg(long)]
        company: Option<String>,
    },
    /// Write a template spreadsheet
    Sample {
        /// Destination file
        #[arg(default_value = "sample_budget.csv")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ebafin::cli::setup::setup(),
        Some(cmd) => ebafin::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
