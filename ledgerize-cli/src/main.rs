use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use ledgerize_core::FileKind;
use ledgerize_ingest::YearPolicy;
use ledgerize_ledger::{Aggregator, aggregate_to_file};

mod config;
mod state;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("LEDGERIZE_BUILD_REV"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "ledgerize",
    version,
    long_version = LONG_VERSION,
    about = "Fold bank statement exports into one CSV ledger"
)]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: config.toml in $LEDGERIZE_HOME or ~/.ledgerize)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse every statement under the input directory and write the ledger
    Aggregate {
        /// Directory to scan recursively
        #[arg(long)]
        input: Option<PathBuf>,

        /// Ledger CSV to write (overwritten)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Year for MM/DD statement dates (default: inferred from each statement)
        #[arg(long)]
        year: Option<i32>,
    },

    /// Show which account each path maps to
    Identify {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Write a default config file if none exists
    InitConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Aggregate {
            input,
            output,
            year,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let input = input.unwrap_or(cfg.paths.input_dir.clone());
            let output = output.unwrap_or(cfg.paths.output.clone());
            let year = YearPolicy::from(year.or(cfg.statement.year));
            tracing::debug!(input = %input.display(), output = %output.display(), ?year, "resolved settings");

            let aggregator = Aggregator::new(cfg.account_table()?, year).excluding(&output);
            let report = aggregate_to_file(&aggregator, &input, &output)
                .with_context(|| format!("aggregating {}", input.display()))?;

            println!("{report}");
            println!("Wrote {}", output.display());
        }

        Command::Identify { paths } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let table = cfg.account_table()?;
            for path in &paths {
                let kind = FileKind::from_path(path)
                    .map(|k| k.to_string())
                    .unwrap_or_else(|| "?".to_string());
                match table.identify(path) {
                    Ok(account) => println!("{}\t{}\t{}", path.display(), account, kind),
                    Err(e) => println!("{}\terror: {}", path.display(), e),
                }
            }
        }

        Command::InitConfig => {
            config::init_config()?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
