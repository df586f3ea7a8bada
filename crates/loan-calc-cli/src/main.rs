mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use loan_calc_core::config::CalculatorConfig;

use commands::afford::AffordArgs;
use commands::amortize::LoanArgs;
use commands::report::ReportArgs;

const DEFAULT_LOG_FILTER: &str = "loancalc=warn,loan_calc_core=warn";

/// Mortgage repayment and affordability calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Mortgage repayment and affordability calculations",
    long_about = "Computes amortisation schedules with extra repayments and lump sums, \
                  borrowing power from income and debts, and the data behind a \
                  printable repayment report. All figures use decimal arithmetic."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Calculator settings file (JSON, or YAML by .yaml/.yml extension)
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Repayment, total interest and yearly schedule for a loan
    Amortize(LoanArgs),
    /// Maximum loan and home price from income and debts
    Afford(AffordArgs),
    /// Formatted summary and schedule for a printable report
    Report(ReportArgs),
    /// List the loan-type presets
    Presets,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let config = match cli.config {
        Some(ref path) => input::file::read_config(path)?,
        None => CalculatorConfig::default(),
    };

    match cli.command {
        Commands::Amortize(args) => commands::amortize::run_amortize(args, &config),
        Commands::Afford(args) => commands::afford::run_afford(args, &config),
        Commands::Report(args) => commands::report::run_report(args, &config),
        Commands::Presets => commands::presets::run_presets(),
        Commands::Version => Ok(serde_json::json!({
            "name": "loancalc",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("loancalc {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    init_tracing();
    let format = cli.output.clone();

    match run(cli) {
        Ok(value) => {
            output::format_output(&format, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
