//! # spendguard CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.
//! Uses clap derive macros; all compliance logic lives in the library
//! crates.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use spendguard_cli::evaluate::{run_evaluate, EvaluateArgs};
use spendguard_cli::rules::{run_rules, RulesArgs};

/// Spendguard — expense compliance evaluation.
///
/// Evaluates a single expense against a rule file and prints the full
/// compliance verdict as JSON.
#[derive(Parser, Debug)]
#[command(name = "spendguard", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate one expense against a rule file.
    Evaluate(EvaluateArgs),

    /// Structurally validate a rule file without evaluating anything.
    Rules(RulesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let outcome = match &cli.command {
        Commands::Evaluate(args) => run_evaluate(args),
        Commands::Rules(args) => run_rules(args),
    };

    match outcome {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            tracing::error!("{err:#}");
            ExitCode::from(2)
        }
    }
}
