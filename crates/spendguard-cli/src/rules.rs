//! # Rules Subcommand
//!
//! Structurally validates a rule file the same way a live reload would:
//! parse, validate every rule, and report either the collection counts or
//! the offending rule.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use spendguard_rules::{load_rules_file, RuleRegistry};

/// Arguments for the `spendguard rules` subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Path to the rule file (YAML or JSON).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Execute the rules subcommand.
///
/// Returns exit code: 0 when the file would load cleanly, 1 when it is
/// rejected.
pub fn run_rules(args: &RulesArgs) -> Result<u8> {
    let registry = RuleRegistry::new();
    match load_rules_file(&args.path, &registry) {
        Ok(_) => {
            let snapshot = registry.snapshot().expect("snapshot present after load");
            println!(
                "OK: {} ({} policy rules, {} tax rules)",
                args.path.display(),
                snapshot.policy_rules().len(),
                snapshot.tax_rules().len(),
            );
            Ok(0)
        }
        Err(err) => {
            println!("REJECTED: {} — {err}", args.path.display());
            Ok(1)
        }
    }
}
