//! # Evaluate Subcommand
//!
//! Builds one `Expense` from command-line arguments, evaluates it against
//! the rule file, and prints the verdict as pretty JSON.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;

use spendguard_core::{Expense, ExpenseCategory, RegionCode};
use spendguard_engine::{ComplianceEngine, IdentityConversion};
use spendguard_rules::{load_rules_file, RuleRegistry};

/// Arguments for the `spendguard evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Path to the rule file (YAML or JSON).
    #[arg(long)]
    pub rules: PathBuf,

    /// Expense amount as a decimal string, e.g. "75.00".
    #[arg(long)]
    pub amount: String,

    /// ISO 4217 currency code, e.g. "USD".
    #[arg(long)]
    pub currency: String,

    /// Expense category (meals, lodging, transportation, entertainment,
    /// gifts, supplies, other).
    #[arg(long)]
    pub category: ExpenseCategory,

    /// Date the spend occurred (YYYY-MM-DD). Defaults to today (UTC).
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Submitting employee's role, if any.
    #[arg(long)]
    pub role: Option<String>,

    /// Travel region code, e.g. "DE".
    #[arg(long)]
    pub region: Option<RegionCode>,

    /// Free-text description.
    #[arg(long, default_value = "")]
    pub description: String,

    /// Evaluation instant (RFC 3339). Defaults to now; pin it to make the
    /// output reproducible.
    #[arg(long)]
    pub as_of: Option<DateTime<Utc>>,
}

impl EvaluateArgs {
    fn to_expense(&self) -> Expense {
        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());
        let mut expense = Expense::new(
            self.amount.clone(),
            self.currency.clone(),
            self.category,
            date,
        )
        .with_description(self.description.clone());
        if let Some(ref role) = self.role {
            expense = expense.with_role(role.clone());
        }
        if let Some(ref region) = self.region {
            expense = expense.with_region(region.clone());
        }
        expense
    }
}

/// Execute the evaluate subcommand.
///
/// Returns exit code: 0 compliant, 1 any violation, 2 on operational error
/// (mapped by `main`).
pub fn run_evaluate(args: &EvaluateArgs) -> Result<u8> {
    let registry = Arc::new(RuleRegistry::new());
    let version = load_rules_file(&args.rules, &registry)
        .with_context(|| format!("failed to load rules from {}", args.rules.display()))?;
    tracing::info!(version, "rule snapshot installed");

    let converter = Arc::new(IdentityConversion::new(args.currency.clone()));
    let engine = ComplianceEngine::new(registry, converter);

    let expense = args.to_expense();
    let as_of = args.as_of.unwrap_or_else(Utc::now);

    let result = engine
        .evaluate(&expense, as_of)
        .context("evaluation failed")?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(if result.is_compliant() { 0 } else { 1 })
}
