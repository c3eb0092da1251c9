//! # Tax Evaluation
//!
//! Computes the tax owed on an expense and flags tax-rule violations.
//! The two outputs are independent signals: rate rules accumulate into
//! the amount due, threshold rules emit violations when breached, and an
//! expense can owe tax while remaining fully tax-compliant.
//!
//! Tax is assessed on the expense's native amount — jurisdictional rules
//! are local to the travel region's currency context, unlike policy caps
//! which compare the normalized amount.

use spendguard_core::{format_amount, Expense};
use spendguard_rules::{TaxBasis, TaxRule};

use crate::violation::{RuleKind, Violation};

/// The tax evaluator's output for one expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxAssessment {
    /// Total owed across all matching rate rules, in cents.
    pub tax_due_cents: i64,
    /// Threshold breaches, ordered by rule id.
    pub violations: Vec<Violation>,
}

/// Evaluate every applicable tax rule against an expense.
///
/// Exhaustive like the policy evaluator: all rate rules contribute to the
/// running total and all threshold rules are checked, regardless of how
/// many have already been breached. Rate arithmetic truncates
/// (`amount * bps / 10_000`). A rule whose basis fails to parse is
/// skipped with a warning.
///
/// `rules` arrives ordered by rule id from the registry snapshot, and the
/// violations preserve that ordering.
pub fn evaluate_tax(expense: &Expense, native_cents: i64, rules: &[&TaxRule]) -> TaxAssessment {
    let mut tax_due_cents: i64 = 0;
    let mut violations = Vec::new();

    for rule in rules {
        let Some(basis) = rule.basis() else {
            tracing::warn!(
                rule_id = %rule.rule_id,
                "tax rule has no parseable rate or threshold — skipping"
            );
            continue;
        };

        match basis {
            TaxBasis::Rate { bps } => {
                let owed = native_cents.saturating_mul(bps) / 10_000;
                tax_due_cents = tax_due_cents.saturating_add(owed);
            }
            TaxBasis::Threshold { cents } => {
                if native_cents > cents {
                    violations.push(Violation {
                        rule_id: rule.rule_id.clone(),
                        kind: RuleKind::Tax,
                        reason: format!(
                            "{} expense of {} {} exceeds the {} allowance of {}",
                            expense.category,
                            format_amount(native_cents),
                            expense.currency,
                            rule.jurisdiction,
                            format_amount(cents),
                        ),
                        value: format_amount(native_cents),
                        limit: format_amount(cents),
                    });
                }
            }
        }
    }

    TaxAssessment {
        tax_due_cents,
        violations,
    }
}
