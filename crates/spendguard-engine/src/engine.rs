//! # Compliance Aggregator
//!
//! The single entry point external callers depend on. Fetches the
//! applicable rule subsets from one registry snapshot, invokes both
//! evaluators, and merges their outputs into a [`ComplianceResult`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spendguard_core::{format_amount, EngineError, Expense, ValidationError};
use spendguard_rules::RuleRegistry;

use crate::convert::CurrencyConverter;
use crate::policy::evaluate_policy;
use crate::tax::evaluate_tax;
use crate::violation::Violation;

/// The full verdict for one expense against one rule snapshot.
///
/// `policy_compliant` is true iff `policy_violations` is empty; same for
/// tax. `tax_amount_due` is a fixed-point decimal string denominated in
/// the expense's native currency ("0.00" when nothing is owed).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceResult {
    /// Whether every applicable policy rule passed.
    pub policy_compliant: bool,
    /// Policy breaches, ordered by rule id.
    pub policy_violations: Vec<Violation>,
    /// Whether every applicable tax rule passed.
    pub tax_compliant: bool,
    /// Tax threshold breaches, ordered by rule id.
    pub tax_violations: Vec<Violation>,
    /// Total tax owed, as a decimal string in `currency`.
    pub tax_amount_due: String,
    /// Currency the tax amount is denominated in (the expense's own).
    pub currency: String,
    /// The evaluation instant — the caller-supplied `as_of`, so identical
    /// inputs serialize identically.
    pub evaluated_at: DateTime<Utc>,
}

impl ComplianceResult {
    /// Whether the expense passed both rule families.
    pub fn is_compliant(&self) -> bool {
        self.policy_compliant && self.tax_compliant
    }
}

/// The compliance evaluation entry point.
///
/// Holds the rule registry and the currency-normalization seam; both are
/// shared, so one engine value serves concurrent evaluations from many
/// threads. Evaluation itself is pure and synchronous — the only shared
/// state is the registry snapshot, which is read-only once taken.
pub struct ComplianceEngine {
    registry: Arc<RuleRegistry>,
    converter: Arc<dyn CurrencyConverter>,
}

impl ComplianceEngine {
    /// Create an engine over a registry and a currency converter.
    pub fn new(registry: Arc<RuleRegistry>, converter: Arc<dyn CurrencyConverter>) -> Self {
        Self {
            registry,
            converter,
        }
    }

    /// Evaluate one expense against the current rule snapshot.
    ///
    /// `as_of` drives rule effective-window checks and is recorded as the
    /// result's `evaluated_at`, making the result a pure function of its
    /// inputs.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Validation`] — the expense is structurally
    ///   incomplete, or its currency is unknown to the converter.
    ///   Evaluation is never attempted.
    /// - [`EngineError::RegistryUnavailable`] — no snapshot has ever been
    ///   loaded. Refused rather than silently reported compliant; an
    ///   empty-but-loaded snapshot instead evaluates to fully compliant.
    pub fn evaluate(
        &self,
        expense: &Expense,
        as_of: DateTime<Utc>,
    ) -> Result<ComplianceResult, EngineError> {
        let native_cents = expense.amount_cents().map_err(EngineError::Validation)?;

        let Some(snapshot) = self.registry.snapshot() else {
            return Err(EngineError::RegistryUnavailable);
        };

        // Normalize once per expense — every policy rule compares the
        // same policy-currency amount.
        let normalized_cents = self
            .converter
            .normalize(native_cents, &expense.currency)
            .ok_or_else(|| {
                EngineError::Validation(ValidationError::UnsupportedCurrency {
                    currency: expense.currency.clone(),
                })
            })?;

        let as_of_date = as_of.date_naive();
        let policy_rules = snapshot.active_policy_rules(
            expense.category,
            expense.role.as_deref(),
            expense.region.as_ref(),
            as_of_date,
        );
        let tax_rules =
            snapshot.active_tax_rules(expense.category, expense.region.as_ref(), as_of_date);

        tracing::debug!(
            expense_id = %expense.expense_id,
            snapshot_version = snapshot.version,
            policy_rules = policy_rules.len(),
            tax_rules = tax_rules.len(),
            "evaluating expense"
        );

        let policy_violations = evaluate_policy(expense, normalized_cents, &policy_rules);
        let assessment = evaluate_tax(expense, native_cents, &tax_rules);

        Ok(ComplianceResult {
            policy_compliant: policy_violations.is_empty(),
            policy_violations,
            tax_compliant: assessment.violations.is_empty(),
            tax_violations: assessment.violations,
            tax_amount_due: format_amount(assessment.tax_due_cents),
            currency: expense.currency.clone(),
            evaluated_at: as_of,
        })
    }
}

impl std::fmt::Debug for ComplianceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceEngine")
            .field("registry_loaded", &self.registry.is_loaded())
            .field("policy_currency", &self.converter.policy_currency())
            .finish()
    }
}
