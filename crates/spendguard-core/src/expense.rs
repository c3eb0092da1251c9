//! # Expense Records
//!
//! The immutable input to compliance evaluation. Expenses are constructed
//! by external collaborators (submission API, CLI) and handed to the
//! engine by reference for the duration of one evaluation; the engine
//! neither mutates nor persists them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::ExpenseCategory;
use crate::error::ValidationError;
use crate::money::parse_amount;
use crate::region::RegionCode;

/// A single submitted spending record subject to compliance evaluation.
///
/// The amount is a decimal string (no floats — see [`crate::money`]);
/// role and region are optional because not every submission carries
/// them, and rules scoped to an absent field simply do not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique expense identifier.
    pub expense_id: Uuid,
    /// Decimal amount string, e.g. `"75.00"`.
    pub amount: String,
    /// ISO 4217 currency code, e.g. `"USD"`.
    pub currency: String,
    /// Spending category.
    pub category: ExpenseCategory,
    /// The date the spend occurred (not the submission date).
    pub expense_date: NaiveDate,
    /// Submitting employee's role or level, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Travel location / region code, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionCode>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl Expense {
    /// Create an expense with the required fields.
    pub fn new(
        amount: impl Into<String>,
        currency: impl Into<String>,
        category: ExpenseCategory,
        expense_date: NaiveDate,
    ) -> Self {
        Self {
            expense_id: Uuid::new_v4(),
            amount: amount.into(),
            currency: currency.into(),
            category,
            expense_date,
            role: None,
            region: None,
            description: String::new(),
        }
    }

    /// Builder: set the submitting employee's role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Builder: set the travel region.
    pub fn with_region(mut self, region: RegionCode) -> Self {
        self.region = Some(region);
        self
    }

    /// Builder: set the free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: pin the expense identifier (tests, replay from storage).
    pub fn with_expense_id(mut self, expense_id: Uuid) -> Self {
        self.expense_id = expense_id;
        self
    }

    /// Check structural validity: amount and currency must both be
    /// present and interpretable before any rule can apply meaningfully.
    ///
    /// Absence is a validation failure, never a policy violation.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingAmount`], [`ValidationError::UnparseableAmount`],
    /// [`ValidationError::NegativeAmount`], or [`ValidationError::MissingCurrency`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.amount_cents()?;
        Ok(())
    }

    /// Parse the amount into integer cents, applying the same checks as
    /// [`Expense::validate`].
    pub fn amount_cents(&self) -> Result<i64, ValidationError> {
        if self.amount.trim().is_empty() {
            return Err(ValidationError::MissingAmount);
        }
        let cents = parse_amount(&self.amount).ok_or_else(|| {
            ValidationError::UnparseableAmount {
                value: self.amount.clone(),
            }
        })?;
        if cents < 0 {
            return Err(ValidationError::NegativeAmount {
                value: self.amount.clone(),
            });
        }
        if self.currency.trim().is_empty() {
            return Err(ValidationError::MissingCurrency);
        }
        Ok(cents)
    }
}
