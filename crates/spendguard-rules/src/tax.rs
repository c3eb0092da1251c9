//! # Tax Rules
//!
//! Jurisdiction-defined rules affecting tax liability and compliance.
//! A tax rule carries exactly one basis: a percentage rate (accumulates
//! into the amount owed) or a fixed threshold (breaching it is a
//! violation). The two are mutually exclusive per rule instance and are
//! enforced as such at load time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spendguard_core::{parse_amount, parse_rate_bps, ExpenseCategory, RegionCode, RuleLoadError};

use crate::scope::{CategoryScope, RegionScope};

fn default_active() -> bool {
    true
}

/// The charging basis of a tax rule, parsed into fixed-point integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxBasis {
    /// A percentage rate in basis points; `1900` = 19%.
    Rate {
        /// Rate in basis points.
        bps: i64,
    },
    /// A per-diem / categorical allowance in cents; exceeding it is a
    /// violation.
    Threshold {
        /// Allowance in cents.
        cents: i64,
    },
}

/// A jurisdictional tax rule.
///
/// `rate_percent` and `threshold` are both optional in the wire shape so
/// that rule files stay flat records; [`TaxRule::validate`] enforces that
/// exactly one is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRule {
    /// Stable rule identifier, e.g. `"VAT-DE-LODGING"`.
    pub rule_id: String,
    /// Jurisdiction filter (`"*"` = every region).
    #[serde(default)]
    pub jurisdiction: RegionScope,
    /// Category filter (`"*"` = all categories).
    #[serde(default)]
    pub category: CategoryScope,
    /// Percentage rate as a decimal string, e.g. `"19.0"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_percent: Option<String>,
    /// Allowance threshold as a decimal string, e.g. `"150.00"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<String>,
    /// Human-readable description for audit output.
    #[serde(default)]
    pub description: String,
    /// Whether the rule is currently active.
    #[serde(default = "default_active")]
    pub active: bool,
    /// First date (inclusive) on which the rule is effective.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_from: Option<NaiveDate>,
    /// Last date (inclusive) on which the rule is effective.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_until: Option<NaiveDate>,
}

impl TaxRule {
    /// Check structural validity of a single rule.
    ///
    /// # Errors
    ///
    /// [`RuleLoadError`] naming this rule when the id is blank, both or
    /// neither basis fields are set, or the set field is unparseable or
    /// negative.
    pub fn validate(&self) -> Result<(), RuleLoadError> {
        if self.rule_id.trim().is_empty() {
            return Err(RuleLoadError::MissingRuleId);
        }
        match (&self.rate_percent, &self.threshold) {
            (Some(_), Some(_)) => Err(RuleLoadError::ConflictingTaxBasis {
                rule_id: self.rule_id.clone(),
            }),
            (None, None) => Err(RuleLoadError::MissingTaxBasis {
                rule_id: self.rule_id.clone(),
            }),
            (Some(rate), None) => {
                parse_rate_bps(rate).ok_or_else(|| RuleLoadError::UnparseableAmount {
                    rule_id: self.rule_id.clone(),
                    field: "rate_percent",
                    value: rate.clone(),
                })?;
                Ok(())
            }
            (None, Some(threshold)) => {
                let cents = parse_amount(threshold).ok_or_else(|| {
                    RuleLoadError::UnparseableAmount {
                        rule_id: self.rule_id.clone(),
                        field: "threshold",
                        value: threshold.clone(),
                    }
                })?;
                if cents < 0 {
                    return Err(RuleLoadError::NegativeAmount {
                        rule_id: self.rule_id.clone(),
                        field: "threshold",
                    });
                }
                Ok(())
            }
        }?;
        if let (Some(from), Some(until)) = (self.effective_from, self.effective_until) {
            if until < from {
                return Err(RuleLoadError::InvertedEffectiveWindow {
                    rule_id: self.rule_id.clone(),
                });
            }
        }
        Ok(())
    }

    /// The parsed charging basis.
    ///
    /// Rules in an installed snapshot have passed [`TaxRule::validate`],
    /// so `None` indicates a malformed rule that evaluation should skip
    /// rather than abort on.
    pub fn basis(&self) -> Option<TaxBasis> {
        match (&self.rate_percent, &self.threshold) {
            (Some(rate), None) => parse_rate_bps(rate).map(|bps| TaxBasis::Rate { bps }),
            (None, Some(threshold)) => parse_amount(threshold)
                .filter(|cents| *cents >= 0)
                .map(|cents| TaxBasis::Threshold { cents }),
            _ => None,
        }
    }

    /// Whether the rule is effective on the given date.
    pub fn is_effective(&self, as_of: NaiveDate) -> bool {
        self.effective_from.map_or(true, |from| as_of >= from)
            && self.effective_until.map_or(true, |until| as_of <= until)
    }

    /// Whether the rule applies to an expense with the given category and
    /// region, as of the given date.
    ///
    /// A jurisdiction-scoped rule does not apply when the expense carries
    /// no region.
    pub fn applies_to(
        &self,
        category: ExpenseCategory,
        region: Option<&RegionCode>,
        as_of: NaiveDate,
    ) -> bool {
        self.active
            && self.is_effective(as_of)
            && self.category.matches(category)
            && self.jurisdiction.matches(region)
    }
}
