//! # Policy Rules
//!
//! Company-defined spending constraints: an amount cap scoped by
//! category, role set, region, and an optional effective-date window.
//! A rule with wildcard category, empty role set, and wildcard region is
//! a global cap.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spendguard_core::{parse_amount, ExpenseCategory, RegionCode, RuleLoadError};

use crate::scope::{CategoryScope, RegionScope};

fn default_active() -> bool {
    true
}

/// A company spending policy rule.
///
/// Amounts are decimal strings in the organization's policy currency;
/// expenses are normalized into that currency once per evaluation before
/// any cap comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Stable rule identifier, e.g. `"CAP-MEALS-01"`. Violation ordering
    /// is keyed by this id.
    pub rule_id: String,
    /// Short human-readable name.
    pub name: String,
    /// Longer description for audit output.
    #[serde(default)]
    pub description: String,
    /// Category filter (`"*"` = all categories).
    #[serde(default)]
    pub category: CategoryScope,
    /// Maximum allowed amount in the policy currency, e.g. `"200.00"`.
    pub max_amount: String,
    /// Roles this rule applies to. Empty means all roles.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Region filter (`"*"` = all regions).
    #[serde(default)]
    pub region: RegionScope,
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

impl PolicyRule {
    /// Check structural validity of a single rule.
    ///
    /// # Errors
    ///
    /// [`RuleLoadError`] naming this rule when the id is blank, the cap is
    /// missing/unparseable/negative, or the effective window is inverted.
    pub fn validate(&self) -> Result<(), RuleLoadError> {
        if self.rule_id.trim().is_empty() {
            return Err(RuleLoadError::MissingRuleId);
        }
        let cap = parse_amount(&self.max_amount).ok_or_else(|| {
            RuleLoadError::UnparseableAmount {
                rule_id: self.rule_id.clone(),
                field: "max_amount",
                value: self.max_amount.clone(),
            }
        })?;
        if cap < 0 {
            return Err(RuleLoadError::NegativeAmount {
                rule_id: self.rule_id.clone(),
                field: "max_amount",
            });
        }
        if let (Some(from), Some(until)) = (self.effective_from, self.effective_until) {
            if until < from {
                return Err(RuleLoadError::InvertedEffectiveWindow {
                    rule_id: self.rule_id.clone(),
                });
            }
        }
        Ok(())
    }

    /// The cap in integer cents, if parseable.
    ///
    /// Rules in an installed snapshot have passed [`PolicyRule::validate`],
    /// so `None` indicates a malformed rule that evaluation should skip
    /// rather than abort on.
    pub fn max_amount_cents(&self) -> Option<i64> {
        parse_amount(&self.max_amount)
    }

    /// Whether the rule is effective on the given date.
    pub fn is_effective(&self, as_of: NaiveDate) -> bool {
        self.effective_from.map_or(true, |from| as_of >= from)
            && self.effective_until.map_or(true, |until| as_of <= until)
    }

    /// Whether the rule applies to an expense with the given category,
    /// role, and region, as of the given date.
    ///
    /// A role-scoped rule does not apply when the expense carries no
    /// role; same for region. Absence of applicability is a skip, never
    /// a violation.
    pub fn applies_to(
        &self,
        category: ExpenseCategory,
        role: Option<&str>,
        region: Option<&RegionCode>,
        as_of: NaiveDate,
    ) -> bool {
        self.active
            && self.is_effective(as_of)
            && self.category.matches(category)
            && self.role_matches(role)
            && self.region.matches(region)
    }

    fn role_matches(&self, role: Option<&str>) -> bool {
        if self.roles.is_empty() {
            return true;
        }
        match role {
            Some(r) => self.roles.iter().any(|allowed| allowed == r),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn meals_cap() -> PolicyRule {
        PolicyRule {
            rule_id: "CAP-MEALS-01".into(),
            name: "Meals cap".into(),
            description: "Standard per-meal cap".into(),
            category: CategoryScope::Only(ExpenseCategory::Meals),
            max_amount: "100.00".into(),
            roles: vec!["Staff".into(), "Manager".into()],
            region: RegionScope::Any,
            active: true,
            effective_from: None,
            effective_until: None,
        }
    }

    #[test]
    fn validate_accepts_well_formed_rule() {
        assert!(meals_cap().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_id() {
        let mut rule = meals_cap();
        rule.rule_id = "  ".into();
        assert_eq!(rule.validate(), Err(RuleLoadError::MissingRuleId));
    }

    #[test]
    fn validate_rejects_unparseable_cap() {
        let mut rule = meals_cap();
        rule.max_amount = "a lot".into();
        assert!(matches!(
            rule.validate(),
            Err(RuleLoadError::UnparseableAmount { field: "max_amount", .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_cap() {
        let mut rule = meals_cap();
        rule.max_amount = "-1.00".into();
        assert!(matches!(
            rule.validate(),
            Err(RuleLoadError::NegativeAmount { field: "max_amount", .. })
        ));
    }

    #[test]
    fn validate_rejects_inverted_window() {
        let mut rule = meals_cap();
        rule.effective_from = Some(date(2026, 6, 1));
        rule.effective_until = Some(date(2026, 1, 1));
        assert!(matches!(
            rule.validate(),
            Err(RuleLoadError::InvertedEffectiveWindow { .. })
        ));
    }

    #[test]
    fn applies_to_matching_expense() {
        let rule = meals_cap();
        assert!(rule.applies_to(ExpenseCategory::Meals, Some("Staff"), None, date(2026, 3, 1)));
    }

    #[test]
    fn role_scoped_rule_skips_role_less_expense() {
        let rule = meals_cap();
        assert!(!rule.applies_to(ExpenseCategory::Meals, None, None, date(2026, 3, 1)));
    }

    #[test]
    fn empty_role_set_applies_to_all_roles() {
        let mut rule = meals_cap();
        rule.roles.clear();
        assert!(rule.applies_to(ExpenseCategory::Meals, None, None, date(2026, 3, 1)));
        assert!(rule.applies_to(
            ExpenseCategory::Meals,
            Some("Contractor"),
            None,
            date(2026, 3, 1)
        ));
    }

    #[test]
    fn inactive_rule_never_applies() {
        let mut rule = meals_cap();
        rule.active = false;
        assert!(!rule.applies_to(ExpenseCategory::Meals, Some("Staff"), None, date(2026, 3, 1)));
    }

    #[test]
    fn effective_window_bounds_are_inclusive() {
        let mut rule = meals_cap();
        rule.effective_from = Some(date(2026, 1, 1));
        rule.effective_until = Some(date(2026, 12, 31));

        assert!(rule.is_effective(date(2026, 1, 1)));
        assert!(rule.is_effective(date(2026, 12, 31)));
        assert!(!rule.is_effective(date(2025, 12, 31)));
        assert!(!rule.is_effective(date(2027, 1, 1)));
    }

    #[test]
    fn region_scoped_rule_skips_region_less_expense() {
        let mut rule = meals_cap();
        rule.region = RegionScope::Only(RegionCode::new("US").unwrap());
        assert!(!rule.applies_to(ExpenseCategory::Meals, Some("Staff"), None, date(2026, 3, 1)));
    }

    #[test]
    fn rule_file_defaults_apply() {
        // Minimal rule record: wildcard scopes, all roles, active.
        let rule: PolicyRule = serde_json::from_str(
            r#"{"rule_id": "CAP-GLOBAL", "name": "Global cap", "max_amount": "500.00"}"#,
        )
        .unwrap();
        assert_eq!(rule.category, CategoryScope::Any);
        assert_eq!(rule.region, RegionScope::Any);
        assert!(rule.roles.is_empty());
        assert!(rule.active);
        assert!(rule.applies_to(ExpenseCategory::Other, None, None, date(2026, 1, 1)));
    }
}
