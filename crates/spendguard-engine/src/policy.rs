//! # Policy Evaluation
//!
//! Applies every applicable policy rule to an expense. The amount is
//! normalized to the policy currency once, upstream of this module;
//! every rule compares the same normalized cents.

use spendguard_core::{format_amount, Expense};
use spendguard_rules::PolicyRule;

use crate::violation::{RuleKind, Violation};

/// Evaluate the amount-cap predicate for every applicable rule.
///
/// Exhaustive: every rule in `rules` is checked, never stopping at the
/// first breach, so the result enumerates all simultaneous violations.
///
/// A rule whose cap fails to parse is skipped with a warning rather than
/// aborting the evaluation; one malformed rule must not take down the
/// verdict for the rest.
///
/// `rules` arrives ordered by rule id from the registry snapshot, and the
/// output preserves that ordering.
pub fn evaluate_policy(
    expense: &Expense,
    normalized_cents: i64,
    rules: &[&PolicyRule],
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for rule in rules {
        let Some(cap_cents) = rule.max_amount_cents() else {
            tracing::warn!(
                rule_id = %rule.rule_id,
                max_amount = %rule.max_amount,
                "policy rule has unparseable max_amount — skipping"
            );
            continue;
        };

        if normalized_cents > cap_cents {
            violations.push(Violation {
                rule_id: rule.rule_id.clone(),
                kind: RuleKind::Policy,
                reason: format!(
                    "{} expense of {} exceeds the {} cap of {} ({})",
                    expense.category,
                    format_amount(normalized_cents),
                    rule.category,
                    format_amount(cap_cents),
                    rule.name,
                ),
                value: format_amount(normalized_cents),
                limit: format_amount(cap_cents),
            });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use spendguard_core::ExpenseCategory;
    use spendguard_rules::{CategoryScope, RegionScope};

    fn expense(amount: &str) -> Expense {
        Expense::new(
            amount,
            "USD",
            ExpenseCategory::Entertainment,
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        )
    }

    fn cap(id: &str, max_amount: &str) -> PolicyRule {
        PolicyRule {
            rule_id: id.into(),
            name: format!("cap {id}"),
            description: String::new(),
            category: CategoryScope::Any,
            max_amount: max_amount.into(),
            roles: Vec::new(),
            region: RegionScope::Any,
            active: true,
            effective_from: None,
            effective_until: None,
        }
    }

    #[test]
    fn under_cap_produces_no_violation() {
        let e = expense("75.00");
        let rule = cap("CAP-01", "100.00");
        assert!(evaluate_policy(&e, 7500, &[&rule]).is_empty());
    }

    #[test]
    fn amount_equal_to_cap_is_compliant() {
        let e = expense("100.00");
        let rule = cap("CAP-01", "100.00");
        assert!(evaluate_policy(&e, 10_000, &[&rule]).is_empty());
    }

    #[test]
    fn over_cap_produces_violation_with_value_and_limit() {
        let e = expense("500.00");
        let rule = cap("CAP-ALL", "200.00");
        let violations = evaluate_policy(&e, 50_000, &[&rule]);
        assert_eq!(violations.len(), 1);

        let v = &violations[0];
        assert_eq!(v.rule_id, "CAP-ALL");
        assert_eq!(v.kind, RuleKind::Policy);
        assert_eq!(v.value, "500.00");
        assert_eq!(v.limit, "200.00");
        assert!(v.reason.contains("500.00"));
        assert!(v.reason.contains("200.00"));
    }

    #[test]
    fn every_breached_rule_is_reported() {
        let e = expense("500.00");
        let a = cap("CAP-A", "100.00");
        let b = cap("CAP-B", "400.00");
        let c = cap("CAP-C", "600.00");
        let violations = evaluate_policy(&e, 50_000, &[&a, &b, &c]);

        let ids: Vec<&str> = violations.iter().map(|v| v.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["CAP-A", "CAP-B"]);
    }

    #[test]
    fn malformed_cap_is_skipped_not_fatal() {
        let e = expense("500.00");
        let mut broken = cap("CAP-BROKEN", "100.00");
        broken.max_amount = "????".into();
        let good = cap("CAP-GOOD", "100.00");

        let violations = evaluate_policy(&e, 50_000, &[&broken, &good]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, "CAP-GOOD");
    }
}
