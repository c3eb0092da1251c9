//! # Rule Registry — Versioned Copy-and-Swap Snapshots
//!
//! Holds the currently active rule set and serves read-consistent,
//! filtered views to the evaluators. The only writer is [`RuleRegistry::load`],
//! which validates the entire incoming batch, builds a fresh immutable
//! [`RuleSnapshot`], and swaps it in behind the lock — the write lock
//! spans only the version bump and pointer exchange, never validation
//! or I/O.
//! Readers clone the `Arc` and evaluate lock-free, so an in-flight
//! evaluation always observes one whole snapshot, never a mix.
//!
//! A failed load leaves the previous snapshot in effect. A registry that
//! has never successfully loaded returns `None` from [`RuleRegistry::snapshot`],
//! which callers must treat as "no verdict possible", not as "compliant".

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use spendguard_core::{ExpenseCategory, RegionCode, RuleLoadError};

use crate::policy::PolicyRule;
use crate::tax::TaxRule;

/// An immutable, versioned view of all active rules.
///
/// Both rule vectors are sorted by ascending `rule_id` at construction,
/// which is what makes downstream violation ordering deterministic.
#[derive(Debug, Clone)]
pub struct RuleSnapshot {
    /// Monotonically increasing snapshot version; bumped on every
    /// successful load.
    pub version: u64,
    /// When this snapshot was installed.
    pub loaded_at: DateTime<Utc>,
    policy_rules: Vec<PolicyRule>,
    tax_rules: Vec<TaxRule>,
}

impl RuleSnapshot {
    /// All policy rules, sorted by rule id.
    pub fn policy_rules(&self) -> &[PolicyRule] {
        &self.policy_rules
    }

    /// All tax rules, sorted by rule id.
    pub fn tax_rules(&self) -> &[TaxRule] {
        &self.tax_rules
    }

    /// The ordered subset of policy rules that are active, effective as
    /// of `as_of`, and whose category/role/region filters match.
    ///
    /// Wildcard filters always match; a role- or region-scoped rule is
    /// filtered out when the expense carries no role/region (skip, not
    /// violation).
    pub fn active_policy_rules(
        &self,
        category: ExpenseCategory,
        role: Option<&str>,
        region: Option<&RegionCode>,
        as_of: NaiveDate,
    ) -> Vec<&PolicyRule> {
        self.policy_rules
            .iter()
            .filter(|rule| rule.applies_to(category, role, region, as_of))
            .collect()
    }

    /// The ordered subset of tax rules that are active, effective as of
    /// `as_of`, and whose category/jurisdiction filters match.
    pub fn active_tax_rules(
        &self,
        category: ExpenseCategory,
        region: Option<&RegionCode>,
        as_of: NaiveDate,
    ) -> Vec<&TaxRule> {
        self.tax_rules
            .iter()
            .filter(|rule| rule.applies_to(category, region, as_of))
            .collect()
    }
}

/// The versioned, read-optimized in-memory store of active rules.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    snapshot: RwLock<Option<Arc<RuleSnapshot>>>,
}

impl RuleRegistry {
    /// Create a registry with no snapshot loaded.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(None),
        }
    }

    /// Atomically replace the active snapshot with a validated batch.
    ///
    /// Every rule is structurally validated before anything is installed;
    /// the first invalid rule rejects the entire batch and the previous
    /// snapshot stays in effect — there is no partial replacement.
    /// Returns the new snapshot version.
    ///
    /// # Errors
    ///
    /// [`RuleLoadError`] naming the offending rule.
    pub fn load(
        &self,
        policy_rules: Vec<PolicyRule>,
        tax_rules: Vec<TaxRule>,
    ) -> Result<u64, RuleLoadError> {
        for rule in &policy_rules {
            rule.validate()?;
        }
        for rule in &tax_rules {
            rule.validate()?;
        }
        check_unique_ids(policy_rules.iter().map(|r| r.rule_id.as_str()))?;
        check_unique_ids(tax_rules.iter().map(|r| r.rule_id.as_str()))?;

        let mut policy_rules = policy_rules;
        let mut tax_rules = tax_rules;
        policy_rules.sort_by(|a, b| a.rule_id.cmp(&b.rule_id));
        tax_rules.sort_by(|a, b| a.rule_id.cmp(&b.rule_id));

        let mut guard = self.snapshot.write();
        let version = guard.as_ref().map_or(1, |s| s.version + 1);
        let snapshot = Arc::new(RuleSnapshot {
            version,
            loaded_at: Utc::now(),
            policy_rules,
            tax_rules,
        });
        tracing::info!(
            version,
            policy_rules = snapshot.policy_rules.len(),
            tax_rules = snapshot.tax_rules.len(),
            "installed rule snapshot"
        );
        *guard = Some(snapshot);
        Ok(version)
    }

    /// The current snapshot, or `None` if no load has ever succeeded.
    ///
    /// An empty-but-loaded snapshot is `Some` — genuinely zero active
    /// rules legitimately means everything is compliant, which is a
    /// different situation from an unavailable registry.
    pub fn snapshot(&self) -> Option<Arc<RuleSnapshot>> {
        self.snapshot.read().clone()
    }

    /// Whether any snapshot has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.snapshot.read().is_some()
    }
}

fn check_unique_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Result<(), RuleLoadError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(RuleLoadError::DuplicateRuleId {
                rule_id: id.to_string(),
            });
        }
    }
    Ok(())
}
