//! # Violations
//!
//! The structured record of one rule being breached by one expense.
//! Violations carry the offending value and the limit as fixed-point
//! decimal strings so audit output never depends on float formatting.

use serde::{Deserialize, Serialize};

/// Which rule family produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// A company policy rule.
    Policy,
    /// A jurisdictional tax rule.
    Tax,
}

impl RuleKind {
    /// Return the string representation of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Tax => "tax",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rule breached by one expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Identifier of the breached rule.
    pub rule_id: String,
    /// Rule family.
    pub kind: RuleKind,
    /// Human-readable explanation of the breach.
    pub reason: String,
    /// The offending amount, formatted as a decimal string.
    pub value: String,
    /// The limit that was exceeded, formatted as a decimal string.
    pub limit: String,
}
