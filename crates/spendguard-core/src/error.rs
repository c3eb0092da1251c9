//! # Error Hierarchy
//!
//! Structured error types for the compliance engine, built with
//! `thiserror`. Every failure the engine surfaces is one of these kinds;
//! "rule not applicable" is never an error — it is plain filtering inside
//! the evaluators.
//!
//! The split matters downstream: a [`ValidationError`] means the expense
//! itself is unusable (caller's input problem), a [`RuleLoadError`] means
//! an incoming rule batch was rejected (config loader's problem, previous
//! snapshot stays live), and [`EngineError::RegistryUnavailable`] means
//! no verdict can be trusted because no rule snapshot was ever installed.

use thiserror::Error;

/// The expense record is structurally incomplete or uninterpretable.
///
/// Surfaced before any rule is evaluated — a malformed expense gets no
/// verdict at all, it gets rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The amount field is absent or blank.
    #[error("expense amount is missing")]
    MissingAmount,

    /// The amount is present but not a decimal number.
    #[error("expense amount {value:?} is not a valid decimal amount")]
    UnparseableAmount {
        /// The string that failed to parse.
        value: String,
    },

    /// The amount parses but is below zero.
    #[error("expense amount {value:?} is negative")]
    NegativeAmount {
        /// The offending amount string.
        value: String,
    },

    /// The currency code is absent or blank.
    #[error("expense currency is missing")]
    MissingCurrency,

    /// The currency is not known to the configured currency converter,
    /// so the amount cannot be normalized for policy comparison.
    #[error("currency {currency:?} is not supported by the configured conversion table")]
    UnsupportedCurrency {
        /// The unrecognized currency code.
        currency: String,
    },

    /// The category string names no known expense category.
    #[error("unknown expense category {value:?}")]
    UnknownCategory {
        /// The string that failed to parse.
        value: String,
    },

    /// The region code fails format validation.
    #[error("invalid region code {value:?} (expected 2-12 uppercase letters, digits, or hyphens)")]
    InvalidRegion {
        /// The string that failed validation.
        value: String,
    },
}

/// A rule in an incoming batch is structurally invalid.
///
/// The entire batch load is rejected and the previous snapshot remains
/// active; the error names the offending rule so the config author can
/// find it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleLoadError {
    /// A rule has an empty identifier.
    #[error("rule is missing an identifier")]
    MissingRuleId,

    /// Two rules in the same collection share an identifier, which would
    /// make deterministic violation ordering ambiguous.
    #[error("duplicate rule id {rule_id:?} in batch")]
    DuplicateRuleId {
        /// The identifier that appears more than once.
        rule_id: String,
    },

    /// An amount field on a rule is not a valid decimal.
    #[error("rule {rule_id:?}: {field} {value:?} is not a valid decimal amount")]
    UnparseableAmount {
        /// The offending rule's identifier.
        rule_id: String,
        /// Which field failed (`max_amount`, `rate_percent`, `threshold`).
        field: &'static str,
        /// The string that failed to parse.
        value: String,
    },

    /// An amount field on a rule is negative.
    #[error("rule {rule_id:?}: {field} must not be negative")]
    NegativeAmount {
        /// The offending rule's identifier.
        rule_id: String,
        /// Which field was negative.
        field: &'static str,
    },

    /// A tax rule specifies both a rate and a threshold; the two are
    /// mutually exclusive per rule instance.
    #[error("tax rule {rule_id:?} sets both rate_percent and threshold")]
    ConflictingTaxBasis {
        /// The offending rule's identifier.
        rule_id: String,
    },

    /// A tax rule specifies neither a rate nor a threshold.
    #[error("tax rule {rule_id:?} sets neither rate_percent nor threshold")]
    MissingTaxBasis {
        /// The offending rule's identifier.
        rule_id: String,
    },

    /// A rule's effective window ends before it starts.
    #[error("rule {rule_id:?}: effective_until precedes effective_from")]
    InvertedEffectiveWindow {
        /// The offending rule's identifier.
        rule_id: String,
    },
}

/// Top-level error type for the evaluation entry point.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The submitted expense failed validation; evaluation was never
    /// attempted.
    #[error("expense validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No rule snapshot has ever been loaded. An unavailable registry
    /// must not read as "compliant", so evaluation is refused.
    #[error("rule registry has no loaded snapshot; evaluation refused")]
    RegistryUnavailable,
}
