#![deny(missing_docs)]

//! # spendguard-engine — Compliance Evaluation
//!
//! The decision-making half of Spendguard: given an expense and the
//! currently active rule snapshot, produce a complete, deterministic
//! compliance verdict — not just a boolean, but the exhaustive list of
//! breached rules plus the computed tax owed.
//!
//! ## Architecture
//!
//! ```text
//! caller ──▶ ComplianceEngine::evaluate(expense, as_of)
//!               │ validate expense          (ValidationError)
//!               │ take registry snapshot    (RegistryUnavailable)
//!               │ normalize amount once     (CurrencyConverter seam)
//!               ├──▶ policy::evaluate_policy ──▶ Vec<Violation>
//!               ├──▶ tax::evaluate_tax       ──▶ TaxAssessment
//!               └──▶ ComplianceResult
//! ```
//!
//! The two evaluators never depend on each other; only the aggregator
//! sees both. Each runs exhaustively over its applicable rules — no
//! short-circuit on the first breach, so the result enumerates every
//! simultaneous violation.
//!
//! ## Determinism
//!
//! Evaluation is a pure function of (expense, snapshot, `as_of`): rules
//! arrive pre-sorted by id from the snapshot, amounts are fixed-point
//! integers, and the result timestamp is the caller-supplied `as_of`
//! instant. Re-evaluating identical inputs yields byte-identical
//! serialized results.

pub mod convert;
pub mod engine;
pub mod policy;
pub mod tax;
pub mod violation;

pub use convert::{CurrencyConverter, FixedRateTable, IdentityConversion};
pub use engine::{ComplianceEngine, ComplianceResult};
pub use tax::TaxAssessment;
pub use violation::{RuleKind, Violation};
