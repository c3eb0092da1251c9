#![deny(missing_docs)]

//! # spendguard-core — Foundational Types for the Spendguard Engine
//!
//! This crate defines the value types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only
//! `serde`, `serde_json`, `thiserror`, `chrono`, and `uuid` from the
//! external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Region codes are a
//!    distinct, validated type; a raw string cannot leak into a
//!    jurisdiction comparison.
//!
//! 2. **No floats in amounts.** Monetary values travel as decimal strings
//!    and are parsed into integer cents via [`parse_amount`]; rates are
//!    basis points via [`parse_rate_bps`]. Identical inputs always produce
//!    identical arithmetic, which the compliance verdict depends on.
//!
//! 3. **Single [`ExpenseCategory`] enum.** One definition, exhaustive
//!    `match` everywhere. Rule files and expenses cannot disagree about
//!    what a category is.
//!
//! 4. **Structured errors.** Every failure the engine can surface is one
//!    of the typed kinds in [`error`] — no `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod category;
pub mod error;
pub mod expense;
pub mod money;
pub mod region;

// Re-export primary types at crate root for ergonomic imports.
pub use category::ExpenseCategory;
pub use error::{EngineError, RuleLoadError, ValidationError};
pub use expense::Expense;
pub use money::{format_amount, parse_amount, parse_rate_bps};
pub use region::RegionCode;
