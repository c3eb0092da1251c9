#![deny(missing_docs)]

//! # spendguard-rules — Rule Model & Registry
//!
//! The configurable half of the compliance engine: the shapes of
//! [`PolicyRule`] and [`TaxRule`], structural validation of incoming rule
//! batches, the versioned [`RuleRegistry`] snapshot store, and the
//! YAML/JSON rule-file loader.
//!
//! ## Snapshot Discipline
//!
//! Rules are never mutated after load. A new load validates the entire
//! batch first and then replaces the whole snapshot behind an `Arc` swap —
//! in-flight evaluations keep the snapshot they started with, and a failed
//! load leaves the previous snapshot in effect. See [`registry`].

pub mod loader;
pub mod policy;
pub mod registry;
pub mod scope;
pub mod tax;

pub use loader::{load_rules_file, RuleFileError, RuleSetDocument};
pub use policy::PolicyRule;
pub use registry::{RuleRegistry, RuleSnapshot};
pub use scope::{CategoryScope, RegionScope};
pub use tax::{TaxBasis, TaxRule};
