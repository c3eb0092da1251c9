//! # spendguard-cli — CLI Wrapper for the Compliance Engine
//!
//! A thin shell around the engine: parse arguments, load a rule file into
//! a registry, construct an `Expense`, call the aggregator, print the
//! serialized `ComplianceResult`. No compliance logic lives here.
//!
//! ## Subcommands
//!
//! - `spendguard evaluate` — evaluate one expense against a rule file.
//! - `spendguard rules` — structurally validate a rule file.
//!
//! ```bash
//! spendguard evaluate --rules policies.yaml \
//!     --amount 500.00 --currency USD --category entertainment \
//!     --role Staff --region US
//! spendguard rules policies.yaml
//! ```

pub mod evaluate;
pub mod rules;
