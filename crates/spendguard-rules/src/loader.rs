//! # Rule-File Loader
//!
//! Reads a rule collection document from disk (YAML or JSON by file
//! extension) and installs it into a [`RuleRegistry`]. The document shape
//! is two flat lists matching the wire shapes of [`PolicyRule`] and
//! [`TaxRule`]; either list may be omitted.
//!
//! The loader owns file-level failures ([`RuleFileError`]); structural
//! rule failures pass through as [`RuleLoadError`] from the registry, and
//! in both cases the previously installed snapshot remains live.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use spendguard_core::RuleLoadError;
use thiserror::Error;

use crate::policy::PolicyRule;
use crate::registry::RuleRegistry;
use crate::tax::TaxRule;

/// Errors while reading or parsing a rule file.
///
/// Each variant carries the file path — rule files are operator-edited
/// config, and a parse error without a path is undebuggable.
#[derive(Debug, Error)]
pub enum RuleFileError {
    /// The file could not be read.
    #[error("failed to read rule file {}: {source}", path.display())]
    Io {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// YAML parsing failed.
    #[error("failed to parse YAML rule file {}: {source}", path.display())]
    Yaml {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON rule file {}: {source}", path.display())]
    Json {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The file extension names no supported format.
    #[error("rule file {} has unsupported extension (expected .yaml, .yml, or .json)", path.display())]
    UnknownFormat {
        /// Path of the rejected file.
        path: PathBuf,
    },

    /// The file parsed but a rule in it is structurally invalid; the
    /// whole batch was rejected.
    #[error(transparent)]
    Invalid(#[from] RuleLoadError),
}

/// The on-disk shape of a rule collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleSetDocument {
    /// Company policy rules.
    #[serde(default)]
    pub policy_rules: Vec<PolicyRule>,
    /// Jurisdictional tax rules.
    #[serde(default)]
    pub tax_rules: Vec<TaxRule>,
}

impl RuleSetDocument {
    /// Parse a document from a file, dispatching on extension.
    pub fn from_path(path: &Path) -> Result<Self, RuleFileError> {
        let text = std::fs::read_to_string(path).map_err(|source| RuleFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&text).map_err(|source| RuleFileError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })
            }
            Some("json") => serde_json::from_str(&text).map_err(|source| RuleFileError::Json {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(RuleFileError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Parse a rule file and install it into the registry.
///
/// Returns the new snapshot version on success. On any failure the
/// registry is untouched.
pub fn load_rules_file(path: &Path, registry: &RuleRegistry) -> Result<u64, RuleFileError> {
    let document = RuleSetDocument::from_path(path)?;
    tracing::debug!(
        path = %path.display(),
        policy_rules = document.policy_rules.len(),
        tax_rules = document.tax_rules.len(),
        "parsed rule file"
    );
    let version = registry.load(document.policy_rules, document.tax_rules)?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const YAML_RULES: &str = r#"
policy_rules:
  - rule_id: CAP-MEALS-01
    name: Meals cap
    category: meals
    max_amount: "100.00"
    roles: [Staff, Manager]
tax_rules:
  - rule_id: VAT-DE-LODGING
    jurisdiction: DE
    category: lodging
    rate_percent: "19.0"
"#;

    #[test]
    fn loads_yaml_rules_into_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "rules.yaml", YAML_RULES);

        let registry = RuleRegistry::new();
        let version = load_rules_file(&path, &registry).unwrap();
        assert_eq!(version, 1);

        let snap = registry.snapshot().unwrap();
        assert_eq!(snap.policy_rules().len(), 1);
        assert_eq!(snap.tax_rules().len(), 1);
        assert_eq!(snap.policy_rules()[0].rule_id, "CAP-MEALS-01");
    }

    #[test]
    fn loads_json_rules_into_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "rules.json",
            r#"{"policy_rules": [{"rule_id": "CAP-ALL", "name": "Global cap", "max_amount": "500.00"}]}"#,
        );

        let registry = RuleRegistry::new();
        load_rules_file(&path, &registry).unwrap();
        assert_eq!(registry.snapshot().unwrap().policy_rules().len(), 1);
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "rules.yaml", "policy_rules: []\n");

        let registry = RuleRegistry::new();
        load_rules_file(&path, &registry).unwrap();
        let snap = registry.snapshot().unwrap();
        assert!(snap.policy_rules().is_empty());
        assert!(snap.tax_rules().is_empty());
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "rules.toml", "policy_rules = []");

        let registry = RuleRegistry::new();
        let err = load_rules_file(&path, &registry).unwrap_err();
        assert!(matches!(err, RuleFileError::UnknownFormat { .. }));
        assert!(!registry.is_loaded());
    }

    #[test]
    fn missing_file_is_io_error() {
        let registry = RuleRegistry::new();
        let err = load_rules_file(Path::new("/nonexistent/rules.yaml"), &registry).unwrap_err();
        assert!(matches!(err, RuleFileError::Io { .. }));
    }

    #[test]
    fn structural_failure_leaves_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_file(&dir, "good.yaml", YAML_RULES);
        let bad = write_file(
            &dir,
            "bad.yaml",
            r#"
tax_rules:
  - rule_id: VAT-BROKEN
    jurisdiction: DE
    rate_percent: "19.0"
    threshold: "10.00"
"#,
        );

        let registry = RuleRegistry::new();
        load_rules_file(&good, &registry).unwrap();

        let err = load_rules_file(&bad, &registry).unwrap_err();
        assert!(matches!(
            err,
            RuleFileError::Invalid(RuleLoadError::ConflictingTaxBasis { ref rule_id }) if rule_id == "VAT-BROKEN"
        ));
        assert_eq!(registry.snapshot().unwrap().version, 1);
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "rules.yaml", "policy_rules: [{{{");

        let registry = RuleRegistry::new();
        let err = load_rules_file(&path, &registry).unwrap_err();
        assert!(matches!(err, RuleFileError::Yaml { .. }));
    }
}
