//! # Rule Scoping Filters
//!
//! Category and region filters shared by policy and tax rules. Both are
//! spelled `"*"` in rule files for the wildcard, or a concrete value.
//! A wildcard always matches; a concrete filter matches only its value,
//! and a region filter never matches an expense that carries no region
//! at all (that is an applicability gap, handled by skipping the rule).

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use spendguard_core::{ExpenseCategory, RegionCode};

/// The wildcard spelling in rule files.
const WILDCARD: &str = "*";

/// A rule's category filter: every category, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScope {
    /// Applies to all categories (`"*"` in rule files).
    Any,
    /// Applies to a single category.
    Only(ExpenseCategory),
}

impl CategoryScope {
    /// Whether an expense in `category` falls under this filter.
    pub fn matches(&self, category: ExpenseCategory) -> bool {
        match self {
            Self::Any => true,
            Self::Only(c) => *c == category,
        }
    }
}

impl fmt::Display for CategoryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(WILDCARD),
            Self::Only(c) => f.write_str(c.as_str()),
        }
    }
}

impl Serialize for CategoryScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CategoryScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == WILDCARD {
            return Ok(Self::Any);
        }
        raw.parse::<ExpenseCategory>()
            .map(Self::Only)
            .map_err(D::Error::custom)
    }
}

impl Default for CategoryScope {
    fn default() -> Self {
        Self::Any
    }
}

/// A rule's region / jurisdiction filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionScope {
    /// Applies in every region (`"*"` in rule files).
    Any,
    /// Applies in a single region.
    Only(RegionCode),
}

impl RegionScope {
    /// Whether an expense with the given (possibly absent) region falls
    /// under this filter.
    ///
    /// A region-scoped filter cannot match an expense that carries no
    /// region — the rule is simply not applicable, which is distinct
    /// from being violated.
    pub fn matches(&self, region: Option<&RegionCode>) -> bool {
        match self {
            Self::Any => true,
            Self::Only(r) => region == Some(r),
        }
    }
}

impl fmt::Display for RegionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str(WILDCARD),
            Self::Only(r) => f.write_str(r.as_str()),
        }
    }
}

impl Serialize for RegionScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RegionScope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == WILDCARD {
            return Ok(Self::Any);
        }
        RegionCode::new(raw).map(Self::Only).map_err(D::Error::custom)
    }
}

impl Default for RegionScope {
    fn default() -> Self {
        Self::Any
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_wildcard_matches_everything() {
        for cat in ExpenseCategory::all() {
            assert!(CategoryScope::Any.matches(*cat));
        }
    }

    #[test]
    fn category_only_matches_itself() {
        let scope = CategoryScope::Only(ExpenseCategory::Meals);
        assert!(scope.matches(ExpenseCategory::Meals));
        assert!(!scope.matches(ExpenseCategory::Lodging));
    }

    #[test]
    fn region_wildcard_matches_absent_region() {
        assert!(RegionScope::Any.matches(None));
    }

    #[test]
    fn region_only_never_matches_absent_region() {
        let scope = RegionScope::Only(RegionCode::new("DE").unwrap());
        assert!(!scope.matches(None));
        assert!(scope.matches(Some(&RegionCode::new("DE").unwrap())));
        assert!(!scope.matches(Some(&RegionCode::new("US").unwrap())));
    }

    #[test]
    fn category_scope_serde_roundtrip() {
        let any: CategoryScope = serde_json::from_str("\"*\"").unwrap();
        assert_eq!(any, CategoryScope::Any);
        assert_eq!(serde_json::to_string(&any).unwrap(), "\"*\"");

        let meals: CategoryScope = serde_json::from_str("\"meals\"").unwrap();
        assert_eq!(meals, CategoryScope::Only(ExpenseCategory::Meals));
        assert_eq!(serde_json::to_string(&meals).unwrap(), "\"meals\"");
    }

    #[test]
    fn region_scope_serde_roundtrip() {
        let any: RegionScope = serde_json::from_str("\"*\"").unwrap();
        assert_eq!(any, RegionScope::Any);

        let de: RegionScope = serde_json::from_str("\"de\"").unwrap();
        assert_eq!(de, RegionScope::Only(RegionCode::new("DE").unwrap()));
        assert_eq!(serde_json::to_string(&de).unwrap(), "\"DE\"");
    }

    #[test]
    fn scope_deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<CategoryScope>("\"petty_cash\"").is_err());
        assert!(serde_json::from_str::<RegionScope>("\"d e\"").is_err());
    }
}
