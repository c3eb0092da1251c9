//! # Expense Categories — Single Source of Truth
//!
//! Defines the [`ExpenseCategory`] enum used by expenses, policy rules,
//! and tax rules alike. Every `match` on this enum must be exhaustive —
//! adding a category forces every handler in the workspace to address it.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The spending category of a submitted expense.
///
/// Categories are the primary scoping axis for both policy caps and
/// jurisdictional tax rules. `Other` is the catch-all used by submission
/// forms for spend that fits no named category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Meals and incidental food spend.
    Meals,
    /// Hotel and other accommodation.
    Lodging,
    /// Flights, rail, taxis, mileage.
    Transportation,
    /// Client entertainment and events.
    Entertainment,
    /// Business gifts.
    Gifts,
    /// Office and travel supplies.
    Supplies,
    /// Anything that fits no named category.
    Other,
}

impl ExpenseCategory {
    /// Return the string representation of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Meals => "meals",
            Self::Lodging => "lodging",
            Self::Transportation => "transportation",
            Self::Entertainment => "entertainment",
            Self::Gifts => "gifts",
            Self::Supplies => "supplies",
            Self::Other => "other",
        }
    }

    /// Return all category variants.
    pub fn all() -> &'static [ExpenseCategory] {
        &[
            Self::Meals,
            Self::Lodging,
            Self::Transportation,
            Self::Entertainment,
            Self::Gifts,
            Self::Supplies,
            Self::Other,
        ]
    }

    /// The total number of expense categories.
    pub const COUNT: usize = 7;
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "meals" => Ok(Self::Meals),
            "lodging" => Ok(Self::Lodging),
            "transportation" => Ok(Self::Transportation),
            "entertainment" => Ok(Self::Entertainment),
            "gifts" => Ok(Self::Gifts),
            "supplies" => Ok(Self::Supplies),
            "other" => Ok(Self::Other),
            _ => Err(ValidationError::UnknownCategory {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_count_matches_all() {
        assert_eq!(ExpenseCategory::all().len(), ExpenseCategory::COUNT);
    }

    #[test]
    fn category_serde_roundtrip() {
        for cat in ExpenseCategory::all() {
            let json = serde_json::to_string(cat).unwrap();
            let parsed: ExpenseCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(*cat, parsed);
        }
    }

    #[test]
    fn category_display_matches_as_str() {
        for cat in ExpenseCategory::all() {
            assert_eq!(cat.to_string(), cat.as_str());
        }
    }

    #[test]
    fn category_from_str_roundtrip() {
        for cat in ExpenseCategory::all() {
            let parsed: ExpenseCategory = cat.as_str().parse().unwrap();
            assert_eq!(*cat, parsed);
        }
    }

    #[test]
    fn category_from_str_is_case_insensitive() {
        let parsed: ExpenseCategory = "Meals".parse().unwrap();
        assert_eq!(parsed, ExpenseCategory::Meals);
    }

    #[test]
    fn category_from_str_rejects_unknown() {
        assert!("petty_cash".parse::<ExpenseCategory>().is_err());
        assert!("".parse::<ExpenseCategory>().is_err());
    }
}
