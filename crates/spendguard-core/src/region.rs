//! # Region Codes
//!
//! Validated newtype for travel regions and tax jurisdictions. A region
//! code is an ISO 3166-style or zone-specific identifier such as `US`,
//! `DE`, or `UK-LON`.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A region / jurisdiction code.
///
/// # Validation
///
/// 2 to 12 characters; ASCII uppercase letters, digits, and hyphens;
/// must start with a letter. Lowercase input is accepted and folded to
/// uppercase so `"de"` and `"DE"` name the same jurisdiction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionCode(String);

impl RegionCode {
    /// Create a region code, validating and upper-casing the input.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRegion`] if the string is empty,
    /// too long, or contains characters outside `[A-Z0-9-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let code = raw.trim().to_ascii_uppercase();
        let starts_with_letter = code.chars().next().is_some_and(|c| c.is_ascii_uppercase());
        let well_formed = code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');
        if code.len() < 2 || code.len() > 12 || !starts_with_letter || !well_formed {
            return Err(ValidationError::InvalidRegion { value: raw });
        }
        Ok(Self(code))
    }

    /// Access the region code string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RegionCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_code_valid() {
        let r = RegionCode::new("DE").unwrap();
        assert_eq!(r.as_str(), "DE");
    }

    #[test]
    fn region_code_folds_case() {
        assert_eq!(RegionCode::new("us").unwrap(), RegionCode::new("US").unwrap());
    }

    #[test]
    fn region_code_accepts_zone_suffix() {
        assert_eq!(RegionCode::new("UK-LON").unwrap().as_str(), "UK-LON");
    }

    #[test]
    fn region_code_rejects_empty_and_short() {
        assert!(RegionCode::new("").is_err());
        assert!(RegionCode::new("  ").is_err());
        assert!(RegionCode::new("D").is_err());
    }

    #[test]
    fn region_code_rejects_bad_characters() {
        assert!(RegionCode::new("D E").is_err());
        assert!(RegionCode::new("DE_1").is_err());
        assert!(RegionCode::new("1DE").is_err());
    }

    #[test]
    fn region_code_rejects_overlong() {
        assert!(RegionCode::new("ABCDEFGHIJKLM").is_err());
    }
}
