//! Country entity - one directory entry as seen by the shortlist.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::common::{non_blank, UNKNOWN};
use crate::error::DomainError;
use crate::value_objects::CountryName;

/// A country as listed by the directory service.
///
/// The common name is the identity: two countries are equal iff their
/// common names are equal (case-sensitive). The remaining fields are display
/// attributes and never take part in comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Country {
    common_name: CountryName,
    official_name: String,
    #[serde(default = "unknown")]
    capital: String,
    #[serde(default = "unknown")]
    currency_name: String,
}

fn unknown() -> String {
    UNKNOWN.to_string()
}

impl Country {
    /// Creates a country whose official name mirrors the common name and whose
    /// capital and currency are unknown.
    pub fn new(common_name: CountryName) -> Self {
        Self {
            official_name: common_name.as_str().to_string(),
            common_name,
            capital: unknown(),
            currency_name: unknown(),
        }
    }

    /// Convenience constructor validating the common name.
    pub fn named(common_name: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self::new(CountryName::new(common_name)?))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn common_name(&self) -> &CountryName {
        &self.common_name
    }

    #[inline]
    pub fn official_name(&self) -> &str {
        &self.official_name
    }

    #[inline]
    pub fn capital(&self) -> &str {
        &self.capital
    }

    #[inline]
    pub fn currency_name(&self) -> &str {
        &self.currency_name
    }

    /// Exact, case-sensitive identity check against a raw name.
    #[inline]
    pub fn is_named(&self, name: &str) -> bool {
        self.common_name == name
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Blank values keep the common name.
    pub fn with_official_name(mut self, official_name: &str) -> Self {
        if let Some(name) = non_blank(official_name) {
            self.official_name = name.to_string();
        }
        self
    }

    /// Blank values fall back to [`UNKNOWN`].
    pub fn with_capital(mut self, capital: &str) -> Self {
        self.capital = non_blank(capital).unwrap_or(UNKNOWN).to_string();
        self
    }

    /// Blank values fall back to [`UNKNOWN`].
    pub fn with_currency_name(mut self, currency_name: &str) -> Self {
        self.currency_name = non_blank(currency_name).unwrap_or(UNKNOWN).to_string();
        self
    }
}

impl PartialEq for Country {
    fn eq(&self, other: &Self) -> bool {
        self.common_name == other.common_name
    }
}

impl Eq for Country {}

impl Hash for Country {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common_name.hash(state);
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.common_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn egypt() -> Country {
        Country::named("Egypt")
            .unwrap()
            .with_official_name("Arab Republic of Egypt")
            .with_capital("Cairo")
            .with_currency_name("Egyptian pound")
    }

    #[test]
    fn new_defaults_to_unknown_attributes() {
        let country = Country::named("Antarctica").unwrap();
        assert_eq!(country.official_name(), "Antarctica");
        assert_eq!(country.capital(), UNKNOWN);
        assert_eq!(country.currency_name(), UNKNOWN);
    }

    #[test]
    fn builder_sets_attributes() {
        let country = egypt();
        assert_eq!(country.common_name().as_str(), "Egypt");
        assert_eq!(country.official_name(), "Arab Republic of Egypt");
        assert_eq!(country.capital(), "Cairo");
        assert_eq!(country.currency_name(), "Egyptian pound");
    }

    #[test]
    fn blank_attributes_fall_back() {
        let country = Country::named("Nowhere")
            .unwrap()
            .with_official_name(" ")
            .with_capital("")
            .with_currency_name("  ");
        assert_eq!(country.official_name(), "Nowhere");
        assert_eq!(country.capital(), UNKNOWN);
        assert_eq!(country.currency_name(), UNKNOWN);
    }

    #[test]
    fn equality_uses_common_name_only() {
        let a = egypt();
        let b = Country::named("Egypt").unwrap().with_capital("Alexandria");
        let c = Country::named("egypt").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.is_named("Egypt"));
        assert!(!a.is_named("EGYPT"));
    }

    #[test]
    fn deserializing_fills_missing_attributes() {
        let json = r#"{"common_name":"Japan","official_name":"Japan"}"#;
        let country: Country = serde_json::from_str(json).unwrap();
        assert_eq!(country.capital(), UNKNOWN);
        assert_eq!(country.currency_name(), UNKNOWN);
    }

    #[test]
    fn deserializing_rejects_blank_common_name() {
        let json = r#"{"common_name":" ","official_name":"x","capital":"y","currency_name":"z"}"#;
        assert!(serde_json::from_str::<Country>(json).is_err());
    }
}
