//! Postal codes, per country
//!
//! The country code selects an anchored pattern from the postal registry
//! (built from the dataset in `data/postal_codes.txt` or a file named by
//! the engine configuration). The value is trimmed and uppercased before
//! matching.
//!
//! Unknown countries follow the caller's policy and default to accepting
//! every value, which keeps unlisted countries usable but can hide a
//! mistyped country code.

use regex::Regex;
use serde::Deserialize;

use crate::combinators::override_message;
use crate::engine::{Pipeline, Registry, UnknownKeyPolicy};
use crate::foundation::{ConfigError, Outcome, ValidationContext, ValidationError};

crate::validator! {
    /// Full-string match against a compiled, anchored pattern.
    pub MatchesPattern { pattern: Regex } for str;
    rule(self, input) { self.pattern.is_match(input) }
    error(self, input) {
        ValidationError::new("format", "does not match %{pattern}")
            .with_param("pattern", self.pattern.as_str().to_owned())
    }
}

/// Options of a postal code validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostalCodeOptions {
    pub country: String,
    #[serde(default)]
    pub raise_if_unknown_country: bool,
    #[serde(default)]
    pub reject_if_unknown_country: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl PostalCodeOptions {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            raise_if_unknown_country: false,
            reject_if_unknown_country: false,
            message: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn raise_if_unknown(mut self) -> Self {
        self.raise_if_unknown_country = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn reject_if_unknown(mut self) -> Self {
        self.reject_if_unknown_country = true;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn policy(&self) -> UnknownKeyPolicy {
        UnknownKeyPolicy::from_flags(self.raise_if_unknown_country, self.reject_if_unknown_country)
    }
}

/// Trims and uppercases a postal code before matching.
#[must_use]
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Validates a postal code against `registry`.
///
/// # Examples
///
/// ```
/// use changeset_validator::engine::dataset;
/// use changeset_validator::validators::postal_code::{self, PostalCodeOptions};
///
/// let registry = dataset::load_postal_codes("fr;\\d{5}", ';').unwrap();
/// let options = PostalCodeOptions::new("FR");
///
/// assert!(postal_code::validate(&registry, "69001", &options).unwrap().is_ok());
/// assert!(postal_code::validate(&registry, "1", &options).unwrap().is_err());
/// ```
pub fn validate(
    registry: &Registry<MatchesPattern>,
    value: &str,
    options: &PostalCodeOptions,
) -> Result<Outcome, ConfigError> {
    let rule = registry.lookup(&options.country, options.policy())?;
    let normalized = normalize(value);

    let outcome = Pipeline::first_failure()
        .check("country", rule)
        .run_first(normalized.as_str(), &ValidationContext::new())
        .map_err(|cause| {
            ValidationError::new("postal_code", "is not a valid postal code")
                .with_param("country", Registry::<MatchesPattern>::normalize(&options.country))
                .with_nested(vec![cause])
        });

    Ok(override_message(outcome, options.message.as_deref()))
}
