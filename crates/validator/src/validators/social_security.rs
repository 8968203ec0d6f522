//! Social security numbers, per country
//!
//! Built-in countries:
//!
//! - `fr`: the 15 character NIR. The format is checked first, then the
//!   two-digit key, which must equal `97 - (number mod 97)` over the first
//!   13 characters. Corsican departments `2A` and `2B` count as `19` and
//!   `18` for the key. Whitespace is ignored.
//! - `us`: `AAA-GG-SSSS` with optional dashes. Area `000`, `666` and
//!   `900`-`999`, group `00` and serial `0000` are never issued.

use serde::Deserialize;

use crate::combinators::override_message;
use crate::engine::{Pipeline, Registry, UnknownKeyPolicy, dataset};
use crate::foundation::{ConfigError, Outcome, Validate, ValidateExt, ValidationContext, ValidationError};
use crate::validators::postal_code::MatchesPattern;

/// A boxed per-country rule.
pub type CountryRule = Box<dyn Validate<Input = str> + Send + Sync>;

const FR_FORMAT: &str = r"[1-478]\d{2}(0[1-9]|1[0-2]|[2-9]\d)(\d{2}|2[AB])\d{6}\d{2}";
const US_FORMAT: &str = r"\d{3}-?\d{2}-?\d{4}";

crate::validator! {
    /// French NIR key: `97 - (first 13 characters mod 97)`.
    pub FrenchKey for str;
    rule(input) { french_key_matches(input) }
    error(input) { ValidationError::new("checksum", "has an invalid control key") }
}

crate::validator! {
    /// US area, group and serial number ranges.
    pub UsRanges for str;
    rule(input) { us_ranges_valid(input) }
    error(input) { ValidationError::new("range", "uses a number range that is never issued") }
}

fn french_key_matches(input: &str) -> bool {
    if input.len() != 15 || !input.is_ascii() {
        return false;
    }
    let (body, key) = input.split_at(13);

    let department = match &body[5..7] {
        "2A" => "19",
        "2B" => "18",
        other => other,
    };
    let digits = format!("{}{department}{}", &body[..5], &body[7..]);

    match (digits.parse::<u64>(), key.parse::<u64>()) {
        (Ok(number), Ok(key)) => 97 - number % 97 == key,
        _ => false,
    }
}

fn us_ranges_valid(input: &str) -> bool {
    let digits: String = input.chars().filter(|c| *c != '-').collect();
    if digits.len() != 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    let (area, rest) = digits.split_at(3);
    let (group, serial) = rest.split_at(2);
    area != "000" && area != "666" && !area.starts_with('9') && group != "00" && serial != "0000"
}

/// The built-in country table.
pub fn builtin() -> Result<Registry<CountryRule>, ConfigError> {
    let mut registry: Registry<CountryRule> = Registry::new("social_security");

    let fr = MatchesPattern::new(dataset::compile_anchored("fr", FR_FORMAT)?).and(FrenchKey);
    registry.insert("fr", Box::new(fr));

    let us = MatchesPattern::new(dataset::compile_anchored("us", US_FORMAT)?).and(UsRanges);
    registry.insert("us", Box::new(us));

    Ok(registry)
}

/// Options of a social security number validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialSecurityOptions {
    pub country: String,
    #[serde(default)]
    pub raise_if_unknown_country: bool,
    #[serde(default)]
    pub reject_if_unknown_country: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl SocialSecurityOptions {
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

/// Validates a social security number against `registry`.
///
/// # Examples
///
/// ```
/// use changeset_validator::validators::social_security::{self, SocialSecurityOptions};
///
/// let registry = social_security::builtin().unwrap();
/// let fr = SocialSecurityOptions::new("fr");
///
/// assert!(social_security::validate(&registry, "1 85 05 78 006 084 91", &fr).unwrap().is_ok());
/// assert!(social_security::validate(&registry, "1 85 05 78 006 084 92", &fr).unwrap().is_err());
/// ```
pub fn validate(
    registry: &Registry<CountryRule>,
    value: &str,
    options: &SocialSecurityOptions,
) -> Result<Outcome, ConfigError> {
    let rule = registry.lookup(&options.country, options.policy())?;
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    let outcome = Pipeline::first_failure()
        .check("country", rule)
        .run_first(compact.as_str(), &ValidationContext::new())
        .map_err(|cause| {
            ValidationError::new("social_security", "is not a valid social security number")
                .with_param("country", Registry::<CountryRule>::normalize(&options.country))
                .with_nested(vec![cause])
        });

    Ok(override_message(outcome, options.message.as_deref()))
}
