//! Phone numbers
//!
//! Validity is decided by a [`PhoneNumberCapability`]. The built-in
//! [`NumberingPlan`] knows the calling code and national number length of a
//! small set of regions; anything else falls back to the E.164 digit count
//! (7 to 15 digits). Applications needing full carrier-grade rules plug in
//! their own capability.

use std::ops::RangeInclusive;

use serde::Deserialize;

use crate::combinators::override_message;
use crate::engine::{CapabilityError, PhoneNumberCapability};
use crate::foundation::{Outcome, Validate, ValidationError};

// ============================================================================
// NUMBERING PLAN
// ============================================================================

/// Calling code and national significant number length of one region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionPlan {
    pub region: &'static str,
    pub calling_code: &'static str,
    pub national_digits: RangeInclusive<usize>,
    /// National trunk prefix dialled before the number (`0` in most of
    /// Europe), stripped before counting digits.
    pub trunk_prefix: Option<char>,
}

const fn region_plan(
    region: &'static str,
    calling_code: &'static str,
    national_digits: RangeInclusive<usize>,
    trunk_prefix: Option<char>,
) -> RegionPlan {
    RegionPlan {
        region,
        calling_code,
        national_digits,
        trunk_prefix,
    }
}

/// Digit count accepted for numbers without a known region.
pub const E164_DIGITS: RangeInclusive<usize> = 7..=15;

/// Built-in, offline phone number capability.
///
/// # Examples
///
/// ```
/// use changeset_validator::engine::PhoneNumberCapability;
/// use changeset_validator::validators::phone::NumberingPlan;
///
/// let plan = NumberingPlan::builtin();
/// assert_eq!(plan.is_valid("+33 6 12 34 56 78", None), Ok(true));
/// assert_eq!(plan.is_valid("06 12 34 56 78", Some("fr")), Ok(true));
/// assert_eq!(plan.is_valid("06 12 34 56", Some("fr")), Ok(false));
/// ```
#[derive(Debug, Clone)]
pub struct NumberingPlan {
    regions: Vec<RegionPlan>,
}

impl NumberingPlan {
    /// The built-in region table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(vec![
            region_plan("us", "1", 10..=10, None),
            region_plan("ca", "1", 10..=10, None),
            region_plan("fr", "33", 9..=9, Some('0')),
            region_plan("gb", "44", 9..=10, Some('0')),
            region_plan("de", "49", 6..=11, Some('0')),
            region_plan("es", "34", 9..=9, None),
            region_plan("it", "39", 6..=11, None),
            region_plan("be", "32", 8..=9, Some('0')),
            region_plan("nl", "31", 9..=9, Some('0')),
            region_plan("ch", "41", 9..=9, Some('0')),
            region_plan("br", "55", 10..=11, Some('0')),
            region_plan("jp", "81", 9..=10, Some('0')),
            region_plan("au", "61", 9..=9, Some('0')),
            region_plan("in", "91", 10..=10, Some('0')),
        ])
    }

    /// A plan made of `regions`.
    #[must_use]
    pub fn new(regions: Vec<RegionPlan>) -> Self {
        Self { regions }
    }

    fn region(&self, region: &str) -> Option<&RegionPlan> {
        self.regions.iter().find(|p| p.region == region)
    }

    /// The region whose calling code prefixes `digits`, longest code first.
    fn by_calling_code(&self, digits: &str) -> Option<&RegionPlan> {
        self.regions
            .iter()
            .filter(|p| digits.starts_with(p.calling_code))
            .max_by_key(|p| p.calling_code.len())
    }
}

impl Default for NumberingPlan {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Checks separators and returns the digits, or why the input is not a
/// phone number at all.
fn extract_digits(input: &str) -> Result<String, CapabilityError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CapabilityError::Unparsable("empty".to_string()));
    }

    let allowed = |c: char| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')' | '.');
    if let Some(bad) = input.chars().find(|c| !allowed(*c)) {
        return Err(CapabilityError::Unparsable(format!("unexpected `{bad}`")));
    }

    // Plus sign can only appear at the start
    if input.rfind('+').is_some_and(|pos| pos != 0) {
        return Err(CapabilityError::Unparsable("misplaced `+`".to_string()));
    }

    let open = input.chars().filter(|&c| c == '(').count();
    let close = input.chars().filter(|&c| c == ')').count();
    if open != close {
        return Err(CapabilityError::Unparsable("unbalanced parentheses".to_string()));
    }

    Ok(input.chars().filter(char::is_ascii_digit).collect())
}

impl PhoneNumberCapability for NumberingPlan {
    fn is_valid(&self, number: &str, region: Option<&str>) -> Result<bool, CapabilityError> {
        let digits = extract_digits(number)?;
        let international = number.trim_start().starts_with('+');

        if international {
            return Ok(match self.by_calling_code(&digits) {
                Some(plan) => plan.national_digits.contains(&(digits.len() - plan.calling_code.len())),
                None => E164_DIGITS.contains(&digits.len()),
            });
        }

        match region.and_then(|r| self.region(r)) {
            Some(plan) => {
                let national = match plan.trunk_prefix {
                    Some(trunk) => digits.strip_prefix(trunk).unwrap_or(digits.as_str()),
                    None => digits.as_str(),
                };
                Ok(plan.national_digits.contains(&national.len()))
            }
            None => Ok(E164_DIGITS.contains(&digits.len())),
        }
    }
}

// ============================================================================
// RULE
// ============================================================================

/// Phone number rule backed by a capability.
#[derive(Clone, Copy)]
pub struct PhoneNumber<'a> {
    capability: &'a dyn PhoneNumberCapability,
    region: Option<&'a str>,
}

impl<'a> PhoneNumber<'a> {
    pub fn new(capability: &'a dyn PhoneNumberCapability, region: Option<&'a str>) -> Self {
        Self { capability, region }
    }
}

impl std::fmt::Debug for PhoneNumber<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhoneNumber")
            .field("region", &self.region)
            .finish()
    }
}

impl Validate for PhoneNumber<'_> {
    type Input = str;

    fn validate(&self, input: &str) -> Outcome {
        let error = || ValidationError::new("phone_number", "is not a valid phone number");

        match self.capability.is_valid(input, self.region) {
            Ok(true) => Ok(()),
            Ok(false) => Err(error()),
            Err(fault) => {
                tracing::debug!(error = %fault, "phone capability fault");
                Err(error().with_param("reason", fault.code()))
            }
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Options of a phone number validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhoneOptions {
    /// Two-letter region; empty or absent means no region.
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl PhoneOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The normalized region, `None` when absent or blank.
    #[must_use]
    pub fn region(&self) -> Option<String> {
        self.country
            .as_deref()
            .map(|c| c.trim().to_ascii_lowercase())
            .filter(|c| !c.is_empty())
    }
}

/// Validates a phone number through `capability`.
pub fn validate(capability: &dyn PhoneNumberCapability, value: &str, options: &PhoneOptions) -> Outcome {
    let region = options.region();
    let rule = PhoneNumber::new(capability, region.as_deref());
    override_message(rule.validate(value), options.message.as_deref())
}

// ============================================================================
// TESTS
// ============================================================================
