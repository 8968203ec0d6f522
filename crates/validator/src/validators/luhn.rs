//! Luhn (mod 10) checksum
//!
//! The value may first go through a caller-supplied transformer (mapping
//! letters to digits, for instance). The transformed string is only used
//! for the checksum; the original value is never modified. Anything that is
//! not an ASCII digit after transformation is reported as an ordinary
//! failure carrying the reason.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::combinators::override_message;
use crate::foundation::{Outcome, Validate, ValidationError};

/// Why a string could not be checksummed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LuhnError {
    #[error("no digits to check")]
    Empty,

    #[error("`{ch}` at position {position} is not a digit")]
    NonDigit { ch: char, position: usize },
}

impl LuhnError {
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::NonDigit { .. } => "non_digit",
        }
    }
}

/// Luhn sum of `digits` modulo 10.
///
/// # Examples
///
/// ```
/// use changeset_validator::validators::luhn::checksum;
///
/// assert_eq!(checksum("740123450"), Ok(0));
/// assert!(checksum("74 01").is_err());
/// ```
pub fn checksum(digits: &str) -> Result<u32, LuhnError> {
    if digits.is_empty() {
        return Err(LuhnError::Empty);
    }

    let mut sum = 0u32;
    for (offset, (position, ch)) in digits.char_indices().rev().enumerate() {
        let Some(mut digit) = ch.to_digit(10) else {
            return Err(LuhnError::NonDigit { ch, position });
        };
        if offset % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }

    Ok(sum % 10)
}

// ============================================================================
// RULE
// ============================================================================

type TransformFn = dyn Fn(&str) -> String + Send + Sync;

/// Passes when the (optionally transformed) value has a zero Luhn sum.
#[derive(Clone, Default)]
pub struct Luhn {
    transformer: Option<Arc<TransformFn>>,
}

impl Luhn {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `f` to the value before computing the checksum.
    #[must_use = "builder methods must be chained or built"]
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transformer = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for Luhn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Luhn")
            .field("transformer", &self.transformer.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl Validate for Luhn {
    type Input = str;

    fn validate(&self, input: &str) -> Outcome {
        let transformed;
        let digits = match &self.transformer {
            Some(f) => {
                transformed = f(input);
                transformed.as_str()
            }
            None => input,
        };

        let error = || ValidationError::new("luhn", "is not a valid luhn number");
        match checksum(digits) {
            Ok(0) => Ok(()),
            Ok(_) => Err(error()),
            Err(fault) => {
                tracing::debug!(reason = %fault, "luhn checksum not computable");
                Err(error().with_param("reason", fault.code()))
            }
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Options of a Luhn validation.
///
/// Only `message` can come from configuration; the transformer is code.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LuhnOptions {
    #[serde(skip)]
    pub transformer: Option<Arc<TransformFn>>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LuhnOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn transformer<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transformer = Some(Arc::new(f));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Debug for LuhnOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LuhnOptions")
            .field("transformer", &self.transformer.as_ref().map(|_| "<fn>"))
            .field("message", &self.message)
            .finish()
    }
}

/// Validates a Luhn number.
///
/// # Examples
///
/// ```
/// use changeset_validator::validators::luhn::{self, LuhnOptions};
///
/// assert!(luhn::validate("740123450", &LuhnOptions::new()).is_ok());
/// assert!(luhn::validate("7A0123450", &LuhnOptions::new()).is_err());
///
/// let options = LuhnOptions::new().transformer(|v| v.replace("7A", "74"));
/// assert!(luhn::validate("7A0123450", &options).is_ok());
/// ```
pub fn validate(value: &str, options: &LuhnOptions) -> Outcome {
    let rule = Luhn {
        transformer: options.transformer.clone(),
    };
    override_message(rule.validate(value), options.message.as_deref())
}
