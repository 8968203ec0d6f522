//! Temporal comparison rules: `is`, `after`, `before`
//!
//! One implementation covers dates, times, naive datetimes and UTC
//! datetimes through the [`Temporal`] trait. Checks run in a fixed order,
//! `is` then `after` then `before`, and the first failure wins. Absent
//! options are skipped.
//!
//! - `before` and `after` are strict: a value equal to the boundary fails.
//! - `is` passes when the distance to the boundary is at most `delta`,
//!   measured in days for dates and in seconds for every other type.
//! - Every failure carries the *resolved* boundary under the check's name,
//!   so `%{is}`, `%{before}` and `%{after}` render a concrete value.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::combinators::override_message;
use crate::engine::{Boundary, Pipeline, Sentinel};
use crate::foundation::{ContextualValidator, Outcome, ValidationContext, ValidationError, Value};

// ============================================================================
// TEMPORAL TYPES
// ============================================================================

/// A totally ordered point in time that temporal rules can compare.
pub trait Temporal: Sentinel + Copy + Ord + fmt::Display + Send + Sync + 'static {
    /// Value type name reported in mismatch diagnostics.
    const EXPECTED: &'static str;

    /// `delta` expressed in this type's natural unit.
    fn tolerance(delta: u64) -> TimeDelta;

    /// Signed distance from `other` to `self`.
    fn since(self, other: Self) -> TimeDelta;

    /// Extracts a value of this type from a changeset field.
    fn from_value(value: &Value) -> Option<Self>;
}

fn saturating(delta: u64, unit: fn(i64) -> Option<TimeDelta>) -> TimeDelta {
    i64::try_from(delta)
        .ok()
        .and_then(unit)
        .unwrap_or(TimeDelta::MAX)
}

impl Temporal for NaiveDate {
    const EXPECTED: &'static str = "date";

    fn tolerance(delta: u64) -> TimeDelta {
        saturating(delta, TimeDelta::try_days)
    }

    fn since(self, other: Self) -> TimeDelta {
        self.signed_duration_since(other)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_date()
    }
}

impl Temporal for NaiveTime {
    const EXPECTED: &'static str = "time";

    fn tolerance(delta: u64) -> TimeDelta {
        saturating(delta, TimeDelta::try_seconds)
    }

    fn since(self, other: Self) -> TimeDelta {
        self.signed_duration_since(other)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_time()
    }
}

impl Temporal for NaiveDateTime {
    const EXPECTED: &'static str = "naive_datetime";

    fn tolerance(delta: u64) -> TimeDelta {
        saturating(delta, TimeDelta::try_seconds)
    }

    fn since(self, other: Self) -> TimeDelta {
        self.signed_duration_since(other)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_naive_datetime()
    }
}

impl Temporal for DateTime<Utc> {
    const EXPECTED: &'static str = "utc_datetime";

    fn tolerance(delta: u64) -> TimeDelta {
        saturating(delta, TimeDelta::try_seconds)
    }

    fn since(self, other: Self) -> TimeDelta {
        self.signed_duration_since(other)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_datetime()
    }
}

// ============================================================================
// RULES
// ============================================================================

/// `is`: equal to the boundary, within an inclusive tolerance.
#[derive(Debug, Clone)]
pub struct IsEqual<T> {
    boundary: Boundary<T>,
    delta: u64,
}

impl<T> IsEqual<T> {
    pub fn new(boundary: impl Into<Boundary<T>>, delta: u64) -> Self {
        Self {
            boundary: boundary.into(),
            delta,
        }
    }
}

impl<T: Temporal> ContextualValidator for IsEqual<T> {
    type Input = T;

    fn validate_with_context(&self, input: &T, ctx: &ValidationContext<'_>) -> Outcome {
        let Some(bound) = self.boundary.resolve(ctx) else {
            return Ok(());
        };

        let within = if self.delta == 0 {
            input.cmp(&bound) == Ordering::Equal
        } else {
            // Sub-second remainders are dropped before comparing.
            input.since(bound).num_seconds().unsigned_abs()
                <= T::tolerance(self.delta).num_seconds().unsigned_abs()
        };

        if within {
            Ok(())
        } else {
            Err(ValidationError::new("is", "should be %{is}.").with_param("is", bound.to_string()))
        }
    }
}

/// `before`: strictly earlier than the boundary.
#[derive(Debug, Clone)]
pub struct IsBefore<T> {
    boundary: Boundary<T>,
}

impl<T> IsBefore<T> {
    pub fn new(boundary: impl Into<Boundary<T>>) -> Self {
        Self {
            boundary: boundary.into(),
        }
    }
}

impl<T: Temporal> ContextualValidator for IsBefore<T> {
    type Input = T;

    fn validate_with_context(&self, input: &T, ctx: &ValidationContext<'_>) -> Outcome {
        let Some(bound) = self.boundary.resolve(ctx) else {
            return Ok(());
        };

        match input.cmp(&bound) {
            Ordering::Less => Ok(()),
            Ordering::Equal | Ordering::Greater => Err(ValidationError::new(
                "before",
                "should be before %{before}.",
            )
            .with_param("before", bound.to_string())),
        }
    }
}

/// `after`: strictly later than the boundary.
#[derive(Debug, Clone)]
pub struct IsAfter<T> {
    boundary: Boundary<T>,
}

impl<T> IsAfter<T> {
    pub fn new(boundary: impl Into<Boundary<T>>) -> Self {
        Self {
            boundary: boundary.into(),
        }
    }
}

impl<T: Temporal> ContextualValidator for IsAfter<T> {
    type Input = T;

    fn validate_with_context(&self, input: &T, ctx: &ValidationContext<'_>) -> Outcome {
        let Some(bound) = self.boundary.resolve(ctx) else {
            return Ok(());
        };

        match input.cmp(&bound) {
            Ordering::Greater => Ok(()),
            Ordering::Equal | Ordering::Less => Err(ValidationError::new(
                "after",
                "should be after %{after}.",
            )
            .with_param("after", bound.to_string())),
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Options of a temporal validation.
///
/// # Examples
///
/// ```
/// use changeset_validator::foundation::ValidationContext;
/// use changeset_validator::validators::temporal::{self, TemporalOptions};
/// use chrono::NaiveDate;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let options = TemporalOptions::new().after(d(2020, 1, 1)).before(d(2021, 1, 1));
///
/// let ctx = ValidationContext::new();
/// assert!(temporal::validate(&d(2020, 6, 1), &options, &ctx).is_ok());
///
/// let error = temporal::validate(&d(2020, 1, 1), &options, &ctx).unwrap_err();
/// assert_eq!(error.code, "after");
/// assert_eq!(error.render(), "should be after 2020-01-01.");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemporalOptions<T> {
    #[serde(default)]
    pub is: Option<Boundary<T>>,
    #[serde(default)]
    pub after: Option<Boundary<T>>,
    #[serde(default)]
    pub before: Option<Boundary<T>>,
    /// Inclusive tolerance for `is`, in days or seconds.
    #[serde(default)]
    pub delta: u64,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Default for TemporalOptions<T> {
    fn default() -> Self {
        Self {
            is: None,
            after: None,
            before: None,
            delta: 0,
            message: None,
        }
    }
}

impl<T> TemporalOptions<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn is(mut self, boundary: impl Into<Boundary<T>>) -> Self {
        self.is = Some(boundary.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn after(mut self, boundary: impl Into<Boundary<T>>) -> Self {
        self.after = Some(boundary.into());
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn before(mut self, boundary: impl Into<Boundary<T>>) -> Self {
        self.before = Some(boundary.into());
        self
    }

    /// Inclusive tolerance of `is`, in days for dates and whole seconds
    /// otherwise. Fractions of a second in the distance are truncated, so
    /// `delta(30)` accepts a 30.5 s gap. A zero delta demands exact equality.
    #[must_use = "builder methods must be chained or built"]
    pub fn delta(mut self, delta: u64) -> Self {
        self.delta = delta;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Temporal> TemporalOptions<T> {
    /// The first-failure pipeline these options describe.
    #[must_use]
    pub fn pipeline(&self) -> Pipeline<'static, T> {
        let mut pipeline = Pipeline::first_failure();
        if let Some(boundary) = &self.is {
            pipeline.push("is", IsEqual::new(boundary.clone(), self.delta));
        }
        if let Some(boundary) = &self.after {
            pipeline.push("after", IsAfter::new(boundary.clone()));
        }
        if let Some(boundary) = &self.before {
            pipeline.push("before", IsBefore::new(boundary.clone()));
        }
        pipeline
    }
}

/// Validates a temporal value.
pub fn validate<T: Temporal>(
    value: &T,
    options: &TemporalOptions<T>,
    ctx: &ValidationContext<'_>,
) -> Outcome {
    override_message(
        options.pipeline().run_first(value, ctx),
        options.message.as_deref(),
    )
}

// ============================================================================
// TESTS
// ============================================================================
