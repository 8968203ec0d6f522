//! Comparison boundaries resolved at evaluation time
//!
//! A temporal bound is either a fixed value, the current moment, or a value
//! derived from the surrounding context (a sibling field, for instance).
//! [`Boundary::resolve`] is called once per evaluation, right before the
//! comparison; nothing is cached between calls.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::foundation::ValidationContext;

// ============================================================================
// SENTINEL RESOLUTION
// ============================================================================

/// Types that can stand for "the current moment".
pub trait Sentinel: Sized {
    /// The current moment, read from the context clock.
    fn current(ctx: &ValidationContext<'_>) -> Self;
}

impl Sentinel for NaiveDate {
    fn current(ctx: &ValidationContext<'_>) -> Self {
        ctx.now().date_naive()
    }
}

impl Sentinel for NaiveTime {
    fn current(ctx: &ValidationContext<'_>) -> Self {
        ctx.now().time()
    }
}

impl Sentinel for NaiveDateTime {
    fn current(ctx: &ValidationContext<'_>) -> Self {
        ctx.now().naive_utc()
    }
}

impl Sentinel for DateTime<Utc> {
    fn current(ctx: &ValidationContext<'_>) -> Self {
        ctx.now()
    }
}

// ============================================================================
// BOUNDARY
// ============================================================================

type DeriveFn<T> = dyn Fn(&ValidationContext<'_>) -> Option<T> + Send + Sync;

/// The value a temporal check compares against.
///
/// # Examples
///
/// ```
/// use changeset_validator::engine::Boundary;
/// use changeset_validator::foundation::{ValidationContext, Value};
/// use chrono::{Days, NaiveDate};
/// use indexmap::IndexMap;
///
/// let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// let mut fields = IndexMap::new();
/// fields.insert("start".to_string(), Value::Date(start));
///
/// let boundary = Boundary::derived(|ctx| ctx.date("start")?.checked_add_days(Days::new(30)));
/// let ctx = ValidationContext::from_fields(&fields);
/// assert_eq!(boundary.resolve(&ctx), NaiveDate::from_ymd_opt(2000, 1, 31));
/// ```
pub enum Boundary<T> {
    /// A fixed value.
    Literal(T),
    /// The current moment, read when the check runs.
    Now,
    /// Computed from the context. `None` means the bound does not apply.
    Derived(Arc<DeriveFn<T>>),
}

impl<T> Boundary<T> {
    /// Wraps a function of the context.
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> Option<T> + Send + Sync + 'static,
    {
        Self::Derived(Arc::new(f))
    }

    /// Whether this boundary depends on the evaluation context.
    #[must_use]
    pub fn is_dynamic(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }
}

impl<T: Sentinel + Clone> Boundary<T> {
    /// Resolves the boundary against `ctx`.
    pub fn resolve(&self, ctx: &ValidationContext<'_>) -> Option<T> {
        match self {
            Self::Literal(value) => Some(value.clone()),
            Self::Now => Some(T::current(ctx)),
            Self::Derived(f) => f(ctx),
        }
    }
}

impl<T> From<T> for Boundary<T> {
    fn from(value: T) -> Self {
        Self::Literal(value)
    }
}

impl<T: Clone> Clone for Boundary<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Literal(value) => Self::Literal(value.clone()),
            Self::Now => Self::Now,
            Self::Derived(f) => Self::Derived(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Boundary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Now => f.write_str("Now"),
            Self::Derived(_) => f.write_str("Derived(<fn>)"),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum SentinelName {
    Now,
    UtcNow,
    UtcToday,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoundaryRepr<T> {
    Sentinel(SentinelName),
    Literal(T),
}

impl<'de, T> Deserialize<'de> for Boundary<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match BoundaryRepr::deserialize(deserializer)? {
            BoundaryRepr::Sentinel(SentinelName::Now | SentinelName::UtcNow | SentinelName::UtcToday) => {
                Self::Now
            }
            BoundaryRepr::Literal(value) => Self::Literal(value),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
