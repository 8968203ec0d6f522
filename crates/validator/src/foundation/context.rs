//! Read-only evaluation context for cross-field rules.
//!
//! A [`ValidationContext`] gives a rule access to the sibling values of the
//! field under test and to the "current moment". Both are resolved lazily
//! by the rules that need them, once per evaluation.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::IndexMap;

use crate::foundation::Value;

/// Sibling values and clock available while a rule is evaluated.
///
/// # Examples
///
/// ```
/// use changeset_validator::foundation::{ValidationContext, Value};
/// use chrono::NaiveDate;
/// use indexmap::IndexMap;
///
/// let mut fields = IndexMap::new();
/// let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
/// fields.insert("start".to_string(), Value::Date(start));
///
/// let ctx = ValidationContext::from_fields(&fields);
/// assert_eq!(ctx.date("start"), Some(start));
/// assert_eq!(ctx.date("missing"), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext<'a> {
    fields: Option<&'a IndexMap<String, Value>>,
    now: Option<DateTime<Utc>>,
}

impl<'a> ValidationContext<'a> {
    /// An empty context: no siblings, wall-clock time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: None,
            now: None,
        }
    }

    /// A context exposing `fields` as sibling values.
    #[must_use]
    pub fn from_fields(fields: &'a IndexMap<String, Value>) -> Self {
        Self {
            fields: Some(fields),
            now: None,
        }
    }

    /// Pins the current moment, making `now`-relative rules deterministic.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// The current moment: the pinned instant, or the wall clock read now.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    /// The raw sibling value, `None` when absent or null.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields
            .and_then(|fields| fields.get(field))
            .filter(|v| !v.is_null())
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    #[must_use]
    pub fn str(&self, field: &str) -> Option<&'a str> {
        self.get(field).and_then(Value::as_str)
    }

    #[must_use]
    pub fn date(&self, field: &str) -> Option<NaiveDate> {
        self.get(field).and_then(Value::as_date)
    }

    #[must_use]
    pub fn time(&self, field: &str) -> Option<NaiveTime> {
        self.get(field).and_then(Value::as_time)
    }

    #[must_use]
    pub fn naive_datetime(&self, field: &str) -> Option<NaiveDateTime> {
        self.get(field).and_then(Value::as_naive_datetime)
    }

    #[must_use]
    pub fn datetime(&self, field: &str) -> Option<DateTime<Utc>> {
        self.get(field).and_then(Value::as_datetime)
    }
}
