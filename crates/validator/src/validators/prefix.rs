//! String prefix rules
//!
//! [`HasPrefix`] is the plain rule. [`PrefixedBy`] adds a separator and a
//! prefix that may be derived from sibling fields at evaluation time, e.g.
//! an identifier that must start with the record's `kind`.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::combinators::override_message;
use crate::foundation::{ContextualValidator, Outcome, Validate, ValidationContext, ValidationError};

crate::validator! {
    /// Validates that a string starts with a fixed prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use changeset_validator::foundation::Validate;
    /// use changeset_validator::validators::HasPrefix;
    ///
    /// let rule = HasPrefix::new("private|");
    /// assert!(rule.validate("private|some-id").is_ok());
    ///
    /// let error = rule.validate("public|some-id").unwrap_err();
    /// assert_eq!(error.render(), "is not prefixed by private|.");
    /// ```
    #[derive(PartialEq, Eq, Hash)]
    pub HasPrefix { prefix: String } for str;
    rule(self, input) { input.starts_with(&self.prefix) }
    error(self, input) {
        ValidationError::new("has_prefix", "is not prefixed by %{prefix}.")
            .with_param("prefix", self.prefix.clone())
    }
    new(prefix: impl Into<String>) { Self { prefix: prefix.into() } }
    fn has_prefix(prefix: impl Into<String>);
}

// ============================================================================
// DYNAMIC PREFIX
// ============================================================================

type PrefixFn = dyn Fn(&ValidationContext<'_>) -> Option<String> + Send + Sync;

/// The expected prefix: fixed, or computed from the context.
#[derive(Clone)]
pub enum Prefix {
    Literal(String),
    /// `None` means no prefix applies and the check is skipped.
    Derived(Arc<PrefixFn>),
}

impl Prefix {
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self::Derived(Arc::new(f))
    }

    /// A prefix read from a sibling string field.
    pub fn from_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::derived(move |ctx| ctx.str(&field).map(str::to_owned))
    }

    pub fn resolve(&self, ctx: &ValidationContext<'_>) -> Option<String> {
        match self {
            Self::Literal(prefix) => Some(prefix.clone()),
            Self::Derived(f) => f(ctx),
        }
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(prefix) => f.debug_tuple("Literal").field(prefix).finish(),
            Self::Derived(_) => f.write_str("Derived(<fn>)"),
        }
    }
}

impl From<&str> for Prefix {
    fn from(prefix: &str) -> Self {
        Self::Literal(prefix.to_owned())
    }
}

impl From<String> for Prefix {
    fn from(prefix: String) -> Self {
        Self::Literal(prefix)
    }
}

impl<'de> Deserialize<'de> for Prefix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::Literal)
    }
}

/// `prefix` followed by `separator`, with the prefix resolved per call.
#[derive(Debug, Clone)]
pub struct PrefixedBy {
    prefix: Prefix,
    separator: String,
}

impl PrefixedBy {
    pub fn new(prefix: impl Into<Prefix>, separator: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: separator.into(),
        }
    }
}

impl ContextualValidator for PrefixedBy {
    type Input = str;

    fn validate_with_context(&self, input: &str, ctx: &ValidationContext<'_>) -> Outcome {
        let Some(prefix) = self.prefix.resolve(ctx) else {
            return Ok(());
        };

        let expected = format!("{prefix}{}", self.separator);
        HasPrefix::new(expected).validate(input).map_err(|error| {
            error
                .with_param("prefix", prefix)
                .with_param("separator", self.separator.clone())
        })
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

/// Options of a prefix validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrefixOptions {
    pub prefix: Prefix,
    #[serde(default)]
    pub separator: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl PrefixOptions {
    pub fn new(prefix: impl Into<Prefix>) -> Self {
        Self {
            prefix: prefix.into(),
            separator: String::new(),
            message: None,
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Validates a prefixed string.
///
/// # Examples
///
/// ```
/// use changeset_validator::foundation::ValidationContext;
/// use changeset_validator::validators::prefix::{self, PrefixOptions};
///
/// let ctx = ValidationContext::new();
/// let options = PrefixOptions::new("private").separator("|");
/// assert!(prefix::validate("private|some-id", &options, &ctx).is_ok());
///
/// let options = PrefixOptions::new("private").separator("_");
/// let error = prefix::validate("private|some-id", &options, &ctx).unwrap_err();
/// assert_eq!(error.render(), "is not prefixed by private.");
/// ```
pub fn validate(value: &str, options: &PrefixOptions, ctx: &ValidationContext<'_>) -> Outcome {
    let rule = PrefixedBy {
        prefix: options.prefix.clone(),
        separator: options.separator.clone(),
    };
    override_message(rule.validate_with_context(value, ctx), options.message.as_deref())
}
