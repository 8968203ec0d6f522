//! Error types for validation failures and configuration mistakes
//!
//! Two families live here and they never mix:
//!
//! - [`ValidationError`] is a *failure descriptor*: the ordinary, expected
//!   result of a value not satisfying a rule. It is data, returned inside
//!   `Err` of an [`Outcome`], and carries a message template plus the
//!   metadata needed to render it.
//! - [`ConfigError`] signals a programming mistake (unknown country under a
//!   `raise` policy, malformed dataset, options applied to the wrong value
//!   type). It aborts the call.
//!
//! All string fields of [`ValidationError`] use `Cow<'static, str>` so the
//! common case of static kinds and templates does not allocate.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// The result of evaluating one rule, one pipeline or one domain validator.
///
/// `Ok(())` is a pass, `Err` carries the failure descriptor.
pub type Outcome = Result<(), ValidationError>;

/// A structured validation failure.
///
/// The `message` is a template: `%{key}` placeholders are substituted from
/// `params` by [`render`](Self::render), so callers can localize the
/// template while keeping the metadata.
///
/// # Examples
///
/// ```
/// use changeset_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("before", "should be before %{before}.")
///     .with_field("finish")
///     .with_param("before", "2020-01-01");
///
/// assert_eq!(error.render(), "should be before 2020-01-01.");
/// assert_eq!(error.param("before"), Some("2020-01-01"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Failure kind for programmatic handling and i18n.
    ///
    /// Examples: "is", "before", "email", "postal_code"
    pub code: Cow<'static, str>,

    /// Message template with `%{key}` placeholders.
    pub message: Cow<'static, str>,

    /// Field the failure belongs to, set by the changeset adapter.
    pub field: Option<Cow<'static, str>>,

    /// Ordered substitution values for the message template.
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// Per-check evidence collected by accumulate-all pipelines.
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    /// Creates a new validation error with a kind and a message template.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
            nested: Vec::new(),
        }
    }

    /// Sets the field this error belongs to.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a template parameter.
    ///
    /// A later parameter with the same key shadows earlier ones in
    /// [`param`](Self::param) lookups and rendering.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Replaces the nested errors.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested(mut self, errors: Vec<ValidationError>) -> Self {
        self.nested = errors;
        self
    }

    /// Replaces the message template, keeping kind and metadata.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Looks up a parameter value by key (last one wins).
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// Returns true if this error has nested errors.
    #[must_use]
    pub fn has_nested(&self) -> bool {
        !self.nested.is_empty()
    }

    /// Codes of the nested errors in evaluation order.
    #[must_use]
    pub fn nested_codes(&self) -> Vec<&str> {
        self.nested.iter().map(|e| e.code.as_ref()).collect()
    }

    /// Renders the message template, substituting `%{key}` placeholders.
    ///
    /// Placeholders without a matching parameter are kept verbatim.
    #[must_use]
    pub fn render(&self) -> String {
        let template = self.message.as_ref();
        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("%{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find('}') {
                Some(end) => {
                    let key = &after[..end];
                    match self.param(key) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("%{");
                            out.push_str(key);
                            out.push('}');
                        }
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Converts the error to a JSON structure.
    pub fn to_json_value(&self) -> serde_json::Value {
        use serde_json::json;

        let params: serde_json::Map<String, serde_json::Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        json!({
            "code": self.code,
            "message": self.message,
            "field": self.field,
            "params": params,
            "nested": self.nested.iter().map(ValidationError::to_json_value).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.render())?;
        } else {
            write!(f, "{}: {}", self.code, self.render())?;
        }

        if !self.nested.is_empty() {
            write!(f, " (")?;
            for (i, error) in self.nested.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", error.code, error.render())?;
            }
            write!(f, ")")?;
        }

        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// An ordered collection of validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Adds an error to the collection.
    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all errors.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Errors recorded against `field`, in insertion order.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors
            .iter()
            .filter(move |e| e.field.as_deref() == Some(field))
    }

    /// Returns the first error, consuming the collection.
    #[must_use]
    pub fn into_first(self) -> Option<ValidationError> {
        self.errors.into_iter().next()
    }

    /// Folds the collection into one domain-level error whose nested errors
    /// are the collected ones.
    pub fn into_single_error(
        self,
        code: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> ValidationError {
        ValidationError::new(code, message).with_nested(self.errors)
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// A programming or configuration mistake detected while building or
/// invoking a validator.
///
/// Unlike [`ValidationError`], this is never the expected result of bad
/// input data and always aborts the call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A discriminator has no registry entry and the policy is `raise`.
    #[error("unknown {domain} discriminator `{key}`")]
    UnknownDiscriminator { domain: &'static str, key: String },

    /// A dataset line could not be parsed.
    #[error("malformed dataset line {line}: {reason}")]
    MalformedDataset { line: usize, reason: String },

    /// A dataset declares the same key twice.
    #[error("duplicate entry `{key}` on dataset line {line}")]
    DuplicateEntry { key: String, line: usize },

    /// A pattern failed to compile.
    #[error("invalid pattern for `{key}`: {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },

    /// An option is present but cannot be honoured.
    #[error("invalid option `{option}`: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    /// A validator was applied to a field holding another value type.
    #[error("field `{field}` holds {actual}, validator expects {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A dataset file could not be read.
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Machine-readable error code for programmatic handling.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownDiscriminator { .. } => "CONFIG_UNKNOWN_DISCRIMINATOR",
            Self::MalformedDataset { .. } => "CONFIG_MALFORMED_DATASET",
            Self::DuplicateEntry { .. } => "CONFIG_DUPLICATE_ENTRY",
            Self::InvalidPattern { .. } => "CONFIG_INVALID_PATTERN",
            Self::InvalidOption { .. } => "CONFIG_INVALID_OPTION",
            Self::TypeMismatch { .. } => "CONFIG_TYPE_MISMATCH",
            Self::Io { .. } => "CONFIG_IO",
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
