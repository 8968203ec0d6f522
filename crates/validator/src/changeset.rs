//! Changeset adapter
//!
//! A [`Changeset`] owns the submitted field values, in submission order,
//! and the failures recorded against them. Each `validate_*` method reads
//! one field, runs one domain through the [`Engine`], and records a
//! failure tagged with the field name. Sibling values are visible to
//! cross-field rules through [`Changeset::context`].
//!
//! Absent and null fields are skipped: presence is a separate concern.
//! Applying a validator to a field of the wrong type is a configuration
//! error and aborts the call.
//!
//! # Examples
//!
//! ```
//! use changeset_validator::changeset::Changeset;
//! use changeset_validator::engine::Engine;
//! use changeset_validator::validators::email::EmailOptions;
//! use changeset_validator::validators::prefix::PrefixOptions;
//!
//! let engine = Engine::builtin().unwrap();
//! let mut changeset = Changeset::new(&engine)
//!     .put("email", "@invalid_email")
//!     .put("id", "private|some-id");
//!
//! changeset
//!     .validate_email("email", &EmailOptions::new())
//!     .unwrap()
//!     .validate_prefix("id", &PrefixOptions::new("private").separator("|"))
//!     .unwrap();
//!
//! assert!(!changeset.is_valid());
//! assert_eq!(changeset.error_fields(), vec!["email"]);
//! ```

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::engine::Engine;
use crate::foundation::{ConfigError, Outcome, ValidationContext, ValidationError, ValidationErrors, Value};
use crate::validators::email::EmailOptions;
use crate::validators::luhn::LuhnOptions;
use crate::validators::phone::PhoneOptions;
use crate::validators::postal_code::PostalCodeOptions;
use crate::validators::prefix::PrefixOptions;
use crate::validators::social_security::SocialSecurityOptions;
use crate::validators::temporal::{Temporal, TemporalOptions};
use crate::validators::url::UrlOptions;

/// Field values under validation and the failures recorded so far.
#[derive(Debug)]
pub struct Changeset<'e> {
    engine: &'e Engine,
    changes: IndexMap<String, Value>,
    errors: ValidationErrors,
    now: Option<DateTime<Utc>>,
}

impl<'e> Changeset<'e> {
    #[must_use]
    pub fn new(engine: &'e Engine) -> Self {
        Self::from_changes(engine, IndexMap::new())
    }

    #[must_use]
    pub fn from_changes(engine: &'e Engine, changes: IndexMap<String, Value>) -> Self {
        Self {
            engine,
            changes,
            errors: ValidationErrors::new(),
            now: None,
        }
    }

    /// Sets a field value.
    #[must_use = "builder methods must be chained or built"]
    pub fn put(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.changes.insert(field.into(), value.into());
        self
    }

    /// Pins the current moment seen by `now`-relative rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.changes.get(field)
    }

    pub fn changes(&self) -> &IndexMap<String, Value> {
        &self.changes
    }

    /// The read-only view cross-field rules evaluate against.
    pub fn context(&self) -> ValidationContext<'_> {
        let ctx = ValidationContext::from_fields(&self.changes);
        match self.now {
            Some(now) => ctx.with_now(now),
            None => ctx,
        }
    }

    // ========================================================================
    // ERRORS
    // ========================================================================

    /// Records a failure against `field`.
    pub fn add_error(&mut self, field: impl Into<String>, error: ValidationError) -> &mut Self {
        self.errors.add(error.with_field(field.into()));
        self
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// `(field, failure)` pairs in recording order.
    pub fn field_errors(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.errors
            .errors()
            .iter()
            .map(|error| (error.field.as_deref().unwrap_or_default(), error))
    }

    /// Fields with at least one failure, in first-failure order.
    pub fn error_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for (field, _) in self.field_errors() {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }

    /// The changes when no failure was recorded, the failures otherwise.
    pub fn into_result(self) -> Result<IndexMap<String, Value>, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(self.changes)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // DOMAINS
    // ========================================================================

    pub fn validate_temporal<T: Temporal>(
        &mut self,
        field: &str,
        options: &TemporalOptions<T>,
    ) -> Result<&mut Self, ConfigError> {
        let outcome = {
            let ctx = self.context();
            match self.changes.get(field) {
                None | Some(Value::Null) => None,
                Some(value) => {
                    let typed = T::from_value(value).ok_or_else(|| mismatch(field, T::EXPECTED, value))?;
                    Some(self.engine.validate_temporal(&typed, options, &ctx))
                }
            }
        };
        Ok(self.record(field, outcome))
    }

    pub fn validate_email(&mut self, field: &str, options: &EmailOptions) -> Result<&mut Self, ConfigError> {
        let engine = self.engine;
        self.validate_str(field, |value, _| Ok(engine.validate_email(value, options)))
    }

    pub fn validate_url(&mut self, field: &str, options: &UrlOptions) -> Result<&mut Self, ConfigError> {
        let engine = self.engine;
        self.validate_str(field, |value, _| engine.validate_url(value, options))
    }

    pub fn validate_postal_code(
        &mut self,
        field: &str,
        options: &PostalCodeOptions,
    ) -> Result<&mut Self, ConfigError> {
        let engine = self.engine;
        self.validate_str(field, |value, _| engine.validate_postal_code(value, options))
    }

    pub fn validate_social_security(
        &mut self,
        field: &str,
        options: &SocialSecurityOptions,
    ) -> Result<&mut Self, ConfigError> {
        let engine = self.engine;
        self.validate_str(field, |value, _| engine.validate_social_security(value, options))
    }

    pub fn validate_luhn(&mut self, field: &str, options: &LuhnOptions) -> Result<&mut Self, ConfigError> {
        let engine = self.engine;
        self.validate_str(field, |value, _| Ok(engine.validate_luhn(value, options)))
    }

    pub fn validate_prefix(&mut self, field: &str, options: &PrefixOptions) -> Result<&mut Self, ConfigError> {
        let engine = self.engine;
        self.validate_str(field, |value, ctx| Ok(engine.validate_prefix(value, options, ctx)))
    }

    pub fn validate_phone(&mut self, field: &str, options: &PhoneOptions) -> Result<&mut Self, ConfigError> {
        let engine = self.engine;
        self.validate_str(field, |value, _| Ok(engine.validate_phone(value, options)))
    }

    // ========================================================================
    // HELPERS
    // ========================================================================

    fn validate_str<F>(&mut self, field: &str, check: F) -> Result<&mut Self, ConfigError>
    where
        F: FnOnce(&str, &ValidationContext<'_>) -> Result<Outcome, ConfigError>,
    {
        let outcome = {
            let ctx = self.context();
            match self.changes.get(field) {
                None | Some(Value::Null) => None,
                Some(Value::String(value)) => Some(check(value, &ctx)?),
                Some(other) => return Err(mismatch(field, "string", other)),
            }
        };
        Ok(self.record(field, outcome))
    }

    fn record(&mut self, field: &str, outcome: Option<Outcome>) -> &mut Self {
        if let Some(Err(error)) = outcome {
            tracing::trace!(field, code = %error.code, "field failed validation");
            self.errors.add(error.with_field(field.to_owned()));
        }
        self
    }
}

fn mismatch(field: &str, expected: &'static str, actual: &Value) -> ConfigError {
    ConfigError::TypeMismatch {
        field: field.to_owned(),
        expected,
        actual: actual.type_name(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
