//! Discriminator registry with an explicit unknown-key policy
//!
//! A [`Registry`] maps a case-normalized discriminator (a country code, for
//! instance) to the rule that applies to it. The source tables behind a
//! registry are necessarily incomplete, so every lookup states what an
//! unknown key means through an [`UnknownKeyPolicy`].
//!
//! Registries are built once, then only read: lookups take `&self` and the
//! type is `Send + Sync` whenever the stored rules are.

use std::collections::HashMap;

use serde::Deserialize;

use crate::foundation::{ConfigError, Outcome, Validate, ValidationError};

// ============================================================================
// UNKNOWN KEY POLICY
// ============================================================================

/// What a lookup does when the discriminator has no entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownKeyPolicy {
    /// Abort the call with [`ConfigError::UnknownDiscriminator`].
    Raise,
    /// Fall back to a rule that fails every value.
    Reject,
    /// Fall back to a rule that passes every value.
    #[default]
    Accept,
}

impl UnknownKeyPolicy {
    /// Folds the two legacy boolean switches into a policy.
    ///
    /// `raise` wins over `reject`; neither means [`Accept`](Self::Accept).
    #[must_use]
    pub fn from_flags(raise: bool, reject: bool) -> Self {
        if raise {
            Self::Raise
        } else if reject {
            Self::Reject
        } else {
            Self::Accept
        }
    }
}

// ============================================================================
// LOOKUP RESULT
// ============================================================================

/// A usable rule resolved from a [`Registry`].
///
/// Fallbacks are rules too: evaluating [`Lookup::AcceptAll`] passes and
/// [`Lookup::RejectAll`] fails, so callers never special-case unknown keys.
#[derive(Debug)]
pub enum Lookup<'a, R> {
    /// The discriminator has an entry.
    Found(&'a R),
    /// Unknown discriminator under [`UnknownKeyPolicy::Accept`].
    AcceptAll,
    /// Unknown discriminator under [`UnknownKeyPolicy::Reject`].
    RejectAll,
}

impl<R> Lookup<'_, R> {
    /// Whether the discriminator resolved to a real entry.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

impl<R> Validate for Lookup<'_, R>
where
    R: Validate,
{
    type Input = R::Input;

    fn validate(&self, input: &Self::Input) -> Outcome {
        match self {
            Self::Found(rule) => rule.validate(input),
            Self::AcceptAll => Ok(()),
            Self::RejectAll => Err(ValidationError::new(
                "unknown_discriminator",
                "no rule is defined for this value",
            )),
        }
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Case-insensitive mapping from a discriminator to a rule.
///
/// # Examples
///
/// ```
/// use changeset_validator::engine::{Registry, UnknownKeyPolicy};
/// use changeset_validator::foundation::Validate;
/// use changeset_validator::validators::HasPrefix;
///
/// let mut registry = Registry::new("demo");
/// registry.insert("FR", HasPrefix::new("F"));
///
/// let rule = registry.lookup("fr", UnknownKeyPolicy::Raise).unwrap();
/// assert!(rule.validate("FOO").is_ok());
///
/// let fallback = registry.lookup("zz", UnknownKeyPolicy::Accept).unwrap();
/// assert!(fallback.validate("anything").is_ok());
/// assert!(registry.lookup("zz", UnknownKeyPolicy::Raise).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Registry<R> {
    domain: &'static str,
    entries: HashMap<String, R>,
}

impl<R> Registry<R> {
    /// Creates an empty registry for `domain` (used in diagnostics).
    #[must_use]
    pub fn new(domain: &'static str) -> Self {
        Self {
            domain,
            entries: HashMap::new(),
        }
    }

    /// The domain this registry serves.
    #[must_use]
    pub fn domain(&self) -> &'static str {
        self.domain
    }

    /// Normalizes a discriminator the way every lookup does.
    #[must_use]
    pub fn normalize(key: &str) -> String {
        key.trim().to_ascii_lowercase()
    }

    /// Inserts or replaces an entry, returning the previous rule.
    pub fn insert(&mut self, key: &str, rule: R) -> Option<R> {
        self.entries.insert(Self::normalize(key), rule)
    }

    /// Whether `key` has an entry.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&Self::normalize(key))
    }

    /// The entry for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&R> {
        self.entries.get(&Self::normalize(key))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Resolves `key` to a usable rule according to `policy`.
    ///
    /// Only [`UnknownKeyPolicy::Raise`] can fail.
    pub fn lookup(&self, key: &str, policy: UnknownKeyPolicy) -> Result<Lookup<'_, R>, ConfigError> {
        let normalized = Self::normalize(key);
        if let Some(rule) = self.entries.get(&normalized) {
            return Ok(Lookup::Found(rule));
        }

        match policy {
            UnknownKeyPolicy::Raise => Err(ConfigError::UnknownDiscriminator {
                domain: self.domain,
                key: normalized,
            }),
            UnknownKeyPolicy::Reject => {
                tracing::debug!(domain = self.domain, key = %normalized, "unknown discriminator, rejecting");
                Ok(Lookup::RejectAll)
            }
            UnknownKeyPolicy::Accept => {
                tracing::debug!(domain = self.domain, key = %normalized, "unknown discriminator, accepting");
                Ok(Lookup::AcceptAll)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
