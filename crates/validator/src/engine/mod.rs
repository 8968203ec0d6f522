//! Rule engine
//!
//! The pieces every domain validator is assembled from, plus the top-level
//! [`Engine`] that owns the read-only configuration they need.
//!
//! - [`Registry`]: discriminator to rule mapping with an [`UnknownKeyPolicy`]
//! - [`Pipeline`]: ordered named checks, first-failure or accumulate-all
//! - [`Boundary`]: a literal, the current moment, or a value derived from
//!   sibling fields
//! - [`dataset`]: the line-oriented postal-code table loader
//! - [`capability`]: phone numbering, disposable domains and DNS, as trait
//!   objects
//!
//! An [`Engine`] is built once (from the embedded dataset or an
//! [`EngineConfig`]) and shared by reference afterwards. Nothing in it is
//! mutable.
//!
//! # Examples
//!
//! ```
//! use changeset_validator::engine::Engine;
//! use changeset_validator::validators::email::EmailOptions;
//! use changeset_validator::validators::postal_code::PostalCodeOptions;
//!
//! let engine = Engine::builtin().unwrap();
//!
//! assert!(engine.validate_email("valid.email@example.com", &EmailOptions::new()).is_ok());
//! assert!(engine.validate_email("@invalid_email", &EmailOptions::new()).is_err());
//!
//! let fr = PostalCodeOptions::new("fr");
//! assert!(engine.validate_postal_code("69001", &fr).unwrap().is_ok());
//! ```

pub mod boundary;
pub mod capability;
pub mod dataset;
pub mod pipeline;
pub mod registry;

pub use boundary::{Boundary, Sentinel};
#[cfg(feature = "network")]
pub use capability::StdResolver;
pub use capability::{BurnerDomains, CapabilityError, HostResolver, PhoneNumberCapability, StaticBurnerList};
pub use pipeline::{Aggregation, Check, Pipeline};
pub use registry::{Lookup, Registry, UnknownKeyPolicy};

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;

use crate::foundation::{ConfigError, Outcome, ValidationContext};
use crate::validators::email::{self, EmailOptions};
use crate::validators::luhn::{self, LuhnOptions};
use crate::validators::phone::{self, NumberingPlan, PhoneOptions};
use crate::validators::postal_code::{self, MatchesPattern, PostalCodeOptions};
use crate::validators::prefix::{self, PrefixOptions};
use crate::validators::social_security::{self, CountryRule, SocialSecurityOptions};
use crate::validators::temporal::{self, Temporal, TemporalOptions};
use crate::validators::url::{self, UrlOptions};

// ============================================================================
// PATTERNS
// ============================================================================

const HTML_EMAIL: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";
const HTTP_URL: &str = r"^https?://[^\s/$.?#].[^\s]*$";

/// Fixed regexes shared by the e-mail and URL checks, compiled once.
#[derive(Debug, Clone)]
pub struct Patterns {
    html_email: Regex,
    http_url: Regex,
}

impl Patterns {
    /// Compiles the built-in patterns.
    pub fn compile() -> Result<Self, ConfigError> {
        let compile = |key: &str, source: &str| {
            Regex::new(source).map_err(|source| ConfigError::InvalidPattern {
                key: key.to_string(),
                source,
            })
        };

        Ok(Self {
            html_email: compile("html_input", HTML_EMAIL)?,
            http_url: compile("http_regexp", HTTP_URL)?,
        })
    }

    /// The WHATWG `input[type=email]` pattern.
    #[must_use]
    pub fn html_email(&self) -> &Regex {
        &self.html_email
    }

    /// `^https?://` followed by a non-blank host.
    #[must_use]
    pub fn http_url(&self) -> &Regex {
        &self.http_url
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

fn default_delimiter() -> char {
    dataset::DEFAULT_DELIMITER
}

/// Engine configuration.
///
/// # Examples
///
/// ```
/// use changeset_validator::engine::EngineConfig;
///
/// let config: EngineConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.postal_codes, None);
/// assert_eq!(config.delimiter, ';');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Postal-code dataset on disk; the embedded table when absent.
    #[serde(default)]
    pub postal_codes: Option<PathBuf>,
    /// Field delimiter of the dataset.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            postal_codes: None,
            delimiter: default_delimiter(),
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Builder for [`Engine`].
///
/// Capabilities left unset fall back to the built-in ones: the
/// [`NumberingPlan`] for phones, the [`StaticBurnerList`] for e-mail
/// domains and, with the `network` feature, the system resolver.
#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    phone: Option<Arc<dyn PhoneNumberCapability>>,
    burners: Option<Arc<dyn BurnerDomains>>,
    resolver: Option<Option<Arc<dyn HostResolver>>>,
}

impl EngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn phone_numbers(mut self, capability: impl PhoneNumberCapability + 'static) -> Self {
        self.phone = Some(Arc::new(capability));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn burner_domains(mut self, domains: impl BurnerDomains + 'static) -> Self {
        self.burners = Some(Arc::new(domains));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn host_resolver(mut self, resolver: impl HostResolver + 'static) -> Self {
        self.resolver = Some(Some(Arc::new(resolver)));
        self
    }

    /// Disables the `valid_host` URL check, even with the `network` feature.
    #[must_use = "builder methods must be chained or built"]
    pub fn without_host_resolver(mut self) -> Self {
        self.resolver = Some(None);
        self
    }

    /// Loads the datasets and compiles every pattern.
    pub fn build(self) -> Result<Engine, ConfigError> {
        let postal_codes = match &self.config.postal_codes {
            Some(path) => dataset::load_postal_codes_file(path, self.config.delimiter)?,
            None => dataset::load_postal_codes(dataset::EMBEDDED_POSTAL_CODES, self.config.delimiter)?,
        };

        Ok(Engine {
            postal_codes,
            social_security: social_security::builtin()?,
            patterns: Patterns::compile()?,
            phone: self.phone.unwrap_or_else(|| Arc::new(NumberingPlan::builtin())),
            burners: self
                .burners
                .unwrap_or_else(|| Arc::new(StaticBurnerList::builtin())),
            resolver: self.resolver.unwrap_or_else(default_resolver),
        })
    }
}

#[cfg(feature = "network")]
fn default_resolver() -> Option<Arc<dyn HostResolver>> {
    Some(Arc::new(StdResolver))
}

#[cfg(not(feature = "network"))]
fn default_resolver() -> Option<Arc<dyn HostResolver>> {
    None
}

/// Per-domain validation entry points over one immutable configuration.
pub struct Engine {
    postal_codes: Registry<MatchesPattern>,
    social_security: Registry<CountryRule>,
    patterns: Patterns,
    phone: Arc<dyn PhoneNumberCapability>,
    burners: Arc<dyn BurnerDomains>,
    resolver: Option<Arc<dyn HostResolver>>,
}

impl Engine {
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// An engine over the embedded dataset and built-in capabilities.
    pub fn builtin() -> Result<Self, ConfigError> {
        EngineBuilder::new().build()
    }

    /// An engine over the dataset `config` names.
    pub fn from_config(config: EngineConfig) -> Result<Self, ConfigError> {
        EngineBuilder::new().config(config).build()
    }

    #[must_use]
    pub fn postal_codes(&self) -> &Registry<MatchesPattern> {
        &self.postal_codes
    }

    #[must_use]
    pub fn social_security_rules(&self) -> &Registry<CountryRule> {
        &self.social_security
    }

    #[must_use]
    pub fn patterns(&self) -> &Patterns {
        &self.patterns
    }

    /// `is` / `after` / `before` against boundaries resolved in `ctx`.
    pub fn validate_temporal<T: Temporal>(
        &self,
        value: &T,
        options: &TemporalOptions<T>,
        ctx: &ValidationContext<'_>,
    ) -> Outcome {
        temporal::validate(value, options, ctx)
    }

    pub fn validate_email(&self, value: &str, options: &EmailOptions) -> Outcome {
        email::validate(value, options, &self.patterns, &*self.burners)
    }

    pub fn validate_url(&self, value: &str, options: &UrlOptions) -> Result<Outcome, ConfigError> {
        url::validate(value, options, &self.patterns, self.resolver.as_deref())
    }

    pub fn validate_postal_code(
        &self,
        value: &str,
        options: &PostalCodeOptions,
    ) -> Result<Outcome, ConfigError> {
        postal_code::validate(&self.postal_codes, value, options)
    }

    pub fn validate_social_security(
        &self,
        value: &str,
        options: &SocialSecurityOptions,
    ) -> Result<Outcome, ConfigError> {
        social_security::validate(&self.social_security, value, options)
    }

    pub fn validate_luhn(&self, value: &str, options: &LuhnOptions) -> Outcome {
        luhn::validate(value, options)
    }

    pub fn validate_prefix(
        &self,
        value: &str,
        options: &PrefixOptions,
        ctx: &ValidationContext<'_>,
    ) -> Outcome {
        prefix::validate(value, options, ctx)
    }

    pub fn validate_phone(&self, value: &str, options: &PhoneOptions) -> Outcome {
        phone::validate(&*self.phone, value, options)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("postal_codes", &self.postal_codes.len())
            .field("social_security", &self.social_security.keys())
            .field("host_resolver", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
