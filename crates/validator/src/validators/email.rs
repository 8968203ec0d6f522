//! E-mail addresses
//!
//! Three independent checks, evaluated in the caller's order with every
//! failure collected:
//!
//! - `html_input`: the pattern browsers use for `<input type="email">`.
//! - `pow`: structural rules on both halves of the address (lengths,
//!   dot-atom or quoted local part, hostname or IP literal domain,
//!   non-numeric top-level label).
//! - `burner`: the domain is not a known disposable provider.
//!
//! The default check set is `[pow]`.

use std::net::{Ipv4Addr, Ipv6Addr};

use regex::Regex;
use serde::Deserialize;

use crate::combinators::override_message;
use crate::engine::{BurnerDomains, Patterns, Pipeline};
use crate::foundation::{Outcome, Validate, ValidationContext, ValidationError};

const MAX_LOCAL: usize = 64;
const MAX_DOMAIN: usize = 255;
const MAX_LABEL: usize = 63;

/// One named e-mail check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailCheck {
    HtmlInput,
    Pow,
    Burner,
}

impl EmailCheck {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::HtmlInput => "html_input",
            Self::Pow => "pow",
            Self::Burner => "burner",
        }
    }
}

// ============================================================================
// STRUCTURAL CHECK
// ============================================================================

/// Splits an address at its last `@`.
#[must_use]
pub fn split(address: &str) -> Option<(&str, &str)> {
    address.rsplit_once('@')
}

fn is_atext(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c)
}

fn check_local(local: &str) -> Result<(), &'static str> {
    if local.is_empty() {
        return Err("empty_local_part");
    }
    if local.len() > MAX_LOCAL {
        return Err("local_part_too_long");
    }

    if let Some(quoted) = local.strip_prefix('"').and_then(|l| l.strip_suffix('"')) {
        let mut escaped = false;
        for c in quoted.chars() {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' || !(' '..='~').contains(&c) {
                return Err("invalid_quoted_local_part");
            }
        }
        return if escaped {
            Err("invalid_quoted_local_part")
        } else {
            Ok(())
        };
    }

    if local.split('.').all(|atom| !atom.is_empty() && atom.chars().all(is_atext)) {
        Ok(())
    } else {
        Err("invalid_local_part")
    }
}

fn check_domain(domain: &str) -> Result<(), &'static str> {
    if domain.is_empty() {
        return Err("empty_domain");
    }
    if domain.len() > MAX_DOMAIN {
        return Err("domain_too_long");
    }

    if let Some(literal) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        let valid = match literal.strip_prefix("IPv6:") {
            Some(v6) => v6.parse::<Ipv6Addr>().is_ok(),
            None => literal.parse::<Ipv4Addr>().is_ok(),
        };
        return if valid { Ok(()) } else { Err("invalid_ip_literal") };
    }

    for label in domain.split('.') {
        if label.is_empty() || label.len() > MAX_LABEL {
            return Err("invalid_label_length");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err("label_hyphen");
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err("invalid_label");
        }
    }

    let tld = domain.rsplit('.').next().unwrap_or(domain);
    if tld.chars().all(|c| c.is_ascii_digit()) {
        return Err("numeric_tld");
    }

    Ok(())
}

/// Structural address rules.
///
/// # Examples
///
/// ```
/// use changeset_validator::foundation::Validate;
/// use changeset_validator::validators::email::Structure;
///
/// assert!(Structure.validate("valid.email@example.com").is_ok());
/// assert!(Structure.validate("\"john doe\"@example.com").is_ok());
/// assert!(Structure.validate("john@[127.0.0.1]").is_ok());
/// assert!(Structure.validate("@invalid_email").is_err());
/// assert!(Structure.validate("john@example.123").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Structure;

impl Validate for Structure {
    type Input = str;

    fn validate(&self, input: &str) -> Outcome {
        let verdict = match split(input) {
            Some((local, domain)) => check_local(local).and_then(|()| check_domain(domain)),
            None => Err("missing_at"),
        };

        verdict.map_err(|reason| {
            ValidationError::new("pow", "is not a well-formed address").with_param("reason", reason)
        })
    }
}

crate::validator! {
    /// The WHATWG `input[type=email]` pattern.
    pub HtmlInput { pattern: Regex } for str;
    rule(self, input) { self.pattern.is_match(input) }
    error(self, input) { ValidationError::new("html_input", "does not match the html e-mail pattern") }
}

/// Rejects addresses whose domain belongs to a disposable provider.
#[derive(Clone, Copy)]
pub struct NotBurner<'a> {
    domains: &'a dyn BurnerDomains,
}

impl<'a> NotBurner<'a> {
    pub fn new(domains: &'a dyn BurnerDomains) -> Self {
        Self { domains }
    }
}

impl std::fmt::Debug for NotBurner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NotBurner")
    }
}

impl Validate for NotBurner<'_> {
    type Input = str;

    fn validate(&self, input: &str) -> Outcome {
        let Some((_, domain)) = split(input) else {
            return Ok(());
        };

        let domain = domain.to_ascii_lowercase();
        if self.domains.is_burner(&domain) {
            Err(ValidationError::new("burner", "uses a disposable e-mail provider")
                .with_param("domain", domain))
        } else {
            Ok(())
        }
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

fn default_checks() -> Vec<EmailCheck> {
    vec![EmailCheck::Pow]
}

/// Options of an e-mail validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmailOptions {
    #[serde(default = "default_checks")]
    pub checks: Vec<EmailCheck>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Default for EmailOptions {
    fn default() -> Self {
        Self {
            checks: default_checks(),
            message: None,
        }
    }
}

impl EmailOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the check list; order is evaluation order.
    #[must_use = "builder methods must be chained or built"]
    pub fn checks(mut self, checks: impl IntoIterator<Item = EmailCheck>) -> Self {
        self.checks = checks.into_iter().collect();
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Validates an e-mail address.
///
/// On failure the returned error has kind `email` and one nested error per
/// failed check, in check order.
pub fn validate(
    value: &str,
    options: &EmailOptions,
    patterns: &Patterns,
    burners: &dyn BurnerDomains,
) -> Outcome {
    let mut pipeline = Pipeline::accumulate_all();
    for check in &options.checks {
        match check {
            EmailCheck::HtmlInput => {
                pipeline.push(check.name(), HtmlInput::new(patterns.html_email().clone()));
            }
            EmailCheck::Pow => pipeline.push(check.name(), Structure),
            EmailCheck::Burner => pipeline.push(check.name(), NotBurner::new(burners)),
        }
    }

    let outcome = pipeline
        .run(value, &ValidationContext::new())
        .map_err(|errors| errors.into_single_error("email", "is not a valid email"));
    override_message(outcome, options.message.as_deref())
}
