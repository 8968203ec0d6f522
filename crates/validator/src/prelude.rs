//! Prelude module for convenient imports.
//!
//! Provides a single `use changeset_validator::prelude::*;` import that
//! brings in the engine, the changeset adapter, every option struct and the
//! core traits.
//!
//! # Examples
//!
//! ```
//! use changeset_validator::prelude::*;
//!
//! let engine = Engine::builtin().unwrap();
//! let mut changeset = Changeset::new(&engine).put("id", "private|some-id");
//! changeset
//!     .validate_prefix("id", &PrefixOptions::new("private").separator("_"))
//!     .unwrap();
//! assert!(!changeset.is_valid());
//! ```

// ============================================================================
// FOUNDATION: Core traits, errors, values
// ============================================================================

pub use crate::foundation::{
    ConfigError, ContextualValidator, Outcome, Validate, ValidateExt, ValidationContext,
    ValidationError, ValidationErrors, Value,
};

// ============================================================================
// ENGINE
// ============================================================================

pub use crate::engine::{
    Aggregation, Boundary, BurnerDomains, CapabilityError, Engine, EngineBuilder, EngineConfig,
    HostResolver, Patterns, PhoneNumberCapability, Pipeline, Registry, UnknownKeyPolicy,
};

pub use crate::changeset::Changeset;

// ============================================================================
// VALIDATORS: Options and rules
// ============================================================================

pub use crate::validators::{
    EmailCheck, EmailOptions, HasPrefix, LuhnOptions, NumberingPlan, PhoneOptions,
    PostalCodeOptions, Prefix, PrefixOptions, SocialSecurityOptions, Temporal, TemporalOptions,
    UrlCheck, UrlOptions, has_prefix,
};

// ============================================================================
// COMBINATORS
// ============================================================================

pub use crate::combinators::{And, and, override_message};
