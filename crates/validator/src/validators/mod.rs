//! Built-in validators, one module per domain
//!
//! Every module holds the rules of its domain, a serde-loadable options
//! struct and a `validate` entry point. The [`Engine`](crate::engine::Engine)
//! calls those entry points with its own registries and capabilities; they
//! can also be called directly.
//!
//! # Domains
//!
//! - **Temporal**: [`temporal`] (`is`, `before`, `after` over dates, times and
//!   datetimes)
//! - **Addresses**: [`email`], [`url`]
//! - **Per-country**: [`postal_code`], [`social_security`], [`phone`]
//! - **Checksums and shapes**: [`luhn`], [`prefix`]
//!
//! # Examples
//!
//! ```
//! use changeset_validator::foundation::ValidationContext;
//! use changeset_validator::validators::luhn::{self, LuhnOptions};
//! use changeset_validator::validators::prefix::{self, PrefixOptions};
//!
//! assert!(luhn::validate("740123450", &LuhnOptions::new()).is_ok());
//!
//! let options = PrefixOptions::new("private").separator("|");
//! assert!(prefix::validate("private|some-id", &options, &ValidationContext::new()).is_ok());
//! ```

pub mod email;
pub mod luhn;
pub mod phone;
pub mod postal_code;
pub mod prefix;
pub mod social_security;
pub mod temporal;
pub mod url;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use email::{EmailCheck, EmailOptions};
pub use luhn::{Luhn, LuhnError, LuhnOptions};
pub use phone::{NumberingPlan, PhoneNumber, PhoneOptions};
pub use postal_code::{MatchesPattern, PostalCodeOptions};
pub use prefix::{HasPrefix, Prefix, PrefixOptions, PrefixedBy, has_prefix};
pub use social_security::SocialSecurityOptions;
pub use temporal::{IsAfter, IsBefore, IsEqual, Temporal, TemporalOptions};
pub use url::{UrlCheck, UrlOptions};
