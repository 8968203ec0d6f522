//! # changeset-validator
//!
//! Field-level validation rules for changeset pipelines: temporal
//! comparisons, e-mail, URL, postal code, social security number, Luhn,
//! prefix and phone number.
//!
//! ## Quick Start
//!
//! ```
//! use changeset_validator::prelude::*;
//!
//! let engine = Engine::builtin().unwrap();
//!
//! assert!(engine.validate_luhn("740123450", &LuhnOptions::new()).is_ok());
//!
//! let fr = PostalCodeOptions::new("fr");
//! assert!(engine.validate_postal_code("69001", &fr).unwrap().is_ok());
//! assert!(engine.validate_postal_code("1", &fr).unwrap().is_err());
//! ```
//!
//! ## Failures and configuration errors
//!
//! A failed rule is data: a [`ValidationError`](foundation::ValidationError)
//! with a kind, a `%{key}` message template and the metadata to render it.
//! A [`ConfigError`](foundation::ConfigError) means the call itself was
//! wrong (unknown country under a `raise` policy, unreadable dataset,
//! mistyped field) and is the only thing that aborts a call.
//!
//! ## Layout
//!
//! - [`foundation`]: traits, errors, values and the evaluation context
//! - [`engine`]: registries, pipelines, boundaries, capabilities and the
//!   [`Engine`](engine::Engine)
//! - [`validators`]: one module per domain
//! - [`changeset`]: the field-by-field adapter
//!
//! ## Creating Validators
//!
//! Use the [`validator!`] macro for zero-boilerplate rules,
//! or implement [`Validate`](foundation::Validate) manually for complex cases.

// ValidationError is the fundamental error type for all rules; boxing it
// would add indirection to every evaluation.
#![allow(clippy::result_large_err)]

pub mod changeset;
pub mod combinators;
pub mod engine;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod validators;
