//! Core validation types and traits
//!
//! This module contains the fundamental building blocks of the validation system:
//!
//! - **Traits**: `Validate`, `ContextualValidator`, `ValidateExt`
//! - **Errors**: `ValidationError` (the failure descriptor), `ValidationErrors`,
//!   `ConfigError`
//! - **Inputs**: `Value`, `ValidationContext`
//!
//! # Architecture
//!
//! ## 1. Failures are data
//!
//! A rule returns an [`Outcome`]: `Ok(())` for a pass, or a
//! [`ValidationError`] carrying a kind, a message template and the metadata
//! needed to render it. Configuration mistakes use [`ConfigError`] and are
//! the only thing allowed to abort a call.
//!
//! ```
//! use changeset_validator::foundation::ValidationError;
//!
//! let error = ValidationError::new("after", "should be after %{after}.")
//!     .with_param("after", "2020-01-01");
//! assert_eq!(error.render(), "should be after 2020-01-01.");
//! ```
//!
//! ## 2. Context is read-only
//!
//! Cross-field rules see sibling values through [`ValidationContext`]; no
//! rule can mutate the values it inspects.

// Module declarations
pub mod context;
pub mod error;
pub mod traits;
pub mod value;

// Re-export everything at the foundation level for convenience
pub use context::ValidationContext;
pub use error::{ConfigError, Outcome, ValidationError, ValidationErrors};
pub use traits::{ContextualValidator, Validate, ValidateExt};
pub use value::Value;
