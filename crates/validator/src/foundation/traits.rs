//! Core traits for the validation system
//!
//! Every rule is a pure predicate. Rules that only look at the value
//! implement [`Validate`]; rules that resolve something from sibling fields
//! or the clock implement [`ContextualValidator`]. Every [`Validate`] is
//! also a [`ContextualValidator`] that ignores its context, so pipelines
//! can mix both.

use crate::foundation::{Outcome, ValidationContext};

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The core trait that all context-free rules implement.
///
/// Implementations must be total over `Input`: malformed but well-typed
/// input produces `Err`, never a panic.
///
/// # Examples
///
/// ```
/// use changeset_validator::foundation::{Validate, ValidationError};
///
/// struct NotBlank;
///
/// impl Validate for NotBlank {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.trim().is_empty() {
///             Err(ValidationError::new("blank", "can't be blank"))
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(NotBlank.validate("x").is_ok());
/// assert!(NotBlank.validate("  ").is_err());
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str`.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Outcome;
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Outcome {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Outcome {
        (**self).validate(input)
    }
}

// ============================================================================
// CONTEXTUAL VALIDATOR
// ============================================================================

/// A rule that may consult sibling values or the clock.
///
/// Anything resolved from the context (a dynamic boundary, a derived
/// prefix) is resolved inside `validate_with_context`, immediately before
/// comparing, and never cached across calls.
pub trait ContextualValidator {
    /// The type of input being validated.
    type Input: ?Sized;

    /// Validates the input with access to the evaluation context.
    fn validate_with_context(&self, input: &Self::Input, ctx: &ValidationContext<'_>) -> Outcome;
}

impl<V: Validate> ContextualValidator for V {
    type Input = V::Input;

    fn validate_with_context(&self, input: &Self::Input, _ctx: &ValidationContext<'_>) -> Outcome {
        self.validate(input)
    }
}

// ============================================================================
// VALIDATOR EXTENSION TRAIT
// ============================================================================

/// Extension trait providing combinator methods for validators.
///
/// Automatically implemented for every [`Validate`] type.
pub trait ValidateExt: Validate + Sized {
    /// Combines two validators with short-circuit logical AND.
    ///
    /// # Examples
    ///
    /// ```
    /// use changeset_validator::prelude::*;
    ///
    /// let rule = HasPrefix::new("private|").and(HasPrefix::new("private|id"));
    /// assert!(rule.validate("private|id-1").is_ok());
    /// assert!(rule.validate("private|x").is_err());
    /// ```
    fn and<V>(self, other: V) -> And<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        And::new(self, other)
    }
}

impl<T: Validate> ValidateExt for T {}

pub use crate::combinators::and::And;

// ============================================================================
// TESTS
// ============================================================================
