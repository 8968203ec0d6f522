//! AND combinator - logical conjunction of validators
//!
//! This module provides the [`And`] combinator which combines two validators
//! with logical AND semantics - both validators must pass for the combined
//! validator to succeed. Composite rules such as the French social security
//! number (format, then checksum key) are built with it.
//!
//! # Examples
//!
//! ```
//! use changeset_validator::combinators::And;
//! use changeset_validator::foundation::Validate;
//! use changeset_validator::validators::HasPrefix;
//!
//! let validator = And::new(HasPrefix::new("ab"), HasPrefix::new("abc"));
//! assert!(validator.validate("abcd").is_ok());
//! assert!(validator.validate("abx").is_err());
//! ```

use crate::foundation::{Outcome, Validate};

/// Combines two validators with logical AND.
///
/// Both validators must pass for the combined validator to succeed.
/// Errors are returned from the first failing validator; the right
/// validator is never evaluated when the left one fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<L, R> {
    /// The left (first) validator.
    pub(crate) left: L,
    /// The right (second) validator.
    pub(crate) right: R,
}

impl<L, R> And<L, R> {
    /// Creates a new `And` combinator.
    pub fn new(left: L, right: R) -> Self {
        Self { left, right }
    }

    /// Returns a reference to the left validator.
    pub fn left(&self) -> &L {
        &self.left
    }

    /// Returns a reference to the right validator.
    pub fn right(&self) -> &R {
        &self.right
    }

    /// Extracts the left and right validators.
    pub fn into_parts(self) -> (L, R) {
        (self.left, self.right)
    }
}

impl<L, R> Validate for And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn validate(&self, input: &Self::Input) -> Outcome {
        self.left.validate(input)?;
        self.right.validate(input)?;
        Ok(())
    }
}

/// Creates an `And` combinator from two validators.
pub fn and<L, R>(left: L, right: R) -> And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    And::new(left, right)
}
