//! Ordered check pipeline
//!
//! A [`Pipeline`] runs an ordered list of named checks against one value.
//! Evaluation order is exactly insertion order; it is part of the contract,
//! not an implementation detail.
//!
//! Two aggregation modes exist:
//!
//! - [`Aggregation::FirstFailure`]: stop at, and report only, the first
//!   failing check. Used by strictness ladders (temporal bounds, checksums,
//!   per-country patterns).
//! - [`Aggregation::AccumulateAll`]: evaluate every check and report every
//!   failure, in order. Used when checks are independent axes (URL scheme
//!   vs host vs emptiness).
//!
//! An empty pipeline always passes.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::{ContextualValidator, Outcome, ValidationContext, ValidationErrors};

/// How a pipeline combines check failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Aggregation {
    /// Return the first failure; later checks are never evaluated.
    #[default]
    FirstFailure,
    /// Evaluate every check and return all failures.
    AccumulateAll,
}

/// One named entry of a pipeline.
pub struct Check<'r, T: ?Sized> {
    name: Cow<'static, str>,
    rule: Box<dyn ContextualValidator<Input = T> + 'r>,
}

impl<T: ?Sized> Check<'_, T> {
    /// The check name reported in failure metadata under `check`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T: ?Sized> fmt::Debug for Check<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("name", &self.name)
            .field("rule", &"<rule>")
            .finish()
    }
}

/// An ordered list of named checks plus an aggregation mode.
///
/// # Examples
///
/// ```
/// use changeset_validator::engine::{Aggregation, Pipeline};
/// use changeset_validator::foundation::ValidationContext;
/// use changeset_validator::validators::HasPrefix;
///
/// let pipeline = Pipeline::new(Aggregation::AccumulateAll)
///     .check("a", HasPrefix::new("a"))
///     .check("ab", HasPrefix::new("ab"))
///     .check("b", HasPrefix::new("b"));
///
/// let errors = pipeline.run("ax", &ValidationContext::new()).unwrap_err();
/// let checks: Vec<_> = errors.errors().iter().filter_map(|e| e.param("check")).collect();
/// assert_eq!(checks, vec!["ab", "b"]);
/// ```
#[derive(Debug)]
pub struct Pipeline<'r, T: ?Sized> {
    checks: Vec<Check<'r, T>>,
    aggregation: Aggregation,
}

impl<'r, T: ?Sized> Pipeline<'r, T> {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new(aggregation: Aggregation) -> Self {
        Self {
            checks: Vec::new(),
            aggregation,
        }
    }

    /// Creates an empty first-failure-wins pipeline.
    #[must_use]
    pub fn first_failure() -> Self {
        Self::new(Aggregation::FirstFailure)
    }

    /// Creates an empty accumulate-all pipeline.
    #[must_use]
    pub fn accumulate_all() -> Self {
        Self::new(Aggregation::AccumulateAll)
    }

    /// Appends a named check.
    #[must_use = "builder methods must be chained or built"]
    pub fn check<V>(mut self, name: impl Into<Cow<'static, str>>, rule: V) -> Self
    where
        V: ContextualValidator<Input = T> + 'r,
    {
        self.push(name, rule);
        self
    }

    /// Appends a named check in place.
    pub fn push<V>(&mut self, name: impl Into<Cow<'static, str>>, rule: V)
    where
        V: ContextualValidator<Input = T> + 'r,
    {
        self.checks.push(Check {
            name: name.into(),
            rule: Box::new(rule),
        });
    }

    /// The aggregation mode.
    #[must_use]
    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    /// Check names in evaluation order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.checks.iter().map(Check::name).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Runs the checks in order.
    ///
    /// Every failure is tagged with a `check` parameter naming the check
    /// that produced it. In [`Aggregation::FirstFailure`] mode the returned
    /// collection holds exactly one error.
    pub fn run(&self, input: &T, ctx: &ValidationContext<'_>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for check in &self.checks {
            let outcome = check.rule.validate_with_context(input, ctx);
            tracing::trace!(check = %check.name, passed = outcome.is_ok(), "pipeline check");

            if let Err(error) = outcome {
                errors.add(error.with_param("check", check.name.clone()));
                if self.aggregation == Aggregation::FirstFailure {
                    break;
                }
            }
        }

        errors.into_result(())
    }

    /// Runs the checks and reports only the first failure.
    ///
    /// Meant for first-failure pipelines whose domain reports a single
    /// error; in accumulate-all mode every check still runs.
    pub fn run_first(&self, input: &T, ctx: &ValidationContext<'_>) -> Outcome {
        match self.run(input, ctx) {
            Ok(()) => Ok(()),
            Err(errors) => errors.into_first().map_or(Ok(()), Err),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
