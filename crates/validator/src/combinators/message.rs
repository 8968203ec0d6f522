//! MESSAGE override - custom message templates
//!
//! Every domain option set accepts a `message` override. The override
//! replaces the template only: the failure kind and its metadata are kept,
//! so a custom template can still reference `%{before}`, `%{prefix}` and
//! friends.

use std::borrow::Cow;

use crate::foundation::Outcome;

// ============================================================================
// MESSAGE OVERRIDE
// ============================================================================

/// Applies an optional template override to an outcome.
///
/// `None` and the empty string leave the failure untouched.
pub fn override_message(outcome: Outcome, message: Option<&str>) -> Outcome {
    match message {
        Some(message) if !message.is_empty() => {
            outcome.map_err(|error| error.with_message(Cow::Owned(message.to_owned())))
        }
        _ => outcome,
    }
}

// ============================================================================
// TESTS
// ============================================================================
