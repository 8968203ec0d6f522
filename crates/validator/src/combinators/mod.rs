//! Validator combinators
//!
//! - [`And`]: short-circuit conjunction, used to compose multi-step rules
//! - [`override_message`]: replaces the message template, keeping kind and metadata

pub mod and;
pub mod message;

pub use and::{And, and};
pub use message::override_message;
