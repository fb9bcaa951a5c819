//! This module contains the type definitions for the diagnostic sink that
//! receives the warnings emitted when the caller's options suppress findings.
//!
//! The validator itself never decides how warnings are shown. It hands them to
//! a [`Reporter`], which may log them, collect them, or drop them entirely.

use std::{cell::RefCell, fmt::Debug};

/// The interface to an object that receives diagnostic warnings from the
/// validator.
pub trait Reporter
where
    Self: Debug,
{
    /// Reports a warning with the provided `title` and `message` concerning the
    /// contract named `contract`.
    fn warn(&self, contract: &str, title: &str, message: &str);
}

/// An implementation of the [`Reporter`] trait that emits each warning as a
/// `tracing` event at the `WARN` level.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn warn(&self, contract: &str, title: &str, message: &str) {
        tracing::warn!(contract, title, "{message}");
    }
}

/// An implementation of the [`Reporter`] trait that discards every warning.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn warn(&self, _contract: &str, _title: &str, _message: &str) {}
}

/// A single warning recorded by a [`CollectingReporter`].
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Warning {
    /// The contract that the warning concerns.
    pub contract: String,

    /// The headline of the warning.
    pub title: String,

    /// The body of the warning.
    pub message: String,
}

/// An implementation of the [`Reporter`] trait that keeps every warning in
/// memory so that it can be inspected later.
#[derive(Clone, Debug, Default)]
pub struct CollectingReporter {
    /// The warnings received so far, in the order they were received.
    warnings: RefCell<Vec<Warning>>,
}

impl CollectingReporter {
    /// Constructs a new reporter that has not yet received any warnings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a copy of the warnings received so far.
    #[must_use]
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }
}

impl Reporter for CollectingReporter {
    fn warn(&self, contract: &str, title: &str, message: &str) {
        self.warnings.borrow_mut().push(Warning {
            contract: contract.to_string(),
            title:    title.to_string(),
            message:  message.to_string(),
        });
    }
}
