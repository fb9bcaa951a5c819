//! This module contains the primary error type for the validator's interface.
//! It also re-exports the more specific error types that are
//! subsystem-specific.
//!
//! Note that the safety findings produced by the detectors are _not_ errors in
//! this sense. They live in [`crate::validation::ValidationError`] and only
//! become a failure when [`crate::ValidationLog::assert_safe`] escalates them
//! into an [`unsafe_upgrade::UpgradeUnsafe`].

pub mod input;
pub mod lookup;
pub mod unsafe_upgrade;

use thiserror::Error;

/// The interface result type for the library.
///
/// # Usage
///
/// Any function considered to be part of the public interface of the library
/// should return this result type. Subsystems should return the more-specific
/// child error types as appropriate.
pub type Result<T> = std::result::Result<T, Error>;

/// The interface error type for the library.
///
/// All errors returned from the library interface (and hence encountered by the
/// clients of the library) should be members of this enum.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Errors caused by compiler output that does not have the expected shape.
    #[error(transparent)]
    Input(#[from] input::Error),

    /// Errors from looking contracts up in the validation data.
    #[error(transparent)]
    Lookup(#[from] lookup::Error),

    /// The contract was found to be unsafe to deploy behind a proxy.
    #[error(transparent)]
    Unsafe(#[from] unsafe_upgrade::UpgradeUnsafe),
}

impl Error {
    /// Checks if the error is the result of a failed safety assertion rather
    /// than a problem with the input or the lookup.
    #[must_use]
    pub fn is_unsafe(&self) -> bool {
        matches!(self, Self::Unsafe(_))
    }
}
