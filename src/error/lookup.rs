//! This module contains the errors that arise when looking contracts up in the
//! accumulated validation data.

use thiserror::Error;

/// Errors from resolving a fingerprint or a name to a validated contract.
///
/// These are programmer or configuration errors, and are never recovered from
/// internally.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error(
        "The requested contract was not found. Make sure the source code is available for \
         compilation"
    )]
    NotFound,

    #[error("Contract `{_0}` is abstract")]
    Abstract(String),

    #[error("Contract `{_0}` is not present in the validation run")]
    UnknownContract(String),
}
