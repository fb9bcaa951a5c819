//! This module contains the error type for compiler output that does not have
//! the shape the validator expects.

use thiserror::Error;

/// Errors that occur when reading the compiler output handed to the validator.
///
/// These always indicate a defect in the input rather than a problem with the
/// contracts being validated.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error("Could not parse compiler output: {_0}")]
    Parse(String),

    #[error("The `{node_type}` node at {src:?} has no valid `{attribute}` attribute")]
    MissingAttribute {
        node_type: String,
        src:       String,
        attribute: &'static str,
    },

    #[error("Contract `{contract}` refers to AST node {id:?}, which is not a known contract")]
    UnresolvedReference { contract: String, id: i64 },

    #[error(
        "Link reference for `{library}` in `{contract}` at byte {start:?} with length {length:?} \
         lies outside the bytecode"
    )]
    LinkReferenceOutOfBounds {
        contract: String,
        library:  String,
        start:    usize,
        length:   usize,
    },
}

impl Error {
    /// Constructs a parse error from any displayable `error`.
    pub fn parse(error: impl std::fmt::Display) -> Self {
        Self::Parse(error.to_string())
    }
}
