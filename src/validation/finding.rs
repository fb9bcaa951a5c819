//! This module contains the safety findings produced by the detectors.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constant::ERROR_DOCUMENTATION_BASE_URL;

/// A construct that makes a contract unsafe to deploy behind an upgradeable
/// proxy.
///
/// Each variant carries the human-readable location `src` at which the
/// construct was found. The [`Display`] implementation gives the fixed message
/// for each kind.
#[derive(Clone, Debug, Deserialize, Eq, Error, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ValidationError {
    /// The contract declares a constructor that does work.
    #[error("Contract `{contract}` has a constructor")]
    Constructor { contract: String, src: String },

    /// The contract performs a bare `delegatecall`.
    #[error("Use of delegatecall is not allowed")]
    Delegatecall { src: String },

    /// The contract calls `selfdestruct`.
    #[error("Use of selfdestruct is not allowed")]
    Selfdestruct { src: String },

    /// A state variable is given an initial value where it is declared.
    #[error("Variable `{name}` is assigned an initial value")]
    StateVariableAssignment { name: String, src: String },

    /// A state variable is declared `immutable`.
    #[error("Variable `{name}` is immutable")]
    StateVariableImmutable { name: String, src: String },

    /// The bytecode links an external library. The `src` is the path of the
    /// source declaring the library rather than a location in the contract.
    #[error("Linking external libraries like `{name}` is not yet supported")]
    ExternalLibraryLinking { name: String, src: String },

    /// The contract defines a struct.
    #[error("Defining structs like `{name}` is not yet supported")]
    StructDefinition { name: String, src: String },

    /// The contract defines an enum.
    #[error("Defining enums like `{name}` is not yet supported")]
    EnumDefinition { name: String, src: String },
}

impl ValidationError {
    /// Gets the kind of the finding.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Constructor { .. } => ErrorKind::Constructor,
            Self::Delegatecall { .. } => ErrorKind::Delegatecall,
            Self::Selfdestruct { .. } => ErrorKind::Selfdestruct,
            Self::StateVariableAssignment { .. } => ErrorKind::StateVariableAssignment,
            Self::StateVariableImmutable { .. } => ErrorKind::StateVariableImmutable,
            Self::ExternalLibraryLinking { .. } => ErrorKind::ExternalLibraryLinking,
            Self::StructDefinition { .. } => ErrorKind::StructDefinition,
            Self::EnumDefinition { .. } => ErrorKind::EnumDefinition,
        }
    }

    /// Gets the location at which the finding was made.
    #[must_use]
    pub fn src(&self) -> &str {
        match self {
            Self::Constructor { src, .. }
            | Self::Delegatecall { src }
            | Self::Selfdestruct { src }
            | Self::StateVariableAssignment { src, .. }
            | Self::StateVariableImmutable { src, .. }
            | Self::ExternalLibraryLinking { src, .. }
            | Self::StructDefinition { src, .. }
            | Self::EnumDefinition { src, .. } => src,
        }
    }

    /// Gets the name of the declaration the finding concerns, for the kinds
    /// that name one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::StateVariableAssignment { name, .. }
            | Self::StateVariableImmutable { name, .. }
            | Self::ExternalLibraryLinking { name, .. }
            | Self::StructDefinition { name, .. }
            | Self::EnumDefinition { name, .. } => Some(name),
            Self::Constructor { .. } | Self::Delegatecall { .. } | Self::Selfdestruct { .. } => {
                None
            }
        }
    }

    /// Gets the suggested remediation for the finding, if there is one.
    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self.kind() {
            ErrorKind::Constructor => Some("Define an initializer instead"),
            ErrorKind::Delegatecall | ErrorKind::Selfdestruct => None,
            ErrorKind::StateVariableAssignment => Some("Move the assignment to the initializer"),
            ErrorKind::StateVariableImmutable => {
                Some("Use a constant or mutable variable instead")
            }
            ErrorKind::ExternalLibraryLinking => Some(
                "Use libraries with internal functions only, or skip this check with the \
                 `allow_linked_libraries` option if you have manually checked that the \
                 libraries are upgrade safe",
            ),
            ErrorKind::StructDefinition | ErrorKind::EnumDefinition => Some(
                "If you have manually checked for storage layout compatibility, you can skip \
                 this check with the `allow_custom_types` option",
            ),
        }
    }

    /// Gets the stable documentation reference for the finding.
    #[must_use]
    pub fn link(&self) -> String {
        format!(
            "{ERROR_DOCUMENTATION_BASE_URL}/error-{:03}",
            self.kind().documentation_number()
        )
    }
}

/// The kinds of [`ValidationError`], without their data.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Constructor,
    Delegatecall,
    Selfdestruct,
    StateVariableAssignment,
    StateVariableImmutable,
    ExternalLibraryLinking,
    StructDefinition,
    EnumDefinition,
}

impl ErrorKind {
    /// Gets the number of the documentation page describing this kind.
    #[must_use]
    pub fn documentation_number(self) -> u32 {
        match self {
            Self::Constructor => 1,
            Self::Delegatecall => 2,
            Self::Selfdestruct => 3,
            Self::StateVariableAssignment => 4,
            Self::StateVariableImmutable => 5,
            Self::ExternalLibraryLinking => 6,
            Self::StructDefinition | Self::EnumDefinition => 7,
        }
    }

    /// Gets the kebab-case name of the kind, as used when serialized.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constructor => "constructor",
            Self::Delegatecall => "delegatecall",
            Self::Selfdestruct => "selfdestruct",
            Self::StateVariableAssignment => "state-variable-assignment",
            Self::StateVariableImmutable => "state-variable-immutable",
            Self::ExternalLibraryLinking => "external-library-linking",
            Self::StructDefinition => "struct-definition",
            Self::EnumDefinition => "enum-definition",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
