//! This module contains the aggregate failure raised when a contract is found
//! to be unsafe to deploy behind a proxy.

use std::fmt::Formatter;

use thiserror::Error;

use crate::validation::ValidationError;

/// The contract named by `contract` is not upgrade safe because of the
/// findings in `errors`, none of which were excepted by the caller's options.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub struct UpgradeUnsafe {
    /// The name of the contract that failed the assertion.
    pub contract: String,

    /// The findings that remained after exceptions were applied.
    pub errors: Vec<ValidationError>,
}

impl UpgradeUnsafe {
    /// Constructs a new failure for `contract` carrying `errors`.
    #[must_use]
    pub fn new(contract: impl Into<String>, errors: Vec<ValidationError>) -> Self {
        let contract = contract.into();
        Self { contract, errors }
    }
}

/// Renders a header line followed by one block per finding, giving its
/// location, message, remediation hint (where there is one), and the link to
/// its documentation.
impl std::fmt::Display for UpgradeUnsafe {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Contract `{}` is not upgrade safe", self.contract)?;

        for error in &self.errors {
            writeln!(f)?;
            writeln!(f, "{}: {error}", error.src())?;
            if let Some(hint) = error.hint() {
                writeln!(f, "    {hint}")?;
            }
            write!(f, "    {}", error.link())?;
        }

        Ok(())
    }
}
