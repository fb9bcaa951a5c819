//! This module contains the resolution of bytecode fingerprints to the
//! contracts that produced them.

use crate::{
    error::lookup,
    validation::{ValidationLog, ValidationRun},
    version::Version,
};

/// Operations for locating contracts in the log by fingerprint.
impl ValidationLog {
    /// Finds the contract whose fingerprint equals `version`, returning its name
    /// along with the run that contains it.
    ///
    /// The runs are searched in log order, and each run in name order. The
    /// first match wins. Well-formed input never has two contracts with the
    /// same fingerprint, but this is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if no run contains a contract with a matching
    /// fingerprint, which means that the source of the requested artifact was
    /// not available when the runs were produced.
    pub fn find_by_fingerprint(
        &self,
        version: &Version,
    ) -> Result<(&str, &ValidationRun), lookup::Error> {
        self.runs()
            .iter()
            .find_map(|run| {
                run.iter()
                    .find(|(_, c)| c.version.as_ref() == Some(version))
                    .map(|(name, _)| (name.as_str(), run))
            })
            .ok_or(lookup::Error::NotFound)
    }

    /// Gets the name of the contract whose fingerprint equals `version`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if no contract with that fingerprint is in the log.
    pub fn contract_name(&self, version: &Version) -> Result<&str, lookup::Error> {
        self.find_by_fingerprint(version).map(|(name, _)| name)
    }
}
