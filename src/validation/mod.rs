//! This module contains the validation records produced by the validator and
//! the operations that query them.
//!
//! A [`ValidationRun`] holds the result of validating the output of a single
//! compiler invocation. A [`ValidationLog`] accumulates runs from many
//! invocations, and is what the identity, layout, normalization, and safety
//! operations work over. Contracts are found in the log by their bytecode
//! [`Version`] rather than by name, so that an artifact compiled in one run
//! can be matched against the same artifact compiled in another.

pub mod finding;
pub mod merge;
pub mod normalize;
pub mod resolve;
pub mod safety;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use self::{
    finding::{ErrorKind, ValidationError},
    safety::{apply_exceptions, Exceptions, Options},
};
use crate::{error::lookup, layout::StorageLayout, link::LinkReference, version::Version};

/// The validation record for a single contract.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractValidation {
    /// The fingerprint of the contract's bytecode, absent for contracts that
    /// compile to no bytecode.
    pub version: Option<Version>,

    /// The names of the contract's ancestors, closest first. The contract
    /// itself is never included.
    pub inherit: Vec<String>,

    /// The names of the libraries the contract references, without
    /// duplicates.
    pub libraries: Vec<String>,

    /// The ranges in the bytecode reserved for linked library addresses.
    pub link_references: Vec<LinkReference>,

    /// The findings made at the contract's own declaration, excluding those of
    /// its ancestors and libraries.
    pub errors: Vec<ValidationError>,

    /// The storage layout declared by the contract itself, excluding its
    /// ancestors.
    pub layout: StorageLayout,
}

impl ContractValidation {
    /// Constructs a new record for a contract with the provided `version`,
    /// with everything else empty.
    #[must_use]
    pub fn new(version: Option<Version>) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    /// Checks if the contract has bytecode that links external libraries.
    #[must_use]
    pub fn is_linkable(&self) -> bool {
        !self.link_references.is_empty()
    }
}

/// The validation records of every contract in one compiler output, keyed by
/// contract name.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationRun {
    contracts: BTreeMap<String, ContractValidation>,
}

impl ValidationRun {
    /// Creates a new, empty, validation run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the `validation` for the contract `name`, replacing any
    /// existing record of that name.
    pub fn insert(&mut self, name: impl Into<String>, validation: ContractValidation) {
        self.contracts.insert(name.into(), validation);
    }

    /// Gets the record of the contract `name`, if there is one.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ContractValidation> {
        self.contracts.get(name)
    }

    /// Gets a mutable reference to the record of the contract `name`, if there
    /// is one.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ContractValidation> {
        self.contracts.get_mut(name)
    }

    /// Checks if the run has a record for the contract `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.contracts.contains_key(name)
    }

    /// Gets the record of the contract `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the run has no record for `name`.
    pub fn contract(&self, name: &str) -> Result<&ContractValidation, lookup::Error> {
        self.get(name)
            .ok_or_else(|| lookup::Error::UnknownContract(name.to_string()))
    }

    /// Gets the fingerprint of the contract `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the run has no record for `name`, or if the contract
    /// is abstract and so has no fingerprint.
    pub fn contract_version(&self, name: &str) -> Result<&Version, lookup::Error> {
        self.contract(name)?
            .version
            .as_ref()
            .ok_or_else(|| lookup::Error::Abstract(name.to_string()))
    }

    /// Iterates over the contract names and records in the run, ordered by
    /// name.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ContractValidation)> {
        self.contracts.iter()
    }

    /// Gets the number of contracts in the run.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Checks if the run has no contracts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// The validation runs accumulated across many compiler invocations.
///
/// The order of the runs only matters as the order in which they are searched.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationLog {
    runs: Vec<ValidationRun>,
}

impl ValidationLog {
    /// Creates a new, empty, validation log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the `run` to the end of the log.
    pub fn push(&mut self, run: ValidationRun) {
        self.runs.push(run);
    }

    /// Gets the runs in the log, in search order.
    #[must_use]
    pub fn runs(&self) -> &[ValidationRun] {
        self.runs.as_slice()
    }
}

impl From<ValidationRun> for ValidationLog {
    fn from(run: ValidationRun) -> Self {
        let runs = vec![run];
        Self { runs }
    }
}

impl From<Vec<ValidationRun>> for ValidationLog {
    fn from(runs: Vec<ValidationRun>) -> Self {
        Self { runs }
    }
}

impl FromIterator<ValidationRun> for ValidationLog {
    fn from_iter<T: IntoIterator<Item = ValidationRun>>(iter: T) -> Self {
        let runs = iter.into_iter().collect();
        Self { runs }
    }
}
