//! This module contains the composition of a contract's full storage layout
//! from the layouts declared along its inheritance chain.

use crate::{
    error::lookup,
    layout::StorageLayout,
    validation::ValidationLog,
    version::Version,
};

impl ValidationLog {
    /// Computes the storage layout of the contract whose fingerprint equals
    /// `version`, including the variables of all of its ancestors.
    ///
    /// The variables are ordered the way the compiler allocates storage: those
    /// of the most distant ancestor first, and those of the contract itself
    /// last.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if no contract with that fingerprint is in the log, or
    /// if one of its ancestors is missing from the run that contains it.
    pub fn merged_layout(&self, version: &Version) -> Result<StorageLayout, lookup::Error> {
        let (name, run) = self.find_by_fingerprint(version)?;
        let contract = run.contract(name)?;
        let mut layout = StorageLayout::new();

        // The chain is closest-first, so prepending each one puts the most
        // distant ancestor at the front.
        for ancestor in std::iter::once(name).chain(contract.inherit.iter().map(String::as_str)) {
            layout.prepend(&run.contract(ancestor)?.layout);
        }

        Ok(layout)
    }
}
