//! This module contains the upgrade-safety assertion and the options through
//! which a caller can tolerate specific kinds of finding.
//!
//! # Exceptions
//!
//! Options never hide findings from [`ValidationLog::errors`]. They only narrow
//! the set that [`ValidationLog::assert_safe`] treats as fatal, and every kind
//! that is actually suppressed is announced through the [`Reporter`].

use serde::{Deserialize, Serialize};

use crate::{
    constant::{DEFAULT_ALLOW_CUSTOM_TYPES, DEFAULT_ALLOW_LINKED_LIBRARIES},
    error,
    error::{lookup, unsafe_upgrade::UpgradeUnsafe},
    report::Reporter,
    validation::{ErrorKind, ValidationError, ValidationLog},
    version::Version,
};

/// The warning message given when struct and enum findings are suppressed.
const ALLOW_CUSTOM_TYPES_WARNING: &str = "You are using the `allow_custom_types` option to skip \
                                          storage checks for structs and enums. Make sure you \
                                          have manually checked the storage layout for \
                                          incompatibilities.";

/// The warning message given when library linking findings are suppressed.
const ALLOW_LINKED_LIBRARIES_WARNING: &str = "You are using the `allow_linked_libraries` option \
                                              to include external libraries. Make sure you have \
                                              manually checked that the linked libraries are \
                                              upgrade safe.";

/// The caller's choice of which kinds of finding to tolerate.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Whether to tolerate struct and enum definitions.
    ///
    /// Defaults to [`DEFAULT_ALLOW_CUSTOM_TYPES`].
    pub allow_custom_types: bool,

    /// Whether to tolerate externally linked libraries.
    ///
    /// Defaults to [`DEFAULT_ALLOW_LINKED_LIBRARIES`].
    pub allow_linked_libraries: bool,
}

impl Options {
    /// Sets the `allow_custom_types` option to `value`.
    #[must_use]
    pub fn with_allow_custom_types(mut self, value: bool) -> Self {
        self.allow_custom_types = value;
        self
    }

    /// Sets the `allow_linked_libraries` option to `value`.
    #[must_use]
    pub fn with_allow_linked_libraries(mut self, value: bool) -> Self {
        self.allow_linked_libraries = value;
        self
    }

    /// Checks if findings of `kind` are tolerated by these options.
    #[must_use]
    pub fn allows(&self, kind: ErrorKind) -> bool {
        match kind {
            ErrorKind::StructDefinition | ErrorKind::EnumDefinition => self.allow_custom_types,
            ErrorKind::ExternalLibraryLinking => self.allow_linked_libraries,
            _ => false,
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            allow_custom_types:     DEFAULT_ALLOW_CUSTOM_TYPES,
            allow_linked_libraries: DEFAULT_ALLOW_LINKED_LIBRARIES,
        }
    }
}

/// The result of applying the caller's [`Options`] to a set of findings.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Exceptions {
    /// The findings that are still fatal.
    pub retained: Vec<ValidationError>,

    /// The findings that the options suppressed.
    pub removed: Vec<ValidationError>,
}

impl Exceptions {
    /// Reports, through `reporter`, one warning for each option that
    /// suppressed at least one finding of the contract named `contract`.
    pub fn report(&self, contract: &str, reporter: &dyn Reporter) {
        let title = format!("Potentially unsafe deployment of {contract}");
        let removed = |kinds: &[ErrorKind]| {
            self.removed.iter().any(|e| kinds.contains(&e.kind()))
        };

        if removed(&[ErrorKind::StructDefinition, ErrorKind::EnumDefinition]) {
            reporter.warn(contract, &title, ALLOW_CUSTOM_TYPES_WARNING);
        }
        if removed(&[ErrorKind::ExternalLibraryLinking]) {
            reporter.warn(contract, &title, ALLOW_LINKED_LIBRARIES_WARNING);
        }
    }
}

/// Splits `errors` into the findings that remain fatal under `options` and
/// those that the options suppress.
///
/// The relative order of the findings is preserved in both halves.
#[must_use]
pub fn apply_exceptions(errors: Vec<ValidationError>, options: &Options) -> Exceptions {
    let (removed, retained): (Vec<_>, Vec<_>) = errors
        .into_iter()
        .partition(|error| options.allows(error.kind()));

    Exceptions { retained, removed }
}

/// Operations for assessing the safety of contracts in the log.
impl ValidationLog {
    /// Gets every finding that applies to the contract whose fingerprint
    /// equals `version`.
    ///
    /// These are the contract's own findings, followed by those of each of its
    /// ancestors (closest first), and then those of each library it
    /// references. The findings of an ancestor's or a library's own libraries
    /// are not included unless the contract references them itself.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if no contract with that fingerprint is in the log, or
    /// if an ancestor or library is missing from the run that contains it.
    pub fn errors(&self, version: &Version) -> Result<Vec<ValidationError>, lookup::Error> {
        let (name, run) = self.find_by_fingerprint(version)?;
        let contract = run.contract(name)?;
        let mut errors = contract.errors.clone();

        for related in contract.inherit.iter().chain(&contract.libraries) {
            errors.extend(run.contract(related)?.errors.iter().cloned());
        }

        Ok(errors)
    }

    /// Asserts that the contract whose fingerprint equals `version` is safe to
    /// deploy behind a proxy, tolerating the kinds of finding allowed by
    /// `options`.
    ///
    /// Any suppressed kinds are announced through `reporter`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the contract cannot be found, or if any finding
    /// remains after the options have been applied.
    pub fn assert_safe(
        &self,
        version: &Version,
        options: &Options,
        reporter: &dyn Reporter,
    ) -> error::Result<()> {
        let name = self.contract_name(version)?;
        let exceptions = apply_exceptions(self.errors(version)?, options);
        exceptions.report(name, reporter);

        if exceptions.retained.is_empty() {
            Ok(())
        } else {
            tracing::debug!(
                contract = name,
                findings = exceptions.retained.len(),
                "contract is not upgrade safe"
            );
            Err(UpgradeUnsafe::new(name, exceptions.retained).into())
        }
    }

    /// Checks if the contract whose fingerprint equals `version` has no
    /// findings at all, without applying any exceptions.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the contract cannot be found.
    pub fn is_safe(&self, version: &Version) -> Result<bool, lookup::Error> {
        Ok(self.errors(version)?.is_empty())
    }
}
