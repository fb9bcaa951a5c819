//! This module contains the definition of the validator itself, which turns
//! the output of one compiler invocation into a [`ValidationRun`].
//!
//! # How it Works
//!
//! Validation is done in three passes over the compiler output:
//!
//! 1. **Identity.** Every compiled contract in every source gets a record,
//!    holding its fingerprint (if it has bytecode) and its link references.
//! 2. **Analysis.** Every contract definition in every syntax tree is given a
//!    name in the identifier table. Those that have a record are run through
//!    the [`Detectors`] and the [`LayoutExtractor`], and the identifiers of
//!    their ancestors and libraries are set aside.
//! 3. **Resolution.** The set-aside identifiers are turned into names using
//!    the now-complete identifier table.
//!
//! A contract may inherit from or use a library declared in any other source,
//! in any order, so no identifier is resolved until every source has been
//! analyzed.

use std::collections::HashMap;

use crate::{
    detector::{libraries::referenced_library_ids, Detectors, Target},
    error,
    error::input,
    layout::{AstLayoutExtractor, LayoutExtractor},
    link::extract_link_references,
    solc::SolcOutput,
    source::SourceDecoder,
    validation::{ContractValidation, ValidationRun},
    version::Version,
};

/// Creates a new validator with the provided `config`.
#[must_use]
pub fn new(config: Config) -> Validator {
    Validator { config }
}

/// Validates the compiler `output` with the default configuration, describing
/// locations with `decoder`.
///
/// # Errors
///
/// Returns [`Err`] if the compiler output is malformed.
pub fn validate(output: &SolcOutput, decoder: &dyn SourceDecoder) -> error::Result<ValidationRun> {
    new(Config::default()).validate(output, decoder)
}

/// The validator is responsible for producing a validation record for every
/// contract in a compiler output.
#[derive(Debug, Default)]
pub struct Validator {
    /// The configuration of the validator.
    config: Config,
}

impl Validator {
    /// Gets the configuration of the validator.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validates every contract in the compiler `output`, describing the
    /// locations of findings with `decoder`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the compiler output is malformed: if a contract
    /// definition lacks an identifier, a name, or its linearized bases; if a
    /// link reference lies outside its bytecode; or if an ancestor or library
    /// identifier does not name any contract definition in the output.
    pub fn validate(
        &self,
        output: &SolcOutput,
        decoder: &dyn SourceDecoder,
    ) -> error::Result<ValidationRun> {
        let mut run = Self::register(output)?;
        let mut names = HashMap::new();
        let mut pending = Vec::new();

        for (path, source) in &output.sources {
            for definition in source.ast().find_all("ContractDefinition") {
                let id = definition.require_id()?;
                let name = definition.require_name()?;
                names.insert(id, name.to_string());

                if !run.contains(name) {
                    tracing::debug!(contract = name, "no compiled contract, skipping analysis");
                    continue;
                }
                let Some(compiled) = output.contract(path, name) else {
                    tracing::debug!(
                        contract = name,
                        source = path.as_str(),
                        "contract compiled from another source, skipping analysis"
                    );
                    continue;
                };

                let inherit = definition
                    .require_linearized_base_contracts()?
                    .into_iter()
                    .filter(|&base| base != id)
                    .collect();
                let libraries = referenced_library_ids(&definition);

                let target = Target::new(definition, compiled.bytecode(), decoder);
                let errors = self.config.detectors.detect(&target);
                let layout = self.config.layout_extractor.extract(&definition, decoder);

                if let Some(validation) = run.get_mut(name) {
                    validation.errors = errors;
                    validation.layout = layout;
                }

                pending.push(PendingReferences {
                    contract: name.to_string(),
                    inherit,
                    libraries,
                });
            }
        }

        for references in pending {
            let inherit = references.resolve(&references.inherit, &names)?;
            let libraries = references.resolve(&references.libraries, &names)?;

            if let Some(validation) = run.get_mut(&references.contract) {
                validation.inherit = inherit;
                validation.libraries = libraries;
            }
        }

        Ok(run)
    }

    /// Creates a record for every compiled contract in `output`, holding only
    /// its fingerprint and link references.
    fn register(output: &SolcOutput) -> Result<ValidationRun, input::Error> {
        let mut run = ValidationRun::new();

        for contracts in output.contracts.values() {
            for (name, compiled) in contracts {
                let bytecode = compiled.bytecode();
                let version = (!bytecode.is_empty()).then(|| Version::of(&bytecode.object));

                let mut validation = ContractValidation::new(version);
                validation.link_references = extract_link_references(name, bytecode)?;

                if run.contains(name) {
                    tracing::debug!(contract = name.as_str(), "replacing contract of the same name");
                }
                run.insert(name.clone(), validation);
            }
        }

        tracing::debug!(contracts = run.len(), "registered compiled contracts");
        Ok(run)
    }
}

/// The ancestor and library identifiers of a contract, awaiting resolution to
/// names.
#[derive(Clone, Debug, Eq, PartialEq)]
struct PendingReferences {
    /// The name of the contract the references belong to.
    contract: String,

    /// The identifiers of the contract's ancestors, closest first.
    inherit: Vec<i64>,

    /// The identifiers of the libraries the contract references.
    libraries: Vec<i64>,
}

impl PendingReferences {
    /// Resolves the identifiers in `ids` to contract names using `names`.
    fn resolve(&self, ids: &[i64], names: &HashMap<i64, String>) -> Result<Vec<String>, input::Error> {
        ids.iter()
            .map(|id| {
                names
                    .get(id)
                    .cloned()
                    .ok_or_else(|| input::Error::UnresolvedReference {
                        contract: self.contract.clone(),
                        id:       *id,
                    })
            })
            .collect()
    }
}

/// The validator's configuration, allowing its behaviour to be configured
/// externally.
#[derive(Debug)]
pub struct Config {
    /// The detectors that are run on each contract.
    ///
    /// Defaults to [`Detectors::default()`].
    pub detectors: Detectors,

    /// The extractor used for each contract's own storage layout.
    ///
    /// Defaults to [`AstLayoutExtractor`].
    pub layout_extractor: Box<dyn LayoutExtractor>,
}

impl Config {
    /// Sets the `detectors` config parameter to `value`.
    #[must_use]
    pub fn with_detectors(mut self, value: Detectors) -> Self {
        self.detectors = value;
        self
    }

    /// Sets the `layout_extractor` config parameter to `value`.
    #[must_use]
    pub fn with_layout_extractor(mut self, value: impl LayoutExtractor + 'static) -> Self {
        self.layout_extractor = Box::new(value);
        self
    }
}

/// Creates a default validator configuration.
impl Default for Config {
    fn default() -> Self {
        let detectors = Detectors::default();
        let layout_extractor = Box::new(AstLayoutExtractor);
        Self {
            detectors,
            layout_extractor,
        }
    }
}
