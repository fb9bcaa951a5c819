//! This module contains the definition of the `Detector` trait that lets the
//! validator find upgrade-unsafe constructs in a contract, along with the
//! detectors that make up the default rule set.

pub mod constructor;
pub mod custom_type;
pub mod libraries;
pub mod linking;
pub mod opcode;
pub mod state_variable;

use std::{
    any::{Any, TypeId},
    fmt::Debug,
};

use downcast_rs::Downcast;

use crate::{
    detector::{
        constructor::ConstructorDetector,
        custom_type::{EnumDefinitionDetector, StructDefinitionDetector},
        linking::LinkingDetector,
        opcode::OpcodeDetector,
        state_variable::StateVariableDetector,
    },
    solc::{ast::Node, Bytecode},
    source::SourceDecoder,
    validation::ValidationError,
};

/// Everything a detector may inspect about the contract it is run on.
#[derive(Clone, Copy, Debug)]
pub struct Target<'a> {
    /// The contract's definition in the syntax tree.
    pub contract: Node<'a>,

    /// The contract's compiled creation bytecode.
    pub bytecode: &'a Bytecode,

    /// The decoder used to describe the locations of findings.
    pub decoder: &'a dyn SourceDecoder,
}

impl<'a> Target<'a> {
    /// Constructs a new detection target.
    #[must_use]
    pub fn new(
        contract: Node<'a>,
        bytecode: &'a Bytecode,
        decoder: &'a dyn SourceDecoder,
    ) -> Self {
        Self {
            contract,
            bytecode,
            decoder,
        }
    }

    /// Gets the name of the contract, or the empty string if it has none.
    #[must_use]
    pub fn contract_name(&self) -> &'a str {
        self.contract.name().unwrap_or_default()
    }

    /// Describes the location of `node` using the target's decoder.
    #[must_use]
    pub fn locate(&self, node: &Node<'_>) -> String {
        self.decoder.decode(node)
    }
}

/// A trait representing a single rule that finds one family of
/// upgrade-unsafe constructs in a contract.
pub trait Detector
where
    Self: Any + Debug + Downcast,
{
    /// Runs the rule over the provided `target`, returning its findings in the
    /// order in which they occur in the contract.
    ///
    /// Detectors are independent of one another, and must not assume that any
    /// other detector has run.
    #[must_use]
    fn detect(&self, target: &Target<'_>) -> Vec<ValidationError>;
}

/// A container for an ordered set of detectors.
///
/// # Ordering
///
/// The findings of each detector are concatenated in the order in which the
/// detectors were added. Consumers of the findings may rely on this order, so
/// the default order should not be changed lightly.
#[derive(Debug)]
pub struct Detectors {
    /// The ordered list of detectors that will be run in order.
    detectors: Vec<Box<dyn Detector>>,
}

impl Detectors {
    /// Creates a new container with the provided `detectors`.
    #[must_use]
    pub fn new(detectors: impl Into<Vec<Box<dyn Detector>>>) -> Self {
        Self {
            detectors: detectors.into(),
        }
    }

    /// Adds the `detector` to the end of the ordering.
    ///
    /// If a detector of the given type already exists in the ordering, it will
    /// not be added.
    pub fn add<D: Detector>(&mut self, detector: D) {
        let ids: Vec<TypeId> = self
            .detectors
            .iter()
            .map(|d| d.as_ref().as_any().type_id())
            .collect();
        let detector_id = detector.type_id();

        if ids.contains(&detector_id) {
            return;
        }

        self.detectors.push(Box::new(detector));
    }

    /// Gets a reference to the detector of the given type, if it exists in the
    /// container.
    #[must_use]
    pub fn get<D: Detector>(&self) -> Option<&D> {
        self.detectors
            .iter()
            .find_map(|d| d.as_ref().as_any().downcast_ref::<D>())
    }

    /// Gets the number of detectors in the container.
    #[must_use]
    pub fn len(&self) -> usize {
        self.detectors.len()
    }

    /// Checks if the container has no detectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detectors.is_empty()
    }

    /// Runs all of the contained detectors in order on the provided `target`,
    /// returning the concatenation of their findings.
    #[must_use]
    pub fn detect(&self, target: &Target<'_>) -> Vec<ValidationError> {
        self.detectors
            .iter()
            .flat_map(|d| d.detect(target))
            .collect()
    }
}

impl Default for Detectors {
    fn default() -> Self {
        // This order is observable in the findings, so keep it stable.
        Self {
            detectors: vec![
                Box::new(ConstructorDetector),
                Box::new(OpcodeDetector),
                Box::new(StateVariableDetector),
                Box::new(StructDefinitionDetector),
                Box::new(EnumDefinitionDetector),
                Box::new(LinkingDetector),
            ],
        }
    }
}
