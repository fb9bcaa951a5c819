//! This module contains the detectors for user-defined types, whose storage
//! compatibility across upgrades is not yet checked.

use crate::{
    detector::{Detector, Target},
    validation::ValidationError,
};

/// Flags every struct defined directly in the contract.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct StructDefinitionDetector;

impl Detector for StructDefinitionDetector {
    fn detect(&self, target: &Target<'_>) -> Vec<ValidationError> {
        target
            .contract
            .nodes()
            .into_iter()
            .filter(|n| n.is("StructDefinition"))
            .map(|n| ValidationError::StructDefinition {
                name: n.name().unwrap_or_default().to_string(),
                src:  target.locate(&n),
            })
            .collect()
    }
}

/// Flags every enum defined directly in the contract.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct EnumDefinitionDetector;

impl Detector for EnumDefinitionDetector {
    fn detect(&self, target: &Target<'_>) -> Vec<ValidationError> {
        target
            .contract
            .nodes()
            .into_iter()
            .filter(|n| n.is("EnumDefinition"))
            .map(|n| ValidationError::EnumDefinition {
                name: n.name().unwrap_or_default().to_string(),
                src:  target.locate(&n),
            })
            .collect()
    }
}
