//! This module contains the detector for state variables that cannot work
//! behind a proxy.

use crate::{
    constant::IMMUTABLE_MUTABILITY,
    detector::{Detector, Target},
    validation::ValidationError,
};

/// Flags state variables declared directly in the contract that either:
///
/// - are not constant but are given an initial value, which is only ever
///   assigned by the constructor and so never reaches the proxy's storage, or
/// - are immutable, which places their value in the implementation's code,
///   where it is shared by every proxy using that implementation.
///
/// A variable may produce both findings, assignment first.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct StateVariableDetector;

impl Detector for StateVariableDetector {
    fn detect(&self, target: &Target<'_>) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for var in target.contract.nodes() {
            if !var.is("VariableDeclaration") {
                continue;
            }
            let name = var.name().unwrap_or_default();

            let constant = var.bool_attribute("constant").unwrap_or(false);
            if !constant && var.attribute("value").is_some() {
                errors.push(ValidationError::StateVariableAssignment {
                    name: name.to_string(),
                    src:  target.locate(&var),
                });
            }

            if var.str_attribute("mutability") == Some(IMMUTABLE_MUTABILITY) {
                errors.push(ValidationError::StateVariableImmutable {
                    name: name.to_string(),
                    src:  target.locate(&var),
                });
            }
        }

        errors
    }
}
