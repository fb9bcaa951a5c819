//! This module contains the detector for constructors that do work.

use crate::{
    constant::CONSTRUCTOR_FUNCTION_KIND,
    detector::{Detector, Target},
    validation::ValidationError,
};

/// Flags any constructor whose body has at least one statement, or which has
/// at least one modifier attached.
///
/// A constructor only ever runs against the storage of the implementation
/// contract, never against the proxy's, so whatever it sets up is missing when
/// the contract is used through a proxy. An empty constructor with no
/// modifiers does nothing and is allowed.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct ConstructorDetector;

impl Detector for ConstructorDetector {
    fn detect(&self, target: &Target<'_>) -> Vec<ValidationError> {
        target
            .contract
            .find_all("FunctionDefinition")
            .into_iter()
            .filter(|f| f.str_attribute("kind") == Some(CONSTRUCTOR_FUNCTION_KIND))
            .filter(|f| {
                let statements = f
                    .attribute("body")
                    .map_or(0, |body| body.list_attribute("statements").len());
                statements > 0 || !f.list_attribute("modifiers").is_empty()
            })
            .map(|f| ValidationError::Constructor {
                contract: target.contract_name().to_string(),
                src:      target.locate(&f),
            })
            .collect()
    }
}
