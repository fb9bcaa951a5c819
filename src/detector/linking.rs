//! This module contains the detector for externally linked libraries.

use crate::{
    detector::{Detector, Target},
    validation::ValidationError,
};

/// Flags every library in the bytecode's link-reference table, once per
/// library regardless of how many places its address is written to.
///
/// The findings carry the path of the source declaring the library rather
/// than a location in the contract. Only the compiled bytecode is consulted,
/// so libraries made up solely of internal functions (which are inlined and
/// leave no link reference) are never flagged.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct LinkingDetector;

impl Detector for LinkingDetector {
    fn detect(&self, target: &Target<'_>) -> Vec<ValidationError> {
        target
            .bytecode
            .link_references
            .iter()
            .flat_map(|(src, libraries)| {
                libraries
                    .keys()
                    .map(move |name| ValidationError::ExternalLibraryLinking {
                        name: name.clone(),
                        src:  src.clone(),
                    })
            })
            .collect()
    }
}
