//! This module contains the collection of the libraries a contract refers to.
//!
//! This is not a detector. The libraries found here are recorded so that
//! their findings and layouts are considered along with the contract's own,
//! and are independent of [`super::linking::LinkingDetector`], which reads the
//! bytecode instead.

use itertools::Itertools;

use crate::{constant::LIBRARY_TYPE_STRING_PREFIX, solc::ast::Node};

/// Finds the AST identifiers of the libraries referenced from `contract`,
/// without duplicates and in order of first reference.
///
/// A library is referenced either through a `using ... for` directive, or by
/// naming it directly in an expression (an identifier whose type is
/// `type(library ...)`).
#[must_use]
pub fn referenced_library_ids(contract: &Node<'_>) -> Vec<i64> {
    let implicit = contract
        .find_all("UsingForDirective")
        .into_iter()
        .filter_map(|d| d.attribute("libraryName"))
        .filter_map(|l| l.referenced_declaration());

    let explicit = contract
        .find_all("Identifier")
        .into_iter()
        .filter(|i| {
            i.type_string()
                .is_some_and(|t| t.starts_with(LIBRARY_TYPE_STRING_PREFIX))
        })
        .filter_map(|i| i.referenced_declaration());

    implicit.chain(explicit).unique().collect()
}
