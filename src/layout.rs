//! This module contains the definitions for the storage layout representation
//! types, and the extraction of a single contract's own layout from its
//! syntax tree.
//!
//! A layout extracted from one contract covers only the variables that
//! contract declares. The layout of a contract including its ancestors is
//! produced by [`crate::ValidationLog::merged_layout`].

use std::{collections::BTreeMap, fmt::Debug};

use serde::{Deserialize, Serialize};

use crate::{
    constant::IMMUTABLE_MUTABILITY,
    solc::ast::Node,
    source::SourceDecoder,
};

/// An ordered sequence of storage variables along with descriptions of the
/// types they use.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct StorageLayout {
    /// The storage variables, in allocation order.
    storage: Vec<StorageItem>,

    /// The types used by the storage variables, keyed by type identifier.
    types: BTreeMap<String, TypeItem>,
}

impl StorageLayout {
    /// Creates a new, empty, storage layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the `item` to the end of the layout, recording that its type has
    /// the description `typ`.
    pub fn add(&mut self, item: StorageItem, typ: TypeItem) {
        self.types.insert(item.typ.clone(), typ);
        self.storage.push(item);
    }

    /// Places the variables of `base` before those already in the layout and
    /// merges its types into the layout's types.
    ///
    /// Where both layouts describe the same type identifier, the description
    /// from `base` wins.
    pub fn prepend(&mut self, base: &StorageLayout) {
        self.storage.splice(0..0, base.storage.iter().cloned());
        self.types
            .extend(base.types.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    /// Gets the storage variables that make up this layout, in allocation
    /// order.
    #[must_use]
    pub fn storage(&self) -> &[StorageItem] {
        self.storage.as_slice()
    }

    /// Gets the descriptions of the types used in the layout.
    #[must_use]
    pub fn types(&self) -> &BTreeMap<String, TypeItem> {
        &self.types
    }
}

/// Additional utility functions to enable cleaner testing with the storage
/// layout.
impl StorageLayout {
    /// Gets the position of the variable declared by `contract` with `label`,
    /// if it is in the layout.
    #[must_use]
    pub fn position_of(&self, contract: &str, label: &str) -> Option<usize> {
        self.storage
            .iter()
            .position(|s| s.contract == contract && s.label == label)
    }

    /// Gets the labels of the variables in the layout, in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.storage.iter().map(|s| s.label.as_str()).collect()
    }

    /// Checks if the storage layout is empty (has no variables).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

/// A single storage variable.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct StorageItem {
    /// The name of the contract that declares the variable.
    pub contract: String,

    /// The name of the variable.
    pub label: String,

    /// The normalized type identifier of the variable.
    #[serde(rename = "type")]
    pub typ: String,

    /// The human-readable location of the declaration.
    pub src: String,
}

/// The description of a type used in the storage layout.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TypeItem {
    /// The human-readable name of the type.
    pub label: String,
}

/// The interface to an object that can compute the storage layout declared by
/// a single contract, excluding anything it inherits.
pub trait LayoutExtractor
where
    Self: Debug,
{
    /// Computes the layout of the variables declared directly in the contract
    /// definition `contract`, describing their locations with `decoder`.
    #[must_use]
    fn extract(&self, contract: &Node<'_>, decoder: &dyn SourceDecoder) -> StorageLayout;
}

/// A [`LayoutExtractor`] that reads the state variable declarations from the
/// contract's syntax tree.
///
/// Constants and immutables occupy no storage, and so are left out.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct AstLayoutExtractor;

impl LayoutExtractor for AstLayoutExtractor {
    fn extract(&self, contract: &Node<'_>, decoder: &dyn SourceDecoder) -> StorageLayout {
        let contract_name = contract.name().unwrap_or_default();
        let mut layout = StorageLayout::new();

        for var in contract.nodes() {
            if !var.is("VariableDeclaration") {
                continue;
            }
            let constant = var.bool_attribute("constant").unwrap_or(false);
            let immutable = var.str_attribute("mutability") == Some(IMMUTABLE_MUTABILITY);
            if constant || immutable {
                continue;
            }

            let typ = normalize_type_identifier(var.type_identifier().unwrap_or_default());
            let item = StorageItem {
                contract: contract_name.to_string(),
                label:    var.name().unwrap_or_default().to_string(),
                typ,
                src:      decoder.decode(&var),
            };
            let label = var.type_string().unwrap_or_default().to_string();

            layout.add(item, TypeItem { label });
        }

        layout
    }
}

/// Normalizes a type identifier so that the same storage type is named
/// identically wherever it is referenced from.
///
/// The compiler marks references into storage with a `_ptr` suffix, which says
/// nothing about the layout of the type itself.
#[must_use]
pub fn normalize_type_identifier(type_identifier: &str) -> String {
    let normalized = type_identifier.replace("_storage_ptr", "_storage");
    match normalized.strip_suffix("_ptr") {
        Some(stripped) => stripped.to_string(),
        None => normalized,
    }
}
