//! This module contains a lightweight typed view over the compiler's JSON
//! syntax tree, along with the queries that the detectors and the orchestrator
//! need to make against it.
//!
//! The view never copies the tree. Every accessor returns [`None`] when the
//! attribute is missing or has an unexpected shape, leaving it to the caller to
//! decide whether that is fatal.

use serde_json::Value;

use crate::error::input;

/// A borrowed view onto a single node of the syntax tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node<'a> {
    value: &'a Value,
}

impl<'a> Node<'a> {
    /// Wraps the JSON `value` as a syntax tree node.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        Self { value }
    }

    /// Gets the kind of the node, such as `ContractDefinition`.
    #[must_use]
    pub fn node_type(&self) -> Option<&'a str> {
        self.str_attribute("nodeType")
    }

    /// Checks if the node is of kind `node_type`.
    #[must_use]
    pub fn is(&self, node_type: &str) -> bool {
        self.node_type() == Some(node_type)
    }

    /// Gets the numeric AST identifier of the node.
    #[must_use]
    pub fn id(&self) -> Option<i64> {
        self.value.get("id").and_then(Value::as_i64)
    }

    /// Gets the declared name of the node.
    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.str_attribute("name")
    }

    /// Gets the raw `start:length:source` location attribute of the node.
    #[must_use]
    pub fn src(&self) -> Option<&'a str> {
        self.str_attribute("src")
    }

    /// Gets the byte offset at which the node starts in its source file.
    #[must_use]
    pub fn src_start(&self) -> Option<usize> {
        self.src()
            .and_then(|src| src.split(':').next())
            .and_then(|start| start.parse().ok())
    }

    /// Gets the attribute `key` as a node, if it is present and not `null`.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<Node<'a>> {
        self.value
            .get(key)
            .filter(|value| !value.is_null())
            .map(Node::new)
    }

    /// Gets the attribute `key` as a string.
    #[must_use]
    pub fn str_attribute(&self, key: &str) -> Option<&'a str> {
        self.value.get(key).and_then(Value::as_str)
    }

    /// Gets the attribute `key` as a boolean.
    #[must_use]
    pub fn bool_attribute(&self, key: &str) -> Option<bool> {
        self.value.get(key).and_then(Value::as_bool)
    }

    /// Gets the elements of the array attribute `key` as nodes.
    ///
    /// A missing or non-array attribute yields no elements.
    #[must_use]
    pub fn list_attribute(&self, key: &str) -> Vec<Node<'a>> {
        self.value
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Node::new).collect())
            .unwrap_or_default()
    }

    /// Gets the nodes declared directly inside this node, such as the members
    /// of a contract.
    #[must_use]
    pub fn nodes(&self) -> Vec<Node<'a>> {
        self.list_attribute("nodes")
    }

    /// Gets the compiler's resolved type identifier for the node, such as
    /// `t_uint256`.
    #[must_use]
    pub fn type_identifier(&self) -> Option<&'a str> {
        self.attribute("typeDescriptions")
            .and_then(|d| d.str_attribute("typeIdentifier"))
    }

    /// Gets the compiler's human-readable type string for the node, such as
    /// `uint256`.
    #[must_use]
    pub fn type_string(&self) -> Option<&'a str> {
        self.attribute("typeDescriptions")
            .and_then(|d| d.str_attribute("typeString"))
    }

    /// Gets the identifier of the declaration this node refers to.
    #[must_use]
    pub fn referenced_declaration(&self) -> Option<i64> {
        self.value
            .get("referencedDeclaration")
            .and_then(Value::as_i64)
    }

    /// Gets the linearized base contracts of a contract definition, starting
    /// with the contract itself and ending with its most distant ancestor.
    #[must_use]
    pub fn linearized_base_contracts(&self) -> Option<Vec<i64>> {
        self.value
            .get("linearizedBaseContracts")
            .and_then(Value::as_array)
            .and_then(|ids| ids.iter().map(Value::as_i64).collect())
    }

    /// Finds every node of kind `node_type` in the tree rooted at this node,
    /// including the node itself.
    ///
    /// The nodes are returned in the order in which they appear in the source.
    /// Nodes without a location keep their position from a depth-first
    /// pre-order walk.
    #[must_use]
    pub fn find_all(&self, node_type: &str) -> Vec<Node<'a>> {
        let mut found = Vec::new();
        let mut stack = vec![self.value];

        while let Some(value) = stack.pop() {
            match value {
                Value::Object(map) => {
                    let node = Node::new(value);
                    if node.is(node_type) {
                        found.push(node);
                    }
                    stack.extend(map.values().rev());
                }
                Value::Array(items) => stack.extend(items.iter().rev()),
                _ => (),
            }
        }

        found.sort_by_key(|node| node.src_start().unwrap_or(usize::MAX));
        found
    }

    /// Gets the identifier of the node, failing if it does not have one.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the node has no numeric `id`.
    pub fn require_id(&self) -> Result<i64, input::Error> {
        self.id().ok_or_else(|| self.missing("id"))
    }

    /// Gets the name of the node, failing if it does not have one.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the node has no string `name`.
    pub fn require_name(&self) -> Result<&'a str, input::Error> {
        self.name().ok_or_else(|| self.missing("name"))
    }

    /// Gets the linearized base contracts of the node, failing if they are
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if the node has no `linearizedBaseContracts` list of
    /// identifiers.
    pub fn require_linearized_base_contracts(&self) -> Result<Vec<i64>, input::Error> {
        self.linearized_base_contracts()
            .ok_or_else(|| self.missing("linearizedBaseContracts"))
    }

    /// Builds the error for a missing `attribute` on this node.
    fn missing(&self, attribute: &'static str) -> input::Error {
        input::Error::MissingAttribute {
            node_type: self.node_type().unwrap_or("<unknown>").to_string(),
            src:       self.src().unwrap_or("<unknown>").to_string(),
            attribute,
        }
    }
}
