//! This module contains the parts of the compiler's standard-JSON input and
//! output that the validator reads.
//!
//! Only the fields the validator consumes are modelled. Everything else in the
//! compiler output is ignored during deserialization. The syntax trees are
//! kept as raw JSON and inspected through the [`ast::Node`] view.

pub mod ast;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{error::input, solc::ast::Node};

/// A table of link references, keyed by the path of the source that declares
/// each library and then by the library's name.
pub type LinkReferenceTable = BTreeMap<String, BTreeMap<String, Vec<LinkOffset>>>;

/// The standard-JSON output of one compiler invocation.
///
/// Sources and contracts are held in sorted maps so that every pass over the
/// output visits them in the same order.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SolcOutput {
    /// The compiled contracts, keyed by source path and then contract name.
    #[serde(default)]
    pub contracts: BTreeMap<String, BTreeMap<String, CompiledContract>>,

    /// The per-source compilation results, keyed by source path.
    #[serde(default)]
    pub sources: BTreeMap<String, OutputSource>,
}

impl SolcOutput {
    /// Parses the standard-JSON compiler output in `json`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `json` is not valid compiler output.
    pub fn from_json(json: &str) -> Result<Self, input::Error> {
        serde_json::from_str(json).map_err(input::Error::parse)
    }

    /// Gets the compiled form of the contract `name` declared in `source`, if
    /// it exists.
    #[must_use]
    pub fn contract(&self, source: &str, name: &str) -> Option<&CompiledContract> {
        self.contracts.get(source).and_then(|c| c.get(name))
    }
}

/// A single compiled contract.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CompiledContract {
    /// The EVM-related outputs for the contract.
    #[serde(default)]
    pub evm: Evm,
}

impl CompiledContract {
    /// Gets the creation bytecode of the contract.
    #[must_use]
    pub fn bytecode(&self) -> &Bytecode {
        &self.evm.bytecode
    }
}

/// The EVM-related outputs for a contract.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Evm {
    /// The creation bytecode.
    #[serde(default)]
    pub bytecode: Bytecode,
}

/// A compiled bytecode object along with the positions of its unresolved
/// library addresses.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bytecode {
    /// The hex-encoded bytecode, without a `0x` prefix.
    ///
    /// This is the empty string for abstract contracts and interfaces.
    #[serde(default)]
    pub object: String,

    /// The places in the bytecode reserved for the addresses of externally
    /// linked libraries.
    #[serde(default)]
    pub link_references: LinkReferenceTable,
}

impl Bytecode {
    /// Checks if the bytecode object is empty, as it is for contracts that
    /// cannot be deployed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.object.is_empty()
    }
}

/// The byte range reserved for one occurrence of a library address.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct LinkOffset {
    /// The offset in bytes from the start of the bytecode.
    pub start: usize,

    /// The length in bytes of the reserved range.
    pub length: usize,
}

/// The per-source compilation results.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct OutputSource {
    /// The index of the source, as used in the `src` attributes of AST nodes.
    #[serde(default)]
    pub id: u32,

    /// The syntax tree of the source.
    #[serde(default)]
    pub ast: serde_json::Value,
}

impl OutputSource {
    /// Gets a view onto the root node of the source's syntax tree.
    #[must_use]
    pub fn ast(&self) -> Node<'_> {
        Node::new(&self.ast)
    }
}

/// The parts of the standard-JSON compiler input that are needed to decode
/// source locations.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SolcInput {
    /// The sources handed to the compiler, keyed by path.
    #[serde(default)]
    pub sources: BTreeMap<String, InputSource>,
}

impl SolcInput {
    /// Parses the standard-JSON compiler input in `json`.
    ///
    /// # Errors
    ///
    /// Returns [`Err`] if `json` is not valid compiler input.
    pub fn from_json(json: &str) -> Result<Self, input::Error> {
        serde_json::from_str(json).map_err(input::Error::parse)
    }
}

/// A single source file handed to the compiler.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct InputSource {
    /// The text of the source.
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod test {
    use crate::solc::SolcOutput;

    #[test]
    fn parses_bytecode_and_link_references() -> anyhow::Result<()> {
        let json = r#"{
            "contracts": {
                "contracts/Token.sol": {
                    "Token": {
                        "abi": [],
                        "evm": {
                            "bytecode": {
                                "object": "6080__$0123$__00",
                                "linkReferences": {
                                    "contracts/Lib.sol": {
                                        "Lib": [{ "start": 2, "length": 20 }]
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "sources": { "contracts/Token.sol": { "id": 3, "ast": { "nodeType": "SourceUnit" } } }
        }"#;
        let output = SolcOutput::from_json(json)?;

        let token = output.contract("contracts/Token.sol", "Token").unwrap();
        assert!(!token.bytecode().is_empty());
        let offsets = &token.bytecode().link_references["contracts/Lib.sol"]["Lib"];
        assert_eq!(offsets.len(), 1);
        assert_eq!(offsets[0].start, 2);
        assert_eq!(output.sources["contracts/Token.sol"].id, 3);
        assert_eq!(
            output.sources["contracts/Token.sol"].ast().node_type(),
            Some("SourceUnit")
        );

        Ok(())
    }

    #[test]
    fn rejects_malformed_output() {
        assert!(SolcOutput::from_json(r#"{ "contracts": [] }"#).is_err());
    }
}
