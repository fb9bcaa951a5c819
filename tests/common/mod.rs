//! This module contains common utilities for simplifying the writing of
//! integration tests for this library.
//!
//! Compiler output is built up as JSON with the helpers below and then parsed
//! exactly as real compiler output would be.

#![cfg(test)]

use anyhow::anyhow;
use serde_json::{json, Value};
use upgrade_safety::{
    solc::{ast::Node, SolcOutput},
    source::SourceDecoder,
    validator,
    ValidationLog,
    ValidationRun,
    Version,
};

/// The placeholder the compiler writes where a library address belongs.
#[allow(unused)] // It is actually
pub const PLACEHOLDER: &str = "__$7f1bd2ab1b5e4b1a2bf8f3aa64e2bd0b15$__";

/// A decoder that describes every node by its raw `src` attribute, so that
/// expected locations can be written directly into the tests.
#[derive(Debug)]
pub struct TestDecoder;

impl SourceDecoder for TestDecoder {
    fn decode(&self, node: &Node<'_>) -> String {
        node.src().unwrap_or_default().to_string()
    }
}

/// A single source file in a fixture compiler output.
#[derive(Clone, Debug)]
pub struct Source {
    /// The path of the source.
    pub path: String,

    /// The compiled contracts declared in the source, by name and bytecode.
    pub compiled: Vec<(String, Value)>,

    /// The contract definitions in the source's syntax tree.
    pub definitions: Vec<Value>,
}

impl Source {
    /// Creates a new source at `path` with no contents.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path:        path.into(),
            compiled:    vec![],
            definitions: vec![],
        }
    }

    /// Adds the contract `definition` to the source, compiled to `object`.
    #[must_use]
    pub fn with(self, definition: Value, object: &str) -> Self {
        self.with_bytecode(definition, bytecode(object, json!({})))
    }

    /// Adds the contract `definition` to the source, compiled to the full
    /// `bytecode` object.
    #[must_use]
    pub fn with_bytecode(mut self, definition: Value, bytecode: Value) -> Self {
        let name = definition["name"].as_str().unwrap_or_default().to_string();
        self.compiled.push((name, json!({ "evm": { "bytecode": bytecode } })));
        self.definitions.push(definition);
        self
    }
}

/// Builds a standard-JSON bytecode object.
#[allow(unused)] // It is actually
pub fn bytecode(object: &str, link_references: Value) -> Value {
    json!({ "object": object, "linkReferences": link_references })
}

/// Builds the compiler output for `sources` and parses it.
///
/// Each source is given the index of its position in `sources`.
pub fn compiler_output(sources: &[Source]) -> anyhow::Result<SolcOutput> {
    let mut contracts = serde_json::Map::new();
    let mut asts = serde_json::Map::new();

    for (index, source) in sources.iter().enumerate() {
        let compiled: serde_json::Map<_, _> = source.compiled.iter().cloned().collect();
        contracts.insert(source.path.clone(), Value::Object(compiled));
        asts.insert(
            source.path.clone(),
            json!({
                "id": index,
                "ast": {
                    "nodeType": "SourceUnit",
                    "src": format!("0:10000:{index}"),
                    "nodes": source.definitions
                }
            }),
        );
    }

    let output = json!({ "contracts": contracts, "sources": asts }).to_string();
    Ok(SolcOutput::from_json(&output)?)
}

/// Validates `sources` with the default configuration.
pub fn validate(sources: &[Source]) -> anyhow::Result<ValidationRun> {
    let output = compiler_output(sources)?;
    Ok(upgrade_safety::new(validator::Config::default()).validate(&output, &TestDecoder)?)
}

/// Validates `sources` and places the resulting run in a fresh log.
#[allow(unused)] // It is actually
pub fn log_of(sources: &[Source]) -> anyhow::Result<ValidationLog> {
    Ok(ValidationLog::from(validate(sources)?))
}

/// Gets the fingerprint of the contract `name` in `log`'s first run.
#[allow(unused)] // It is actually
pub fn version_of(log: &ValidationLog, name: &str) -> anyhow::Result<Version> {
    let run = log.runs().first().ok_or_else(|| anyhow!("The log has no runs"))?;
    Ok(run.contract_version(name)?.clone())
}

/// Builds a contract definition.
///
/// The `bases` are the contract's linearized base contracts excluding itself,
/// closest first.
pub fn contract(id: i64, name: &str, bases: &[i64], nodes: Vec<Value>) -> Value {
    let linearized: Vec<_> = std::iter::once(id).chain(bases.iter().copied()).collect();
    json!({
        "nodeType": "ContractDefinition",
        "id": id,
        "name": name,
        "src": format!("{}:500:0", id * 1000),
        "contractKind": "contract",
        "abstract": false,
        "linearizedBaseContracts": linearized,
        "nodes": nodes
    })
}

/// Builds a library definition.
#[allow(unused)] // It is actually
pub fn library(id: i64, name: &str, nodes: Vec<Value>) -> Value {
    let mut library = contract(id, name, &[], nodes);
    library["contractKind"] = json!("library");
    library
}

/// Builds a mutable state variable of type `uint256`, initialized if `value`
/// is provided.
#[allow(unused)] // It is actually
pub fn uint_variable(name: &str, src: &str, value: Option<u64>) -> Value {
    let value = value.map(|v| {
        json!({ "nodeType": "Literal", "kind": "number", "value": v.to_string() })
    });
    json!({
        "nodeType": "VariableDeclaration",
        "name": name,
        "src": src,
        "constant": false,
        "mutability": "mutable",
        "stateVariable": true,
        "typeName": { "nodeType": "ElementaryTypeName", "name": "uint256" },
        "typeDescriptions": { "typeIdentifier": "t_uint256", "typeString": "uint256" },
        "value": value
    })
}

/// Builds a constructor with `statements` empty statements and one invocation
/// per name in `modifiers`.
#[allow(unused)] // It is actually
pub fn constructor(src: &str, statements: usize, modifiers: &[&str]) -> Value {
    let statements: Vec<_> = (0..statements)
        .map(|_| json!({ "nodeType": "ExpressionStatement" }))
        .collect();
    let modifiers: Vec<_> = modifiers
        .iter()
        .map(|name| {
            json!({
                "nodeType": "ModifierInvocation",
                "modifierName": { "nodeType": "IdentifierPath", "name": name }
            })
        })
        .collect();

    json!({
        "nodeType": "FunctionDefinition",
        "kind": "constructor",
        "name": "",
        "src": src,
        "modifiers": modifiers,
        "body": { "nodeType": "Block", "statements": statements }
    })
}

/// Builds a function whose body makes a single call at `src` to a member whose
/// type identifier is `callee_type`.
#[allow(unused)] // It is actually
pub fn function_calling(name: &str, src: &str, callee_type: &str) -> Value {
    json!({
        "nodeType": "FunctionDefinition",
        "kind": "function",
        "name": name,
        "src": "9000:100:0",
        "modifiers": [],
        "body": {
            "nodeType": "Block",
            "statements": [{
                "nodeType": "ExpressionStatement",
                "expression": {
                    "nodeType": "FunctionCall",
                    "src": src,
                    "arguments": [],
                    "expression": {
                        "nodeType": "MemberAccess",
                        "typeDescriptions": { "typeIdentifier": callee_type }
                    }
                }
            }]
        }
    })
}

/// Builds a struct definition.
#[allow(unused)] // It is actually
pub fn struct_definition(name: &str, src: &str) -> Value {
    json!({ "nodeType": "StructDefinition", "name": name, "src": src, "members": [] })
}

/// Builds an enum definition.
#[allow(unused)] // It is actually
pub fn enum_definition(name: &str, src: &str) -> Value {
    json!({ "nodeType": "EnumDefinition", "name": name, "src": src, "members": [] })
}

/// Builds a `using <name> for ...` directive for the library with AST id
/// `library_id`.
#[allow(unused)] // It is actually
pub fn using_for(library_id: i64, name: &str, src: &str) -> Value {
    json!({
        "nodeType": "UsingForDirective",
        "src": src,
        "libraryName": {
            "nodeType": "IdentifierPath",
            "name": name,
            "referencedDeclaration": library_id
        },
        "typeName": { "nodeType": "ElementaryTypeName", "name": "uint256" }
    })
}

/// Builds a function whose body names the library with AST id `library_id`
/// directly, as in `Strings.toString(x)`.
#[allow(unused)] // It is actually
pub fn function_naming_library(name: &str, library_id: i64, library: &str, src: &str) -> Value {
    json!({
        "nodeType": "FunctionDefinition",
        "kind": "function",
        "name": name,
        "src": "8000:100:0",
        "modifiers": [],
        "body": {
            "nodeType": "Block",
            "statements": [{
                "nodeType": "ExpressionStatement",
                "expression": {
                    "nodeType": "MemberAccess",
                    "memberName": "toString",
                    "expression": {
                        "nodeType": "Identifier",
                        "name": library,
                        "src": src,
                        "referencedDeclaration": library_id,
                        "typeDescriptions": {
                            "typeIdentifier": format!("t_type$_t_contract$_{library}_${library_id}_$"),
                            "typeString": format!("type(library {library})")
                        }
                    }
                }
            }]
        }
    })
}
