//! This module contains the detector for the low-level operations that can
//! destroy or take over a proxy.

use crate::{
    constant::{BARE_DELEGATECALL_TYPE_PREFIXES, SELFDESTRUCT_TYPE_PREFIXES},
    detector::{Detector, Target},
    validation::ValidationError,
};

/// Flags every call site of a bare `delegatecall` or of `selfdestruct`.
///
/// The callee's type identifier is matched against the prefixes in
/// [`BARE_DELEGATECALL_TYPE_PREFIXES`] and [`SELFDESTRUCT_TYPE_PREFIXES`].
/// A `delegatecall` run from the implementation can execute arbitrary code
/// against it, including a `selfdestruct`, which would leave every proxy
/// pointing at the implementation without any code to run.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct OpcodeDetector;

impl Detector for OpcodeDetector {
    fn detect(&self, target: &Target<'_>) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for call in target.contract.find_all("FunctionCall") {
            let Some(type_identifier) = call
                .attribute("expression")
                .and_then(|callee| callee.type_identifier())
            else {
                continue;
            };

            if matches_any(type_identifier, BARE_DELEGATECALL_TYPE_PREFIXES) {
                errors.push(ValidationError::Delegatecall {
                    src: target.locate(&call),
                });
            }
            if matches_any(type_identifier, SELFDESTRUCT_TYPE_PREFIXES) {
                errors.push(ValidationError::Selfdestruct {
                    src: target.locate(&call),
                });
            }
        }

        errors
    }
}

/// Checks if `type_identifier` starts with any of the `prefixes`.
fn matches_any(type_identifier: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| type_identifier.starts_with(p))
}

#[cfg(test)]
mod test {
    use serde_json::{json, Value};

    use crate::{
        detector::{
            opcode::OpcodeDetector,
            test::{contract, RawDecoder},
            Detector,
            Target,
        },
        solc::{ast::Node, Bytecode},
        validation::ValidationError,
    };

    fn call(src: &str, callee_type: &str) -> Value {
        json!({
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
        })
    }

    fn detect(statements: Vec<Value>) -> Vec<ValidationError> {
        let tree = contract(
            "Proxyish",
            json!([{
                "nodeType": "FunctionDefinition",
                "kind": "function",
                "src": "10:500:0",
                "body": { "nodeType": "Block", "statements": statements }
            }]),
        );
        let bytecode = Bytecode::default();
        let target = Target::new(Node::new(&tree), &bytecode, &RawDecoder);
        OpcodeDetector.detect(&target)
    }

    #[test]
    fn flags_each_bare_delegatecall() {
        let errors = detect(vec![
            call(
                "20:30:0",
                "t_function_baredelegatecall_nonpayable$_t_bytes_memory_ptr_$returns$_t_bool_$_t_bytes_memory_ptr_$",
            ),
            call(
                "60:30:0",
                "t_function_baredelegatecall_nonpayable$_t_bytes_memory_ptr_$returns$_t_bool_$_t_bytes_memory_ptr_$",
            ),
        ]);

        assert_eq!(errors, vec![
            ValidationError::Delegatecall {
                src: "20:30:0".into(),
            },
            ValidationError::Delegatecall {
                src: "60:30:0".into(),
            },
        ]);
    }

    #[test]
    fn flags_selfdestruct() {
        let errors = detect(vec![call(
            "20:30:0",
            "t_function_selfdestruct_nonpayable$_t_address_payable_$returns$__$",
        )]);

        assert_eq!(errors, vec![ValidationError::Selfdestruct {
            src: "20:30:0".into(),
        }]);
    }

    #[test]
    fn ignores_plain_calls() {
        // `payable(addr).call{value: 0}("")`
        let errors = detect(vec![call(
            "20:30:0",
            "t_function_barecall_payable$_t_bytes_memory_ptr_$returns$_t_bool_$_t_bytes_memory_ptr_$value",
        )]);

        assert!(errors.is_empty());
    }
}
