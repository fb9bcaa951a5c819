//! This module is an integration test that checks the findings of the default
//! detectors on contracts compiled from full compiler output.
#![cfg(test)]

use common::{constructor, contract, function_calling, uint_variable, Source};
use upgrade_safety::{validation::ErrorKind, ValidationError};

mod common;

const DELEGATECALL: &str =
    "t_function_baredelegatecall_nonpayable$_t_bytes_memory_ptr_$returns$_t_bool_$_t_bytes_memory_ptr_$";
const CALL_WITH_VALUE: &str =
    "t_function_barecall_payable$_t_bytes_memory_ptr_$returns$_t_bool_$_t_bytes_memory_ptr_$value";
const SELFDESTRUCT: &str = "t_function_selfdestruct_nonpayable$_t_address_payable_$returns$__$";

#[test]
fn constructors_are_flagged_when_they_do_work() -> anyhow::Result<()> {
    let run = common::validate(&[Source::new("contracts/Ctors.sol")
        .with(
            contract(1, "Guarded", &[], vec![constructor("1100:40:0", 0, &["initializer"])]),
            "6001",
        )
        .with(contract(2, "Empty", &[], vec![constructor("2100:20:0", 0, &[])]), "6002")
        .with(contract(3, "Busy", &[], vec![constructor("3100:60:0", 2, &[])]), "6003")])?;

    assert_eq!(run.contract("Guarded")?.errors, vec![ValidationError::Constructor {
        contract: "Guarded".into(),
        src:      "1100:40:0".into(),
    }]);
    assert!(run.contract("Empty")?.errors.is_empty());
    assert_eq!(run.contract("Busy")?.errors.len(), 1);

    Ok(())
}

#[test]
fn bare_delegatecall_is_flagged_but_value_calls_are_not() -> anyhow::Result<()> {
    let run = common::validate(&[Source::new("contracts/Calls.sol")
        .with(
            contract(1, "Forwarder", &[], vec![function_calling(
                "forward",
                "1200:30:0",
                DELEGATECALL,
            )]),
            "6001",
        )
        .with(
            contract(2, "Payer", &[], vec![function_calling("pay", "2200:30:0", CALL_WITH_VALUE)]),
            "6002",
        )
        .with(
            contract(3, "Killable", &[], vec![function_calling("kill", "3200:20:0", SELFDESTRUCT)]),
            "6003",
        )])?;

    assert_eq!(run.contract("Forwarder")?.errors, vec![ValidationError::Delegatecall {
        src: "1200:30:0".into(),
    }]);
    assert!(run.contract("Payer")?.errors.is_empty());
    assert_eq!(run.contract("Killable")?.errors, vec![ValidationError::Selfdestruct {
        src: "3200:20:0".into(),
    }]);

    Ok(())
}

#[test]
fn findings_keep_detector_order() -> anyhow::Result<()> {
    let run = common::validate(&[Source::new("contracts/Everything.sol").with(
        contract(1, "Everything", &[], vec![
            common::enum_definition("Mode", "1010:10:0"),
            uint_variable("x", "1030:20:0", Some(1)),
            function_calling("f", "1100:20:0", DELEGATECALL),
            constructor("1200:30:0", 1, &[]),
        ]),
        "6001",
    )])?;

    let kinds: Vec<_> = run
        .contract("Everything")?
        .errors
        .iter()
        .map(ValidationError::kind)
        .collect();

    assert_eq!(kinds, vec![
        ErrorKind::Constructor,
        ErrorKind::Delegatecall,
        ErrorKind::StateVariableAssignment,
        ErrorKind::EnumDefinition,
    ]);

    Ok(())
}

#[test]
fn findings_serialize_with_their_kind() -> anyhow::Result<()> {
    let finding = ValidationError::StateVariableAssignment {
        name: "x".into(),
        src:  "contracts/A.sol:3".into(),
    };

    let json = serde_json::to_value(&finding)?;

    assert_eq!(json["kind"], "state-variable-assignment");
    assert_eq!(json["name"], "x");
    assert_eq!(finding.link(), "https://zpl.in/upgrades/error-004");

    Ok(())
}
