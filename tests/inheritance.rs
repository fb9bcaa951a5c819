//! This module is an integration test that checks how the findings and storage
//! of ancestors are attributed to the contracts that inherit from them.
#![cfg(test)]

use common::{contract, uint_variable, Source};
use upgrade_safety::ValidationError;

mod common;

/// Builds a three-level hierarchy split over two sources, with the sources
/// given in the provided order.
fn hierarchy(child_first: bool) -> Vec<Source> {
    let bases = Source::new("contracts/Base.sol")
        .with(
            contract(1, "Base", &[], vec![
                uint_variable("a", "1010:20:0", Some(1)),
                uint_variable("b", "1040:20:0", None),
            ]),
            "",
        )
        .with(
            contract(2, "Middle", &[1], vec![uint_variable("m", "2010:20:0", None)]),
            "",
        );
    let child = Source::new("contracts/Child.sol").with(
        contract(3, "Child", &[2, 1], vec![uint_variable("c", "3010:20:1", None)]),
        "608060405234801561001057600080fd5b50",
    );

    if child_first {
        vec![child, bases]
    } else {
        vec![bases, child]
    }
}

#[test]
fn inherit_lists_ancestors_without_the_contract_itself() -> anyhow::Result<()> {
    let run = common::validate(&hierarchy(false))?;

    let child = run.contract("Child")?;
    assert_eq!(child.inherit, vec!["Middle", "Base"]);
    assert!(!child.inherit.contains(&"Child".to_string()));
    assert_eq!(run.contract("Middle")?.inherit, vec!["Base"]);
    assert!(run.contract("Base")?.inherit.is_empty());

    Ok(())
}

#[test]
fn resolution_does_not_depend_on_source_order() -> anyhow::Result<()> {
    let forwards = common::validate(&hierarchy(false))?;
    let backwards = common::validate(&hierarchy(true))?;

    assert_eq!(forwards.contract("Child")?.inherit, backwards.contract("Child")?.inherit);
    assert_eq!(forwards.contract("Child")?.version, backwards.contract("Child")?.version);

    Ok(())
}

#[test]
fn children_inherit_the_findings_of_their_ancestors() -> anyhow::Result<()> {
    let log = common::log_of(&hierarchy(false))?;
    let child = common::version_of(&log, "Child")?;

    // The finding is recorded against the ancestor only.
    assert!(log.runs()[0].contract("Child")?.errors.is_empty());
    assert_eq!(log.runs()[0].contract("Base")?.errors.len(), 1);

    assert_eq!(log.errors(&child)?, vec![ValidationError::StateVariableAssignment {
        name: "a".into(),
        src:  "1010:20:0".into(),
    }]);
    assert!(!log.is_safe(&child)?);

    Ok(())
}

#[test]
fn merged_layout_places_ancestor_storage_first() -> anyhow::Result<()> {
    let log = common::log_of(&hierarchy(true))?;
    let child = common::version_of(&log, "Child")?;

    let layout = log.merged_layout(&child)?;

    assert_eq!(layout.labels(), vec!["a", "b", "m", "c"]);
    assert!(layout.position_of("Base", "b") < layout.position_of("Child", "c"));
    assert_eq!(layout.storage()[0].contract, "Base");
    assert_eq!(layout.storage()[0].typ, "t_uint256");
    assert_eq!(layout.types()["t_uint256"].label, "uint256");

    Ok(())
}
