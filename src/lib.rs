//! This library implements an analysis of compiled
//! [Solidity](https://soliditylang.org) contracts that aims to discover
//! whether they are safe to deploy as the implementation behind an upgradeable
//! proxy.
//!
//! Note that this library does not compile contracts itself, nor does it
//! compare the storage layouts of two versions of a contract. It works on the
//! standard-JSON output of the compiler, and produces the data that such
//! comparisons are built on.
//!
//! # How it Works
//!
//! From a very high level, the validation process is performed as follows:
//!
//! 1. The compiler output is parsed into a [`solc::SolcOutput`], and every
//!    compiled contract is given a [`ContractValidation`] record, keyed by
//!    name and identified across compilations by its bytecode [`Version`].
//! 2. Each contract definition in the syntax trees is run through the
//!    [`detector::Detectors`], which find constructs that break when executed
//!    through a proxy, and through a [`layout::LayoutExtractor`], which
//!    records the storage it declares.
//! 3. The ancestors and libraries of each contract are resolved by name, giving
//!    a [`ValidationRun`].
//! 4. Runs are gathered into a [`ValidationLog`], which can then find a
//!    contract by fingerprint, merge its storage layout with that of its
//!    ancestors, and assert that it is upgrade safe under a set of
//!    [`Options`].
//!
//! # Basic Usage
//!
//! ```no_run
//! use upgrade_safety::{
//!     report::TracingReporter,
//!     solc::{SolcInput, SolcOutput},
//!     source::LineDecoder,
//!     validator,
//!     Options,
//!     ValidationLog,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let input = SolcInput::from_json(&std::fs::read_to_string("input.json")?)?;
//! let output = SolcOutput::from_json(&std::fs::read_to_string("output.json")?)?;
//!
//! let decoder = LineDecoder::new(&input, &output);
//! let run = upgrade_safety::new(validator::Config::default()).validate(&output, &decoder)?;
//! let version = run.contract_version("Token")?.clone();
//!
//! let log = ValidationLog::from(run);
//! log.assert_safe(&version, &Options::default(), &TracingReporter)?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, clippy::cargo, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Allows for better API naming

pub mod constant;
pub mod detector;
pub mod error;
pub mod layout;
pub mod link;
pub mod report;
pub mod solc;
pub mod source;
pub mod validation;
pub mod validator;
pub mod version;

// Re-exports to provide the library interface.
pub use layout::StorageLayout;
pub use validation::{ContractValidation, Options, ValidationError, ValidationLog, ValidationRun};
pub use validator::{new, Validator};
pub use version::Version;
