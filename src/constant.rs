//! This module contains constants that are needed throughout the codebase.

/// The prefixes of the compiler's type identifiers for a bare `delegatecall`
/// on an address.
///
/// Calls through an interface or a library compile to different type
/// identifiers, so only the low-level member on `address` is matched. New
/// compiler spellings should be added here.
pub const BARE_DELEGATECALL_TYPE_PREFIXES: &[&str] = &["t_function_baredelegatecall_"];

/// The prefixes of the compiler's type identifiers for the `selfdestruct`
/// builtin.
///
/// `suicide` was removed from the language before the AST carried type
/// identifiers for it, so it does not need an entry.
pub const SELFDESTRUCT_TYPE_PREFIXES: &[&str] = &["t_function_selfdestruct_"];

/// The prefix of the type string the compiler assigns to an identifier that
/// names a library, as in `type(library SafeMath)`.
pub const LIBRARY_TYPE_STRING_PREFIX: &str = "type(library ";

/// The value of a function definition's `kind` attribute for constructors.
pub const CONSTRUCTOR_FUNCTION_KIND: &str = "constructor";

/// The value of a variable declaration's `mutability` attribute for immutable
/// variables.
pub const IMMUTABLE_MUTABILITY: &str = "immutable";

/// The base of the stable documentation references attached to each kind of
/// validation error.
pub const ERROR_DOCUMENTATION_BASE_URL: &str = "https://zpl.in/upgrades";

/// The number of bytes at the end of the bytecode that encode the length of
/// the CBOR metadata section.
pub const METADATA_LENGTH_SUFFIX_BYTES: usize = 2;

/// The default for whether struct and enum definitions are tolerated by
/// [`crate::validation::Options`].
pub const DEFAULT_ALLOW_CUSTOM_TYPES: bool = false;

/// The default for whether externally linked libraries are tolerated by
/// [`crate::validation::Options`].
pub const DEFAULT_ALLOW_LINKED_LIBRARIES: bool = false;
