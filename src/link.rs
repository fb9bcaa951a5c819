//! This module contains the handling of link references: the ranges in a
//! compiled bytecode that are reserved for the addresses of externally linked
//! libraries.
//!
//! The compiler writes a placeholder of the form `__$<hash>$__` into each
//! reserved range. Deploying the contract replaces every placeholder with the
//! address of the deployed library, which changes the bytecode (and hence its
//! fingerprint). Writing the placeholders back recovers the unlinked form.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{error::input, solc::Bytecode};

/// A single reserved range in a bytecode image, along with the placeholder
/// the compiler wrote into it.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct LinkReference {
    /// The path of the source that declares the library.
    pub src: String,

    /// The name of the library.
    pub name: String,

    /// The offset of the range in bytes from the start of the bytecode.
    pub start: usize,

    /// The length of the range in bytes.
    pub length: usize,

    /// The text of the range in the unlinked bytecode.
    pub placeholder: String,
}

impl LinkReference {
    /// Gets the range of hex characters that the reference covers in a
    /// bytecode string without a `0x` prefix.
    ///
    /// Returns [`None`] if the range cannot be represented.
    #[must_use]
    pub fn char_range(&self) -> Option<Range<usize>> {
        char_range(self.start, self.length)
    }
}

/// Computes the hex character range covering `length` bytes from byte
/// `start`, if it does not overflow.
fn char_range(start: usize, length: usize) -> Option<Range<usize>> {
    let begin = start.checked_mul(2)?;
    let end = start.checked_add(length)?.checked_mul(2)?;
    Some(begin..end)
}

/// Flattens the link-reference table of `bytecode` into one [`LinkReference`]
/// per reserved range, capturing the placeholder found at each.
///
/// The `contract` is only used to describe the failure.
///
/// # Errors
///
/// Returns [`Err`] if a reference lies outside the bytecode object.
pub fn extract_link_references(
    contract: &str,
    bytecode: &Bytecode,
) -> Result<Vec<LinkReference>, input::Error> {
    let mut references = Vec::new();

    for (src, libraries) in &bytecode.link_references {
        for (name, offsets) in libraries {
            for offset in offsets {
                let placeholder = char_range(offset.start, offset.length)
                    .and_then(|range| bytecode.object.get(range))
                    .ok_or_else(|| input::Error::LinkReferenceOutOfBounds {
                        contract: contract.to_string(),
                        library:  name.clone(),
                        start:    offset.start,
                        length:   offset.length,
                    })?;

                references.push(LinkReference {
                    src:         src.clone(),
                    name:        name.clone(),
                    start:       offset.start,
                    length:      offset.length,
                    placeholder: placeholder.to_string(),
                });
            }
        }
    }

    Ok(references)
}

/// Writes the placeholder of every reference in `references` back into the
/// hex-encoded `bytecode`, replacing whatever address was linked there.
///
/// A `0x` prefix on `bytecode` is preserved. References that do not fit in
/// `bytecode` are skipped, as such a bytecode cannot be the one the references
/// were taken from.
#[must_use]
pub fn unlink(bytecode: &str, references: &[LinkReference]) -> String {
    let (prefix, body) = match bytecode.strip_prefix("0x") {
        Some(body) => ("0x", body),
        None => ("", bytecode),
    };
    let mut body = body.to_string();

    for reference in references {
        let Some(range) = reference.char_range() else {
            continue;
        };
        let fits = body.get(range.clone()).is_some();
        if fits && reference.placeholder.len() == range.len() {
            body.replace_range(range, &reference.placeholder);
        }
    }

    format!("{prefix}{body}")
}
