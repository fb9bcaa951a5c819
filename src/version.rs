//! This module contains the bytecode fingerprints used to recognise the same
//! compiled artifact across independent validation runs.
//!
//! # Fingerprinting
//!
//! The fingerprint is the Keccak-256 digest of the canonical hex text of the
//! bytecode: lower-case and without a `0x` prefix. Hashing the text rather
//! than the decoded bytes means that bytecode that still contains library
//! placeholders (which are not valid hex) can be fingerprinted, and that a
//! linked bytecode whose library addresses have been swapped back for their
//! placeholders hashes identically to the compiler's unlinked output.
//!
//! The compiler appends CBOR-encoded metadata (including a hash of the source)
//! to the bytecode, so the fingerprint changes with any change to the source or
//! to the compiler settings.

use derivative::Derivative;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::constant::METADATA_LENGTH_SUFFIX_BYTES;

/// The fingerprint of a compiled bytecode image.
///
/// Two versions are equal if and only if their `with_metadata` digests are
/// equal. The metadata-free digest is carried alongside for tooling that wants
/// to compare artifacts while ignoring source-level changes that do not affect
/// the code.
#[derive(Clone, Debug, Deserialize, Derivative, Serialize)]
#[derivative(Eq, Hash, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    /// The digest of the full bytecode, metadata included.
    pub with_metadata: String,

    /// The digest of the bytecode with its trailing metadata removed.
    #[derivative(PartialEq = "ignore", Hash = "ignore")]
    pub without_metadata: String,
}

impl Version {
    /// Computes the fingerprint of the hex-encoded `bytecode`.
    #[must_use]
    pub fn of(bytecode: &str) -> Self {
        let canonical = canonical(bytecode);
        let with_metadata = hash(&canonical);
        let without_metadata = hash(trim_metadata(&canonical));

        Self {
            with_metadata,
            without_metadata,
        }
    }
}

/// Computes the fingerprint of the hex-encoded `bytecode`.
///
/// This is a convenience alias for [`Version::of`].
#[must_use]
pub fn fingerprint(bytecode: &str) -> Version {
    Version::of(bytecode)
}

/// Produces the canonical text of `bytecode` that gets hashed.
fn canonical(bytecode: &str) -> String {
    bytecode
        .strip_prefix("0x")
        .unwrap_or(bytecode)
        .to_ascii_lowercase()
}

/// Removes the trailing CBOR metadata from the canonical hex text `bytecode`.
///
/// The last two bytes of the bytecode hold the big-endian length of the
/// metadata that precedes them. If they do not describe a section that fits in
/// the bytecode, the bytecode is returned unchanged.
fn trim_metadata(bytecode: &str) -> &str {
    let suffix_chars = METADATA_LENGTH_SUFFIX_BYTES * 2;
    if !bytecode.is_ascii() || bytecode.len() < suffix_chars {
        return bytecode;
    }

    let suffix = &bytecode[bytecode.len() - suffix_chars..];
    let Ok(metadata_bytes) = usize::from_str_radix(suffix, 16) else {
        return bytecode;
    };

    let metadata_chars = metadata_bytes * 2 + suffix_chars;
    if metadata_chars > bytecode.len() {
        return bytecode;
    }

    &bytecode[..bytecode.len() - metadata_chars]
}

/// Hashes the provided `text` with Keccak-256, returning the hex digest.
fn hash(text: &str) -> String {
    let mut hasher = Keccak256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
