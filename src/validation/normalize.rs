//! This module contains the recovery of the unlinked form of deployed
//! bytecode, so that bytecode with library addresses written into it can still
//! be matched against the fingerprints in the log.

use crate::{link::unlink, validation::ValidationLog, version::Version};

impl ValidationLog {
    /// Recovers the form of `bytecode` that the compiler produced before any
    /// library addresses were linked into it.
    ///
    /// Every contract in the log that links libraries is tried in turn: its
    /// placeholders are written back into `bytecode` and the result is
    /// fingerprinted. The first result whose fingerprint matches the
    /// contract's own is returned.
    ///
    /// When nothing matches, `bytecode` is returned unchanged, on the basis
    /// that it is either already unlinked or is not known to the log.
    #[must_use]
    pub fn normalize(&self, bytecode: &str) -> String {
        for run in self.runs() {
            for (name, contract) in run.iter().filter(|(_, c)| c.is_linkable()) {
                let unlinked = unlink(bytecode, &contract.link_references);
                if contract.version.as_ref() == Some(&Version::of(&unlinked)) {
                    tracing::debug!(contract = name.as_str(), "matched linked bytecode");
                    return unlinked;
                }
            }
        }

        bytecode.to_string()
    }
}
