use hook_merkle_tree::{verify_proof, StandardMerkleTree};
use std::path::Path;
use tracing::{debug, info};

use super::{CompilerError, CompilerResult, TreeArtifact};

/// Summary of an artifact that passed verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedArtifact {
    pub root: [u8; 32],
    pub count: usize,
}

/// Check a tree artifact end to end.
///
/// The embedded standard dump must load and validate, `count` must match, every
/// `encodedHookArgs` must equal its leaf value, and every stored proof must
/// reproduce the root.
pub fn verify_artifact(artifact: &TreeArtifact) -> CompilerResult<VerifiedArtifact> {
    let tree = StandardMerkleTree::load(artifact.to_standard_dump())?;
    let root = tree.root();

    if artifact.count != artifact.values.len() {
        return Err(CompilerError::Verification(format!(
            "count is {} but there are {} values",
            artifact.count,
            artifact.values.len()
        )));
    }

    for (value_index, value) in artifact.values.iter().enumerate() {
        // load() already guarantees exactly one element
        let leaf_value = &value.value[0];
        if *leaf_value != value.encoded_hook_args {
            return Err(CompilerError::Verification(format!(
                "value {value_index} ({}) does not match its encodedHookArgs",
                value.hook_name
            )));
        }

        let leaf_hash = StandardMerkleTree::leaf_hash(leaf_value);
        if !verify_proof(&leaf_hash, &value.proof, &root) {
            return Err(CompilerError::Verification(format!(
                "proof for value {value_index} ({}) does not reproduce the root",
                value.hook_name
            )));
        }
    }

    debug!(count = artifact.count, "Verified every proof in artifact");

    Ok(VerifiedArtifact {
        root,
        count: artifact.count,
    })
}

/// Read a `treeDump_<chainId>.json` file and verify it
pub fn verify_tree_dump_file<P: AsRef<Path>>(path: P) -> CompilerResult<VerifiedArtifact> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let artifact: TreeArtifact = serde_json::from_str(&content)?;
    let verified = verify_artifact(&artifact)?;

    info!(
        path = %path.as_ref().display(),
        count = verified.count,
        "Tree dump verified"
    );

    Ok(verified)
}
