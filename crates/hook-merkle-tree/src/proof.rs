use crate::builder::{is_leaf_node, parent, sibling};
use crate::errors::{TreeError, TreeResult};
use crate::hasher::hash_pair;

/// Collect the sibling hashes from the leaf at `tree_index` up to (excluding) the root.
pub fn generate_proof(tree: &[[u8; 32]], tree_index: usize) -> TreeResult<Vec<[u8; 32]>> {
    if !is_leaf_node(tree, tree_index) {
        return Err(TreeError::NotALeaf(tree_index));
    }

    let mut proof = Vec::new();
    let mut index = tree_index;
    while index > 0 {
        proof.push(tree[sibling(index)]);
        index = parent(index);
    }

    Ok(proof)
}

/// Fold a proof onto a leaf hash with sorted-pair hashing.
/// This is `MerkleProof.processProof` from the on-chain library.
pub fn extract_root_from_proof(leaf_hash: &[u8; 32], proof: &[[u8; 32]]) -> [u8; 32] {
    proof
        .iter()
        .fold(*leaf_hash, |computed, sibling| hash_pair(&computed, sibling))
}

/// Verify a merkle proof against a root.
pub fn verify_proof(leaf_hash: &[u8; 32], proof: &[[u8; 32]], root: &[u8; 32]) -> bool {
    extract_root_from_proof(leaf_hash, proof) == *root
}

/// Batch verify multiple `(leaf_hash, proof)` pairs against the same root
pub fn batch_verify_proofs(proofs: &[(&[u8; 32], &[[u8; 32]])], root: &[u8; 32]) -> Vec<bool> {
    proofs
        .iter()
        .map(|(leaf_hash, proof)| verify_proof(leaf_hash, proof, root))
        .collect()
}
