use rs_merkle::Hasher as _;

use crate::errors::{TreeError, TreeResult};
use crate::hasher::KeccakSortedHasher;

/// Build the flat node array of a standard tree from already-hashed leaves.
///
/// The layout is a binary heap of `2n - 1` nodes: `tree[0]` is the root, the
/// children of node `i` are `2i + 1` and `2i + 2`, and the `n` leaves occupy the
/// tail of the array in reverse order (`leaves[i]` lands at `tree[len - 1 - i]`).
/// Every internal node has exactly two children, so odd leaf counts need no
/// padding or promotion.
pub fn make_merkle_tree(leaves: &[[u8; 32]]) -> TreeResult<Vec<[u8; 32]>> {
    if leaves.is_empty() {
        return Err(TreeError::EmptyTree);
    }

    let tree_len = 2 * leaves.len() - 1;
    let mut tree = vec![[0u8; 32]; tree_len];

    for (i, leaf) in leaves.iter().enumerate() {
        tree[tree_len - 1 - i] = *leaf;
    }

    for i in (0..tree_len - leaves.len()).rev() {
        tree[i] = KeccakSortedHasher::concat_and_hash(
            &tree[left_child(i)],
            Some(&tree[right_child(i)]),
        );
    }

    Ok(tree)
}

/// Recompute every internal node and compare it with the stored value.
pub fn is_valid_merkle_tree(tree: &[[u8; 32]]) -> bool {
    if tree.is_empty() {
        return false;
    }

    (0..tree.len()).all(|i| {
        let (l, r) = (left_child(i), right_child(i));
        if r < tree.len() {
            tree[i] == KeccakSortedHasher::concat_and_hash(&tree[l], Some(&tree[r]))
        } else {
            // a node is either a full internal node or a leaf
            l >= tree.len()
        }
    })
}

pub(crate) fn left_child(i: usize) -> usize {
    2 * i + 1
}

pub(crate) fn right_child(i: usize) -> usize {
    2 * i + 2
}

/// Callers must not pass the root.
pub(crate) fn parent(i: usize) -> usize {
    (i - 1) / 2
}

/// Callers must not pass the root.
pub(crate) fn sibling(i: usize) -> usize {
    if i % 2 == 1 {
        i + 1
    } else {
        i - 1
    }
}

pub(crate) fn is_leaf_node(tree: &[[u8; 32]], i: usize) -> bool {
    i < tree.len() && left_child(i) >= tree.len()
}
