use std::collections::HashMap;

use alloy::primitives::Bytes;
use tracing::debug;

use crate::builder::{is_valid_merkle_tree, make_merkle_tree};
use crate::dump::{
    to_prefixed_hex, StandardTreeDump, StandardTreeDumpValue, BYTES_LEAF_ENCODING,
    STANDARD_FORMAT,
};
use crate::errors::{TreeError, TreeResult};
use crate::hasher::standard_leaf_hash;
use crate::proof::{generate_proof, verify_proof};

/// Options accepted by [`StandardMerkleTree::of`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Sort leaf hashes ascending before placing them in the tree.
    /// Matches the OpenZeppelin default; turning it off keeps insertion order.
    pub sort_leaves: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self { sort_leaves: true }
    }
}

/// A leaf value together with its position in the flat node array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedValue {
    pub value: Bytes,
    pub tree_index: usize,
}

/// Merkle tree over packed `bytes` leaves, compatible with OpenZeppelin's
/// `StandardMerkleTree.of(values, ["bytes"])` and `MerkleProof.verify`.
///
/// Values keep their insertion index ("value index"); `tree_index` is where the
/// value's leaf hash lives in [`StandardMerkleTree::tree`]. Duplicate values are
/// allowed and each occurrence gets its own leaf and proof.
#[derive(Debug, Clone)]
pub struct StandardMerkleTree {
    tree: Vec<[u8; 32]>,
    values: Vec<IndexedValue>,
    hash_lookup: HashMap<[u8; 32], usize>,
}

impl StandardMerkleTree {
    /// Build a tree from leaf values in insertion order.
    ///
    /// Returns [`TreeError::EmptyTree`] for zero values.
    pub fn of<I, B>(values: I, options: TreeOptions) -> TreeResult<Self>
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let values: Vec<Bytes> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(TreeError::EmptyTree);
        }

        let mut hashed: Vec<(usize, [u8; 32])> = values
            .iter()
            .enumerate()
            .map(|(value_index, value)| (value_index, standard_leaf_hash(value)))
            .collect();

        if options.sort_leaves {
            // stable: equal hashes (duplicate values) keep insertion order
            hashed.sort_by(|a, b| a.1.cmp(&b.1));
        }

        let leaf_hashes: Vec<[u8; 32]> = hashed.iter().map(|(_, hash)| *hash).collect();
        let tree = make_merkle_tree(&leaf_hashes)?;

        let mut tree_indices = vec![0usize; values.len()];
        for (leaf_index, (value_index, _)) in hashed.iter().enumerate() {
            tree_indices[*value_index] = tree.len() - 1 - leaf_index;
        }

        let values: Vec<IndexedValue> = values
            .into_iter()
            .zip(tree_indices)
            .map(|(value, tree_index)| IndexedValue { value, tree_index })
            .collect();

        debug!(
            leaves = values.len(),
            nodes = tree.len(),
            sorted = options.sort_leaves,
            "Built standard merkle tree"
        );

        Ok(Self::from_parts(tree, values))
    }

    /// Rebuild a tree from a `standard-v1` dump and validate it.
    pub fn load(dump: StandardTreeDump) -> TreeResult<Self> {
        if dump.format != STANDARD_FORMAT {
            return Err(TreeError::UnknownFormat(dump.format));
        }
        if dump.leaf_encoding != [BYTES_LEAF_ENCODING] {
            return Err(TreeError::UnsupportedLeafEncoding(dump.leaf_encoding));
        }

        let mut values = Vec::with_capacity(dump.values.len());
        for (value_index, entry) in dump.values.into_iter().enumerate() {
            let [value]: [Vec<u8>; 1] = entry.value.try_into().map_err(|v: Vec<Vec<u8>>| {
                TreeError::InvalidTree(format!(
                    "value {value_index} has {} elements, expected 1",
                    v.len()
                ))
            })?;
            values.push(IndexedValue {
                value: value.into(),
                tree_index: entry.tree_index,
            });
        }

        let tree = Self::from_parts(dump.tree, values);
        tree.validate()?;
        Ok(tree)
    }

    /// Parse and validate a dump from JSON text
    pub fn load_json(json: &str) -> TreeResult<Self> {
        let dump: StandardTreeDump = serde_json::from_str(json)?;
        Self::load(dump)
    }

    fn from_parts(tree: Vec<[u8; 32]>, values: Vec<IndexedValue>) -> Self {
        // later duplicates overwrite earlier ones, as in the JavaScript lookup table
        let hash_lookup = values
            .iter()
            .enumerate()
            .map(|(value_index, v)| (standard_leaf_hash(&v.value), value_index))
            .collect();

        Self {
            tree,
            values,
            hash_lookup,
        }
    }

    /// Hash a leaf value the way the tree and the on-chain verifier do
    pub fn leaf_hash(value: &[u8]) -> [u8; 32] {
        standard_leaf_hash(value)
    }

    /// Get the merkle root
    pub fn root(&self) -> [u8; 32] {
        self.tree[0]
    }

    /// Root as lowercase `0x` hex
    pub fn root_hex(&self) -> String {
        to_prefixed_hex(self.root())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flat node array, root first
    pub fn tree(&self) -> &[[u8; 32]] {
        &self.tree
    }

    pub fn values(&self) -> &[IndexedValue] {
        &self.values
    }

    /// `(value_index, value)` pairs in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Bytes)> {
        self.values.iter().enumerate().map(|(i, v)| (i, &v.value))
    }

    /// Value index of a leaf value; with duplicates, the last occurrence
    pub fn leaf_lookup(&self, value: &[u8]) -> TreeResult<usize> {
        self.hash_lookup
            .get(&standard_leaf_hash(value))
            .copied()
            .ok_or(TreeError::LeafNotInTree)
    }

    /// Generate the merkle proof for the value at `value_index`
    pub fn get_proof(&self, value_index: usize) -> TreeResult<Vec<[u8; 32]>> {
        let entry = self.value_at(value_index)?;
        let proof = generate_proof(&self.tree, entry.tree_index)?;

        // sanity check: the proof we hand out must reproduce our root
        if !verify_proof(&self.tree[entry.tree_index], &proof, &self.root()) {
            return Err(TreeError::InvalidTree(format!(
                "unable to prove value {value_index}"
            )));
        }

        Ok(proof)
    }

    /// Generate the merkle proof for a leaf value
    pub fn get_proof_by_value(&self, value: &[u8]) -> TreeResult<Vec<[u8; 32]>> {
        self.get_proof(self.leaf_lookup(value)?)
    }

    /// Verify a proof for the value at `value_index` against this tree's root
    pub fn verify(&self, value_index: usize, proof: &[[u8; 32]]) -> TreeResult<bool> {
        let entry = self.value_at(value_index)?;
        Ok(verify_proof(
            &standard_leaf_hash(&entry.value),
            proof,
            &self.root(),
        ))
    }

    /// Check that every internal node is consistent and every value hashes to its leaf.
    pub fn validate(&self) -> TreeResult<()> {
        if !is_valid_merkle_tree(&self.tree) {
            return Err(TreeError::InvalidTree("node hashes are inconsistent".to_string()));
        }

        for (value_index, entry) in self.values.iter().enumerate() {
            let leaf = self
                .tree
                .get(entry.tree_index)
                .ok_or_else(|| TreeError::InvalidTree(format!(
                    "value {value_index} points past the end of the tree"
                )))?;
            if *leaf != standard_leaf_hash(&entry.value) {
                return Err(TreeError::InvalidTree(format!(
                    "value {value_index} does not match leaf {}",
                    entry.tree_index
                )));
            }
        }

        Ok(())
    }

    pub fn dump(&self) -> StandardTreeDump {
        StandardTreeDump {
            format: STANDARD_FORMAT.to_string(),
            leaf_encoding: vec![BYTES_LEAF_ENCODING.to_string()],
            tree: self.tree.clone(),
            values: self
                .values
                .iter()
                .map(|v| StandardTreeDumpValue {
                    value: vec![v.value.to_vec()],
                    tree_index: v.tree_index,
                })
                .collect(),
        }
    }

    /// Human-readable view of the node array, one node per line
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.tree.len());
        // (node index, ancestors' "has a later sibling" flags)
        let mut stack: Vec<(usize, Vec<bool>)> = vec![(0, Vec::new())];

        while let Some((index, path)) = stack.pop() {
            let mut line = String::new();
            if let Some((last, ancestors)) = path.split_last() {
                for has_more in ancestors {
                    line.push_str(if *has_more { "│  " } else { "   " });
                }
                line.push_str(if *last { "├─ " } else { "└─ " });
            }
            line.push_str(&format!("{index}) {}", to_prefixed_hex(self.tree[index])));
            lines.push(line);

            let right = 2 * index + 2;
            if right < self.tree.len() {
                let mut right_path = path.clone();
                right_path.push(false);
                stack.push((right, right_path));

                let mut left_path = path;
                left_path.push(true);
                stack.push((2 * index + 1, left_path));
            }
        }

        lines.join("\n")
    }

    fn value_at(&self, value_index: usize) -> TreeResult<&IndexedValue> {
        self.values.get(value_index).ok_or(TreeError::IndexOutOfRange {
            index: value_index,
            count: self.values.len(),
        })
    }
}
