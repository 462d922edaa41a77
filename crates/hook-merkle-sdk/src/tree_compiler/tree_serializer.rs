use alloy::primitives::Address;
use hook_merkle_lists::parse_address;
use hook_merkle_tree::dump::{
    deserialize_hex_bytes_list, deserialize_hex_hashes, serialize_hex_bytes_list,
    serialize_hex_hashes,
};
use hook_merkle_tree::{
    from_prefixed_hex, hash_from_prefixed_hex, to_prefixed_hex, StandardMerkleTree,
    StandardTreeDump, StandardTreeDumpValue, TreeError,
};
use serde::{Deserialize, Serialize};

use super::{CompilerResult, HookLeaf};
use crate::HookRegistry;

/// `treeDump_<chainId>.json`: an OpenZeppelin `standard-v1` dump whose values
/// carry hook metadata and their proof.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeArtifact {
    pub format: String,

    pub leaf_encoding: Vec<String>,

    #[serde(
        serialize_with = "serialize_hex_hashes",
        deserialize_with = "deserialize_hex_hashes"
    )]
    pub tree: Vec<[u8; 32]>,

    pub values: Vec<ArtifactValue>,

    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactValue {
    #[serde(
        serialize_with = "serialize_hex_bytes_list",
        deserialize_with = "deserialize_hex_bytes_list"
    )]
    pub value: Vec<Vec<u8>>,

    pub tree_index: usize,

    pub hook_name: String,

    #[serde(
        serialize_with = "serialize_checksummed",
        deserialize_with = "deserialize_address"
    )]
    pub hook_address: Address,

    #[serde(serialize_with = "serialize_hex_bytes", deserialize_with = "deserialize_hex_bytes")]
    pub encoded_hook_args: Vec<u8>,

    #[serde(
        serialize_with = "serialize_hex_hashes",
        deserialize_with = "deserialize_hex_hashes"
    )]
    pub proof: Vec<[u8; 32]>,
}

/// `root_<chainId>.json`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RootArtifact {
    #[serde(serialize_with = "serialize_hex_hash", deserialize_with = "deserialize_hex_hash")]
    pub root: [u8; 32],
}

impl TreeArtifact {
    /// Strip the hook metadata, leaving a dump OpenZeppelin's `StandardMerkleTree.load` accepts
    pub fn to_standard_dump(&self) -> StandardTreeDump {
        StandardTreeDump {
            format: self.format.clone(),
            leaf_encoding: self.leaf_encoding.clone(),
            tree: self.tree.clone(),
            values: self
                .values
                .iter()
                .map(|v| StandardTreeDumpValue {
                    value: v.value.clone(),
                    tree_index: v.tree_index,
                })
                .collect(),
        }
    }

    pub fn root(&self) -> Option<[u8; 32]> {
        self.tree.first().copied()
    }
}

/// Build the annotated artifact for `tree`, whose values are `leaves[i].encoded` in order.
///
/// Every leaf must belong to a registry hook with a deployment address.
pub fn serialize_tree(
    tree: &StandardMerkleTree,
    leaves: &[HookLeaf],
    registry: &HookRegistry,
) -> CompilerResult<TreeArtifact> {
    if leaves.len() != tree.len() {
        return Err(TreeError::InvalidTree(format!(
            "{} leaves for a tree of {} values",
            leaves.len(),
            tree.len()
        ))
        .into());
    }

    let dump = tree.dump();
    let mut values = Vec::with_capacity(leaves.len());
    for ((value_index, entry), leaf) in dump.values.into_iter().enumerate().zip(leaves) {
        let hook_address = registry.hook_address(&leaf.hook_name)?;

        values.push(ArtifactValue {
            value: entry.value,
            tree_index: entry.tree_index,
            hook_name: leaf.hook_name.clone(),
            hook_address,
            encoded_hook_args: leaf.encoded.to_vec(),
            proof: tree.get_proof(value_index)?,
        });
    }

    Ok(TreeArtifact {
        format: dump.format,
        leaf_encoding: dump.leaf_encoding,
        tree: dump.tree,
        count: values.len(),
        values,
    })
}

// ================================================================================================
// Custom Serde Functions
// ================================================================================================

fn serialize_checksummed<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&address.to_checksum(None))
}

fn deserialize_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_address(&s).map_err(serde::de::Error::custom)
}

fn serialize_hex_bytes<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&to_prefixed_hex(bytes))
}

fn deserialize_hex_bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    from_prefixed_hex(&s).map_err(serde::de::Error::custom)
}

fn serialize_hex_hash<S>(hash: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&to_prefixed_hex(hash))
}

fn deserialize_hex_hash<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    hash_from_prefixed_hex(&s).map_err(serde::de::Error::custom)
}
