/*!
# Standard Tree Dump

JSON shape of `StandardMerkleTree.dump()` from `@openzeppelin/merkle-tree`, so a
tree built here can be loaded by the JavaScript library and vice versa:

```json
{
  "format": "standard-v1",
  "leafEncoding": ["bytes"],
  "tree": ["0x…"],
  "values": [{ "value": ["0x…"], "treeIndex": 2 }]
}
```
*/

use serde::{Deserialize, Serialize};

use crate::errors::{TreeError, TreeResult};

/// Dump format tag written by OpenZeppelin's standard tree
pub const STANDARD_FORMAT: &str = "standard-v1";

/// Leaf encoding of every tree in this workspace: one packed `bytes` value per leaf
pub const BYTES_LEAF_ENCODING: &str = "bytes";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StandardTreeDump {
    pub format: String,

    pub leaf_encoding: Vec<String>,

    #[serde(
        serialize_with = "serialize_hex_hashes",
        deserialize_with = "deserialize_hex_hashes"
    )]
    pub tree: Vec<[u8; 32]>,

    pub values: Vec<StandardTreeDumpValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StandardTreeDumpValue {
    /// Leaf tuple; always a single `bytes` element here
    #[serde(
        serialize_with = "serialize_hex_bytes_list",
        deserialize_with = "deserialize_hex_bytes_list"
    )]
    pub value: Vec<Vec<u8>>,

    pub tree_index: usize,
}

// ================================================================================================
// Hex Helpers
// ================================================================================================

/// Lowercase `0x`-prefixed hex, the way ethers formats hashes and byte strings
pub fn to_prefixed_hex<T: AsRef<[u8]>>(bytes: T) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex with or without a `0x` prefix
pub fn from_prefixed_hex(s: &str) -> TreeResult<Vec<u8>> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| TreeError::InvalidHex(format!("{s}: {e}")))
}

/// Decode a 32-byte hash from hex
pub fn hash_from_prefixed_hex(s: &str) -> TreeResult<[u8; 32]> {
    let bytes = from_prefixed_hex(s)?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        TreeError::InvalidHex(format!("{s}: expected 32 bytes, got {}", bytes.len()))
    })
}

// ================================================================================================
// Custom Serde Functions
// ================================================================================================

pub fn serialize_hex_hashes<S>(hashes: &[[u8; 32]], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(hashes.iter().map(to_prefixed_hex))
}

pub fn deserialize_hex_hashes<'de, D>(deserializer: D) -> Result<Vec<[u8; 32]>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let strings = Vec::<String>::deserialize(deserializer)?;
    strings
        .iter()
        .map(|s| hash_from_prefixed_hex(s).map_err(serde::de::Error::custom))
        .collect()
}

pub fn serialize_hex_bytes_list<S>(values: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(values.iter().map(to_prefixed_hex))
}

pub fn deserialize_hex_bytes_list<'de, D>(deserializer: D) -> Result<Vec<Vec<u8>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let strings = Vec::<String>::deserialize(deserializer)?;
    strings
        .iter()
        .map(|s| from_prefixed_hex(s).map_err(serde::de::Error::custom))
        .collect()
}
