/*!
# List Schema Definitions

JSON shapes of the three address lists consumed by tree generation. The files are
produced by the deployment tooling, one set per environment.

- `token_list.json` and `yield_sources_list.json`: object keyed by chain id
  (decimal string), each value an array of entries with at least an `address`
  field. Any other entry fields (symbol, decimals, vault metadata) are ignored.
- `owner_list.json`: flat array of beneficiary addresses shared by every chain.
*/

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::errors::{ListError, ListResult};

/// File name of the token list
pub const TOKEN_LIST_FILE: &str = "token_list.json";

/// File name of the yield source list
pub const YIELD_SOURCES_LIST_FILE: &str = "yield_sources_list.json";

/// File name of the owner (beneficiary) list
pub const OWNER_LIST_FILE: &str = "owner_list.json";

// ================================================================================================
// Chain-keyed Lists
// ================================================================================================

/// One entry of a chain-keyed list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListEntry {
    #[serde(
        deserialize_with = "deserialize_address",
        serialize_with = "serialize_address"
    )]
    pub address: Address,
}

/// Token or yield-source list: chain id → ordered entries.
///
/// Entry order within a chain is preserved; it drives combination order.
pub type ChainAddressList = BTreeMap<u64, Vec<ListEntry>>;

// ================================================================================================
// Owner List
// ================================================================================================

/// Beneficiary list, not keyed by chain
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OwnerList(
    #[serde(
        deserialize_with = "deserialize_addresses",
        serialize_with = "serialize_addresses"
    )]
    pub Vec<Address>,
);

// ================================================================================================
// Address Parsing
// ================================================================================================

/// Parse a 0x-prefixed 20-byte hex address. Checksum casing is not enforced.
pub fn parse_address(s: &str) -> ListResult<Address> {
    Address::from_str(s.trim()).map_err(|e| ListError::InvalidAddress(format!("{s}: {e}")))
}

// ================================================================================================
// Custom Serde Functions
// ================================================================================================

fn deserialize_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_address(&s).map_err(serde::de::Error::custom)
}

/// Serialize Address as an EIP-55 checksummed string
fn serialize_address<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&address.to_checksum(None))
}

fn deserialize_addresses<'de, D>(deserializer: D) -> Result<Vec<Address>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let strings = Vec::<String>::deserialize(deserializer)?;
    strings
        .iter()
        .map(|s| parse_address(s).map_err(serde::de::Error::custom))
        .collect()
}

fn serialize_addresses<S>(addresses: &[Address], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_seq(addresses.iter().map(|a| a.to_checksum(None)))
}

// ================================================================================================
// Tests
// ================================================================================================
