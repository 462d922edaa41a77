use alloy::primitives::Address;
use hook_merkle_lists::{AddressLists, ChainAddressList};
use std::collections::BTreeMap;

use crate::hook_schema::ArgumentRole;

/// Candidate addresses per role and chain, in list order.
///
/// Beneficiaries are not chain-scoped: every chain sees the same owner list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressCatalog {
    tokens: BTreeMap<u64, Vec<Address>>,
    yield_sources: BTreeMap<u64, Vec<Address>>,
    beneficiaries: Vec<Address>,
}

impl AddressCatalog {
    pub fn new(
        tokens: BTreeMap<u64, Vec<Address>>,
        yield_sources: BTreeMap<u64, Vec<Address>>,
        beneficiaries: Vec<Address>,
    ) -> Self {
        Self {
            tokens,
            yield_sources,
            beneficiaries,
        }
    }

    pub fn from_lists(lists: &AddressLists) -> Self {
        Self {
            tokens: addresses_by_chain(&lists.tokens),
            yield_sources: addresses_by_chain(&lists.yield_sources),
            beneficiaries: lists.owners.0.clone(),
        }
    }

    /// Ordered candidates for `role` on `chain_id`; empty when the chain has none
    pub fn candidates(&self, role: ArgumentRole, chain_id: u64) -> &[Address] {
        match role {
            ArgumentRole::Token => chain_slice(&self.tokens, chain_id),
            ArgumentRole::YieldSource => chain_slice(&self.yield_sources, chain_id),
            ArgumentRole::Beneficiary => &self.beneficiaries,
        }
    }
}

impl From<&AddressLists> for AddressCatalog {
    fn from(lists: &AddressLists) -> Self {
        Self::from_lists(lists)
    }
}

fn addresses_by_chain(list: &ChainAddressList) -> BTreeMap<u64, Vec<Address>> {
    list.iter()
        .map(|(chain_id, entries)| (*chain_id, entries.iter().map(|e| e.address).collect()))
        .collect()
}

fn chain_slice(map: &BTreeMap<u64, Vec<Address>>, chain_id: u64) -> &[Address] {
    map.get(&chain_id).map(Vec::as_slice).unwrap_or(&[])
}
