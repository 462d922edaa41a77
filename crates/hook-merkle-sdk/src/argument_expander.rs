use alloy::primitives::Address;
use tracing::debug;

use crate::address_catalog::AddressCatalog;
use crate::hook_schema::HookSchema;

/// One argument combination for a hook: argument name → address, in schema order.
///
/// Arguments whose candidate list was empty are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AddressTuple(Vec<(String, Address)>);

impl AddressTuple {
    pub fn new(entries: Vec<(String, Address)>) -> Self {
        Self(entries)
    }

    pub fn get(&self, name: &str) -> Option<Address> {
        self.0
            .iter()
            .find(|(arg_name, _)| arg_name == name)
            .map(|(_, address)| *address)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Address)> {
        self.0.iter().map(|(name, address)| (name.as_str(), address))
    }
}

/// Every combination of candidate addresses for `schema` on `chain_id`.
///
/// Combinations come out in nested-loop order: the first argument varies slowest
/// and each argument walks its candidates in catalog order. Arguments without
/// candidates are left out of every tuple. When no argument has candidates the
/// result is a single empty tuple.
pub fn expand(schema: &HookSchema, catalog: &AddressCatalog, chain_id: u64) -> Vec<AddressTuple> {
    let mut columns: Vec<(&str, &[Address])> = Vec::with_capacity(schema.args.len());
    for arg in &schema.args {
        let candidates = catalog.candidates(arg.role, chain_id);
        if candidates.is_empty() {
            debug!(
                hook = %schema.name,
                argument = %arg.name,
                role = %arg.role,
                chain_id,
                "No candidates for argument, omitting it"
            );
            continue;
        }
        columns.push((arg.name.as_str(), candidates));
    }

    let total: usize = columns.iter().map(|(_, candidates)| candidates.len()).product();
    let mut tuples = Vec::with_capacity(total);

    // odometer over candidate indices, last column ticking fastest
    let mut indices = vec![0usize; columns.len()];
    loop {
        tuples.push(AddressTuple(
            columns
                .iter()
                .zip(&indices)
                .map(|((name, candidates), &i)| (name.to_string(), candidates[i]))
                .collect(),
        ));

        let mut position = columns.len();
        loop {
            if position == 0 {
                debug!(
                    hook = %schema.name,
                    chain_id,
                    combinations = tuples.len(),
                    "Expanded hook arguments"
                );
                return tuples;
            }
            position -= 1;

            indices[position] += 1;
            if indices[position] < columns[position].1.len() {
                break;
            }
            indices[position] = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook_schema::{ArgumentRole, ArgumentSpec};
    use std::collections::{BTreeMap, HashSet};

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn catalog(
        tokens: Vec<Address>,
        yield_sources: Vec<Address>,
        owners: Vec<Address>,
    ) -> AddressCatalog {
        AddressCatalog::new(
            BTreeMap::from([(1, tokens)]),
            BTreeMap::from([(1, yield_sources)]),
            owners,
        )
    }

    fn redeem_schema() -> HookSchema {
        HookSchema::new(
            "Redeem4626VaultHook",
            None,
            vec![
                ArgumentSpec::new("yieldSource", ArgumentRole::YieldSource),
                ArgumentSpec::new("owner", ArgumentRole::Beneficiary),
            ],
        )
    }

    fn three_arg_schema() -> HookSchema {
        HookSchema::new(
            "ApproveAndRedeem4626VaultHook",
            None,
            vec![
                ArgumentSpec::new("yieldSource", ArgumentRole::YieldSource),
                ArgumentSpec::new("token", ArgumentRole::Token),
                ArgumentSpec::new("owner", ArgumentRole::Beneficiary),
            ],
        )
    }

    #[test]
    fn test_first_argument_varies_slowest() {
        let catalog = catalog(vec![], vec![addr(0xa1), addr(0xa2)], vec![addr(0xb1), addr(0xb2)]);
        let tuples = expand(&redeem_schema(), &catalog, 1);

        let pairs: Vec<(Address, Address)> = tuples
            .iter()
            .map(|t| (t.get("yieldSource").unwrap(), t.get("owner").unwrap()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (addr(0xa1), addr(0xb1)),
                (addr(0xa1), addr(0xb2)),
                (addr(0xa2), addr(0xb1)),
                (addr(0xa2), addr(0xb2)),
            ]
        );
    }

    #[test]
    fn test_cartesian_completeness() {
        let catalog = catalog(
            vec![addr(0x11), addr(0x12), addr(0x13)],
            vec![addr(0x21), addr(0x22)],
            vec![addr(0x31), addr(0x32), addr(0x33), addr(0x34)],
        );
        let tuples = expand(&three_arg_schema(), &catalog, 1);

        assert_eq!(tuples.len(), 2 * 3 * 4);
        let distinct: HashSet<_> = tuples.iter().collect();
        assert_eq!(distinct.len(), tuples.len(), "combinations must be distinct");
        for tuple in &tuples {
            let names: Vec<&str> = tuple.iter().map(|(name, _)| name).collect();
            assert_eq!(names, vec!["yieldSource", "token", "owner"]);
        }
    }

    #[test]
    fn test_empty_column_is_omitted() {
        let catalog = catalog(vec![], vec![addr(0xa1), addr(0xa2)], vec![]);
        let tuples = expand(&redeem_schema(), &catalog, 1);

        assert_eq!(tuples.len(), 2);
        for tuple in &tuples {
            assert_eq!(tuple.len(), 1);
            assert!(tuple.get("owner").is_none());
        }
    }

    #[test]
    fn test_all_columns_empty_yields_one_empty_tuple() {
        let catalog = catalog(vec![], vec![], vec![]);
        let tuples = expand(&redeem_schema(), &catalog, 1);

        assert_eq!(tuples, vec![AddressTuple::default()]);
    }

    #[test]
    fn test_unknown_chain_has_no_chain_scoped_candidates() {
        let catalog = catalog(vec![addr(0x11)], vec![addr(0x21)], vec![addr(0x31)]);
        let tuples = expand(&three_arg_schema(), &catalog, 10);

        assert_eq!(tuples.len(), 1);
        assert_eq!(tuples[0].iter().map(|(name, _)| name).collect::<Vec<_>>(), vec!["owner"]);
    }
}
