mod artifact_verifier;
mod artifact_writer;
mod compiler_error;
mod tree_serializer;

use {
    crate::{
        argument_encoder, argument_expander, AddressCatalog, AddressTuple, HookRegistry,
        HookSchema,
    },
    alloy::primitives::Bytes,
    hook_merkle_tree::{StandardMerkleTree, TreeOptions},
    tracing::{debug, info, warn},
};

pub use {
    artifact_verifier::{verify_artifact, verify_tree_dump_file, VerifiedArtifact},
    artifact_writer::{
        render_artifacts, root_file_name, tree_dump_file_name, write_artifacts, write_rendered,
        ArtifactPaths, RenderedArtifacts,
    },
    compiler_error::{CompilerError, CompilerResult},
    tree_serializer::{serialize_tree, ArtifactValue, RootArtifact, TreeArtifact},
};

/// One committed argument combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookLeaf {
    pub hook_name: String,
    pub args: AddressTuple,
    /// Packed arguments; this is the leaf value committed to the tree
    pub encoded: Bytes,
}

/// The global tree for one chain, with per-leaf metadata in value-index order
#[derive(Debug, Clone)]
pub struct CompiledHookTree {
    pub chain_id: u64,
    pub tree: StandardMerkleTree,
    pub leaves: Vec<HookLeaf>,
}

impl CompiledHookTree {
    pub fn root(&self) -> [u8; 32] {
        self.tree.root()
    }

    pub fn root_hex(&self) -> String {
        self.tree.root_hex()
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Annotated artifact for this tree; fails if a leaf's hook has no address
    pub fn serialize(&self, registry: &HookRegistry) -> CompilerResult<TreeArtifact> {
        serialize_tree(&self.tree, &self.leaves, registry)
    }
}

/// Leaves of a single hook, in expansion order.
///
/// Tuples left with no arguments at all are dropped, so an empty leaf is never
/// committed.
pub fn hook_leaves(
    schema: &HookSchema,
    catalog: &AddressCatalog,
    chain_id: u64,
) -> Vec<HookLeaf> {
    let mut leaves = Vec::new();
    for tuple in argument_expander::expand(schema, catalog, chain_id) {
        if tuple.is_empty() {
            warn!(
                hook = %schema.name,
                chain_id,
                "Every argument list is empty, skipping argument-less leaf"
            );
            continue;
        }

        let encoded = argument_encoder::encode(&tuple, schema);
        leaves.push(HookLeaf {
            hook_name: schema.name.clone(),
            args: tuple,
            encoded,
        });
    }

    debug!(hook = %schema.name, chain_id, leaves = leaves.len(), "Generated hook leaves");
    leaves
}

/// All hooks' leaves pooled in registry order
pub fn collect_leaves(
    registry: &HookRegistry,
    catalog: &AddressCatalog,
    chain_id: u64,
) -> Vec<HookLeaf> {
    let mut leaves = Vec::new();
    for schema in registry.hooks() {
        leaves.extend(hook_leaves(schema, catalog, chain_id));
    }

    info!(chain_id, leaves = leaves.len(), "Generated {} leaves", leaves.len());
    leaves
}

/// Build the global hook tree for `chain_id`.
///
/// Returns `None` when no hook has a single leaf on this chain; there is nothing
/// to commit and no artifact should be written.
pub fn compile_hook_tree(
    registry: &HookRegistry,
    catalog: &AddressCatalog,
    chain_id: u64,
    options: TreeOptions,
) -> CompilerResult<Option<CompiledHookTree>> {
    let leaves = collect_leaves(registry, catalog, chain_id);
    if leaves.is_empty() {
        warn!(chain_id, "No leaves generated, skipping tree");
        return Ok(None);
    }

    let tree = StandardMerkleTree::of(leaves.iter().map(|leaf| leaf.encoded.clone()), options)?;
    info!(chain_id, root = %tree.root_hex(), "Built hook merkle tree");

    Ok(Some(CompiledHookTree {
        chain_id,
        tree,
        leaves,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgumentRole, ArgumentSpec};
    use alloy::primitives::Address;
    use std::collections::BTreeMap;

    fn addr(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    fn test_catalog() -> AddressCatalog {
        AddressCatalog::new(
            BTreeMap::from([(1, vec![addr(0x11)])]),
            BTreeMap::from([(1, vec![addr(0x21), addr(0x22)])]),
            vec![addr(0x31)],
        )
    }

    #[test]
    fn test_leaves_pooled_in_registry_order() {
        let registry = HookRegistry::default_hooks();
        let leaves = collect_leaves(&registry, &test_catalog(), 1);

        // 2*1*1 + 2*1 + 2*1
        assert_eq!(leaves.len(), 6);
        let names: Vec<&str> = leaves.iter().map(|l| l.hook_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "ApproveAndRedeem4626VaultHook",
                "ApproveAndRedeem4626VaultHook",
                "ApproveAndDeposit4626VaultHook",
                "ApproveAndDeposit4626VaultHook",
                "Redeem4626VaultHook",
                "Redeem4626VaultHook",
            ]
        );
        assert_eq!(leaves[0].encoded.len(), 60);
        assert_eq!(leaves[2].encoded.len(), 40);
    }

    #[test]
    fn test_argument_less_tuples_are_not_committed() {
        let registry = HookRegistry::new(vec![HookSchema::new(
            "OwnerOnlyHook",
            Some(addr(0x99)),
            vec![ArgumentSpec::new("owner", ArgumentRole::Beneficiary)],
        )])
        .unwrap();
        let catalog = AddressCatalog::default();

        assert!(hook_leaves(&registry.hooks()[0], &catalog, 1).is_empty());
        assert!(compile_hook_tree(&registry, &catalog, 1, TreeOptions::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_compiled_tree_values_match_leaves() {
        let registry = HookRegistry::default_hooks();
        let compiled = compile_hook_tree(&registry, &test_catalog(), 1, TreeOptions::default())
            .unwrap()
            .expect("tree should not be empty");

        assert_eq!(compiled.chain_id, 1);
        assert_eq!(compiled.len(), compiled.tree.len());
        for (value_index, value) in compiled.tree.entries() {
            assert_eq!(value, &compiled.leaves[value_index].encoded);
            let proof = compiled.tree.get_proof(value_index).unwrap();
            assert!(compiled.tree.verify(value_index, &proof).unwrap());
        }
    }

    #[test]
    fn test_unknown_chain_still_uses_owners() {
        let registry = HookRegistry::default_hooks();
        let compiled = compile_hook_tree(&registry, &test_catalog(), 42, TreeOptions::default())
            .unwrap()
            .unwrap();

        // only the two owner-taking hooks produce a leaf, each with just the owner
        assert_eq!(compiled.len(), 2);
        assert!(compiled.leaves.iter().all(|l| l.encoded.len() == 20));
    }
}
