use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{CompiledHookTree, CompilerResult, RootArtifact};
use crate::HookRegistry;

/// Where a chain's artifacts were written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub root: PathBuf,
    pub tree_dump: PathBuf,
}

pub fn root_file_name(chain_id: u64) -> String {
    format!("root_{chain_id}.json")
}

pub fn tree_dump_file_name(chain_id: u64) -> String {
    format!("treeDump_{chain_id}.json")
}

/// A chain's artifacts serialized in memory, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub chain_id: u64,
    pub count: usize,
    pub root_hex: String,
    pub root_json: String,
    pub tree_json: String,
}

/// Serialize a compiled tree's root and annotated dump without touching the filesystem.
pub fn render_artifacts(
    compiled: &CompiledHookTree,
    registry: &HookRegistry,
) -> CompilerResult<RenderedArtifacts> {
    let artifact = compiled.serialize(registry)?;
    let root_json = serde_json::to_string_pretty(&RootArtifact {
        root: compiled.root(),
    })?;
    let tree_json = serde_json::to_string_pretty(&artifact)?;

    Ok(RenderedArtifacts {
        chain_id: compiled.chain_id,
        count: artifact.count,
        root_hex: compiled.root_hex(),
        root_json,
        tree_json,
    })
}

/// Write already rendered artifacts into `output_dir`.
///
/// The tree dump is written first and the root file last. If the root file cannot
/// be written the dump is removed again, so a chain never has only one of the two.
pub fn write_rendered<P: AsRef<Path>>(
    rendered: &RenderedArtifacts,
    output_dir: P,
) -> CompilerResult<ArtifactPaths> {
    let output_dir = output_dir.as_ref();
    std::fs::create_dir_all(output_dir)?;

    let paths = ArtifactPaths {
        root: output_dir.join(root_file_name(rendered.chain_id)),
        tree_dump: output_dir.join(tree_dump_file_name(rendered.chain_id)),
    };
    std::fs::write(&paths.tree_dump, &rendered.tree_json)?;
    if let Err(e) = std::fs::write(&paths.root, &rendered.root_json) {
        if let Err(cleanup) = std::fs::remove_file(&paths.tree_dump) {
            warn!(
                path = %paths.tree_dump.display(),
                error = %cleanup,
                "Failed to remove tree dump after root write error"
            );
        }
        return Err(e.into());
    }

    info!(
        chain_id = rendered.chain_id,
        leaves = rendered.count,
        root = %rendered.root_hex,
        path = %paths.tree_dump.display(),
        "Wrote merkle artifacts"
    );

    Ok(paths)
}

/// Render and write `root_<chainId>.json` and `treeDump_<chainId>.json` into `output_dir`.
///
/// A configuration error surfaces during rendering, before the output directory
/// is created.
pub fn write_artifacts<P: AsRef<Path>>(
    compiled: &CompiledHookTree,
    registry: &HookRegistry,
    output_dir: P,
) -> CompilerResult<ArtifactPaths> {
    let rendered = render_artifacts(compiled, registry)?;
    write_rendered(&rendered, output_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_compiler::{compile_hook_tree, CompilerError};
    use crate::{AddressCatalog, HookSchema};
    use alloy::primitives::Address;
    use hook_merkle_tree::TreeOptions;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_file_names() {
        assert_eq!(root_file_name(8453), "root_8453.json");
        assert_eq!(tree_dump_file_name(1), "treeDump_1.json");
    }

    #[test]
    fn test_missing_address_writes_nothing() {
        let registry = HookRegistry::new(vec![HookSchema::new(
            "UndeployedHook",
            None,
            vec![crate::ArgumentSpec::new("owner", crate::ArgumentRole::Beneficiary)],
        )])
        .unwrap();
        let catalog = AddressCatalog::new(
            BTreeMap::new(),
            BTreeMap::new(),
            vec![Address::repeat_byte(0x31)],
        );
        let compiled = compile_hook_tree(&registry, &catalog, 1, TreeOptions::default())
            .unwrap()
            .unwrap();

        let dir = TempDir::new().unwrap();
        let output_dir = dir.path().join("output");
        let result = write_artifacts(&compiled, &registry, &output_dir);

        assert!(matches!(result, Err(CompilerError::MissingHookAddress(_))));
        assert!(!output_dir.exists(), "no output should be created on failure");
    }

    #[test]
    fn test_root_write_failure_leaves_no_dump() {
        let catalog = AddressCatalog::new(
            BTreeMap::new(),
            BTreeMap::new(),
            vec![Address::repeat_byte(0x31)],
        );
        let registry = HookRegistry::default_hooks();
        let compiled = compile_hook_tree(&registry, &catalog, 1, TreeOptions::default())
            .unwrap()
            .unwrap();
        let rendered = render_artifacts(&compiled, &registry).unwrap();

        // a directory squatting on the root file name makes that write fail
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(root_file_name(1))).unwrap();

        assert!(write_rendered(&rendered, dir.path()).is_err());
        assert!(!dir.path().join(tree_dump_file_name(1)).exists());
    }

    #[test]
    fn test_render_matches_written_files() {
        let catalog = AddressCatalog::new(
            BTreeMap::new(),
            BTreeMap::new(),
            vec![Address::repeat_byte(0x31)],
        );
        let registry = HookRegistry::default_hooks();
        let compiled = compile_hook_tree(&registry, &catalog, 1, TreeOptions::default())
            .unwrap()
            .unwrap();
        let rendered = render_artifacts(&compiled, &registry).unwrap();
        assert_eq!(rendered.count, 2);
        assert_eq!(rendered.root_hex, compiled.root_hex());

        let dir = TempDir::new().unwrap();
        let paths = write_artifacts(&compiled, &registry, dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(paths.root).unwrap(), rendered.root_json);
        assert_eq!(std::fs::read_to_string(paths.tree_dump).unwrap(), rendered.tree_json);
    }
}
