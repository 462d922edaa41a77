use crate::config::BuildTreesConfig;
use crate::error::CliResult;
use hook_merkle_lists::AddressLists;
use hook_merkle_sdk::{
    compile_hook_tree, render_artifacts, write_rendered, AddressCatalog, ArtifactPaths,
};
use hook_merkle_tree::TreeOptions;
use tracing::{debug, info, warn};

/// Build and write the artifacts for every requested chain; chains without leaves are skipped.
pub fn execute(config: BuildTreesConfig) -> CliResult<()> {
    let written = run(&config)?;
    for (chain_id, paths) in &written {
        println!(
            "chain {}: {} / {}",
            chain_id,
            paths.root.display(),
            paths.tree_dump.display()
        );
    }
    Ok(())
}

pub(crate) fn run(config: &BuildTreesConfig) -> CliResult<Vec<(u64, ArtifactPaths)>> {
    config.validate()?;

    let registry = config.resolve_registry()?;
    let lists = AddressLists::read_from_dir(&config.lists_dir)?;
    let catalog = AddressCatalog::from_lists(&lists);
    let options = TreeOptions {
        sort_leaves: config.sort_leaves,
    };

    info!(
        lists_dir = %config.lists_dir.display(),
        output_dir = %config.output_dir.display(),
        chains = ?config.chain_ids,
        hooks = registry.len(),
        "Building hook merkle trees"
    );

    // every chain is compiled and serialized before the first file is written
    let mut rendered = Vec::with_capacity(config.chain_ids.len());
    for &chain_id in &config.chain_ids {
        let Some(compiled) = compile_hook_tree(&registry, &catalog, chain_id, options)? else {
            warn!(chain_id, "No artifacts written for chain");
            continue;
        };

        debug!(chain_id, "Tree:\n{}", compiled.tree.render());

        rendered.push(render_artifacts(&compiled, &registry)?);
    }

    let mut written = Vec::with_capacity(rendered.len());
    for artifacts in &rendered {
        let paths = write_rendered(artifacts, &config.output_dir)?;
        written.push((artifacts.chain_id, paths));
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hook_merkle_lists::{parse_address, ChainAddressList, ListEntry, OwnerList};
    use crate::error::CliError;
    use hook_merkle_sdk::{verify_tree_dump_file, CompilerError};
    use hook_merkle_tree::StandardMerkleTree;
    use tempfile::TempDir;

    fn write_lists(dir: &std::path::Path) {
        let entry = |b: u8| ListEntry {
            address: parse_address(&format!("0x{}", format!("{b:02x}").repeat(20))).unwrap(),
        };
        let mut tokens = ChainAddressList::new();
        tokens.insert(1, vec![entry(0x11), entry(0x12)]);
        let mut yield_sources = ChainAddressList::new();
        yield_sources.insert(1, vec![entry(0x21)]);

        AddressLists {
            tokens,
            yield_sources,
            owners: OwnerList(vec![]),
        }
        .write_to_dir(dir)
        .unwrap();
    }

    fn config(dir: &TempDir, chain_ids: Vec<u64>) -> BuildTreesConfig {
        BuildTreesConfig {
            lists_dir: dir.path().to_path_buf(),
            output_dir: dir.path().join("output"),
            chain_ids,
            hooks_file: None,
            hook_addresses: None,
            sort_leaves: true,
        }
    }

    #[test]
    fn test_builds_and_skips_empty_chains() {
        let dir = TempDir::new().unwrap();
        write_lists(dir.path());

        // chain 10 has no tokens, no yield sources and no owners
        let written = run(&config(&dir, vec![1, 10])).unwrap();

        assert_eq!(written.len(), 1);
        let (chain_id, paths) = &written[0];
        assert_eq!(*chain_id, 1);
        assert!(paths.root.exists());
        assert!(!dir.path().join("output").join("root_10.json").exists());

        // owners are empty: 1*2 + 1*2 + 1
        let verified = verify_tree_dump_file(&paths.tree_dump).unwrap();
        assert_eq!(verified.count, 5);
    }

    #[test]
    fn test_unsorted_leaves_keep_generation_order() {
        let dir = TempDir::new().unwrap();
        write_lists(dir.path());

        let mut config = config(&dir, vec![1]);
        config.sort_leaves = false;
        let written = run(&config).unwrap();

        let json = std::fs::read_to_string(&written[0].1.tree_dump).unwrap();
        let artifact: hook_merkle_sdk::TreeArtifact = serde_json::from_str(&json).unwrap();
        let tree = StandardMerkleTree::load(artifact.to_standard_dump()).unwrap();
        let n = tree.len();
        for (i, value) in tree.values().iter().enumerate() {
            assert_eq!(value.tree_index, 2 * n - 2 - i);
        }
    }

    #[test]
    fn test_missing_lists_dir_fails_before_writing() {
        let dir = TempDir::new().unwrap();
        let result = run(&config(&dir, vec![1]));

        assert!(result.is_err());
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn test_late_chain_configuration_error_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let hooks_file = dir.path().join("hooks.yaml");
        std::fs::write(
            &hooks_file,
            r#"
hooks:
  - name: Deployed
    address: "0x0000000000000000000000000000000000000009"
    args:
      - { name: token, role: token }
  - name: Undeployed
    args:
      - { name: yieldSource, role: yieldSource }
"#,
        )
        .unwrap();

        // chain 1 only feeds Deployed; chain 10 only feeds Undeployed
        let address = |b: u8| ListEntry {
            address: parse_address(&format!("0x{}", format!("{b:02x}").repeat(20))).unwrap(),
        };
        let mut tokens = ChainAddressList::new();
        tokens.insert(1, vec![address(0x11)]);
        let mut yield_sources = ChainAddressList::new();
        yield_sources.insert(10, vec![address(0x21)]);
        AddressLists {
            tokens,
            yield_sources,
            owners: OwnerList(vec![]),
        }
        .write_to_dir(dir.path())
        .unwrap();

        let mut config = config(&dir, vec![1, 10]);
        config.hooks_file = Some(hooks_file);
        let result = run(&config);

        assert!(matches!(
            result,
            Err(CliError::Compiler(CompilerError::MissingHookAddress(name))) if name == "Undeployed"
        ));
        let output_dir = dir.path().join("output");
        assert!(!output_dir.join("root_1.json").exists());
        assert!(!output_dir.join("treeDump_1.json").exists());
        assert!(!output_dir.exists(), "no output should be created on failure");
    }
}
