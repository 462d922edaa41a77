use hook_merkle_sdk::{parse_address_override, CompilerError, HookRegistry};
use std::path::PathBuf;
use tracing::warn;

use crate::error::{CliError, CliResult};

/// Options of the `build-trees` command
#[derive(Debug, Clone)]
pub struct BuildTreesConfig {
    pub lists_dir: PathBuf,
    pub output_dir: PathBuf,
    pub chain_ids: Vec<u64>,
    pub hooks_file: Option<PathBuf>,
    /// Raw `--hook-addresses` value
    pub hook_addresses: Option<String>,
    pub sort_leaves: bool,
}

impl BuildTreesConfig {
    /// Registry from `--hooks-file` (or the defaults) with `--hook-addresses` applied.
    ///
    /// An override with too few addresses is reported and ignored; an override
    /// entry that is not an address is an error.
    pub fn resolve_registry(&self) -> CliResult<HookRegistry> {
        let mut registry = match &self.hooks_file {
            Some(path) => HookRegistry::from_yaml_file(path)?,
            None => HookRegistry::default_hooks(),
        };
        if registry.is_empty() {
            return Err(CliError::InvalidConfig("hook registry is empty".to_string()));
        }

        let Some(raw) = &self.hook_addresses else {
            return Ok(registry);
        };

        let addresses = parse_address_override(raw)?;
        match registry.apply_address_override(&addresses) {
            Ok(()) => Ok(registry),
            Err(CompilerError::HookAddressCount { expected, actual }) => {
                warn!(expected, actual, "Too few hook addresses provided, using defaults");
                Ok(registry)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.chain_ids.is_empty() {
            return Err(CliError::InvalidConfig("at least one chain id is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hook_merkle_sdk::REDEEM_4626_VAULT_HOOK;
    use tempfile::TempDir;

    fn config() -> BuildTreesConfig {
        BuildTreesConfig {
            lists_dir: PathBuf::from("lists"),
            output_dir: PathBuf::from("output"),
            chain_ids: vec![1],
            hooks_file: None,
            hook_addresses: None,
            sort_leaves: true,
        }
    }

    #[test]
    fn test_defaults_without_override() {
        let registry = config().resolve_registry().unwrap();
        assert_eq!(registry, HookRegistry::default_hooks());
    }

    #[test]
    fn test_short_override_falls_back_to_defaults() {
        let mut config = config();
        config.hook_addresses = Some("0x0000000000000000000000000000000000000001".to_string());

        let registry = config.resolve_registry().unwrap();
        assert_eq!(registry, HookRegistry::default_hooks());
    }

    #[test]
    fn test_full_override_applied() {
        let mut config = config();
        config.hook_addresses = Some(
            "0x0000000000000000000000000000000000000001,0x0000000000000000000000000000000000000002,0x0000000000000000000000000000000000000003"
                .to_string(),
        );

        let registry = config.resolve_registry().unwrap();
        assert_eq!(
            registry.hook_address(REDEEM_4626_VAULT_HOOK).unwrap().to_string().to_lowercase(),
            "0x0000000000000000000000000000000000000003"
        );
    }

    #[test]
    fn test_invalid_override_address_is_fatal() {
        let mut config = config();
        config.hook_addresses = Some("0x01,0x02,0x03".to_string());

        assert!(matches!(
            config.resolve_registry(),
            Err(CliError::Compiler(CompilerError::InvalidHookAddress(_)))
        ));
    }

    #[test]
    fn test_hooks_file_is_loaded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hooks.yaml");
        std::fs::write(
            &path,
            "hooks:\n  - name: OnlyHook\n    address: \"0x0000000000000000000000000000000000000009\"\n    args:\n      - { name: owner, role: beneficiary }\n",
        )
        .unwrap();

        let mut config = config();
        config.hooks_file = Some(path);

        let registry = config.resolve_registry().unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["OnlyHook"]);
    }

    #[test]
    fn test_empty_chain_ids_rejected() {
        let mut config = config();
        config.chain_ids.clear();
        assert!(config.validate().is_err());
    }
}
