use alloy::primitives::{address, Address};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use tracing::{info, warn};

use crate::tree_compiler::{CompilerError, CompilerResult};

/// Semantic role of a hook argument; selects which address list supplies its candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentRole {
    Token,
    YieldSource,
    Beneficiary,
}

impl std::fmt::Display for ArgumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ArgumentRole::*;
        let s = match self {
            Token => "token",
            YieldSource => "yieldSource",
            Beneficiary => "beneficiary",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for ArgumentRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s {
            "token" => Ok(ArgumentRole::Token),
            "yieldSource" | "yield-source" => Ok(ArgumentRole::YieldSource),
            "beneficiary" => Ok(ArgumentRole::Beneficiary),
            _ => Err(format!("Invalid argument role: {s}")),
        }
    }
}

/// One address argument a hook is invoked with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: String,
    pub role: ArgumentRole,
}

impl ArgumentSpec {
    pub fn new(name: impl Into<String>, role: ArgumentRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// A deployed hook contract and the ordered address arguments it accepts.
///
/// Argument order is significant twice: it is the nesting order of combination
/// generation and the byte order of the packed encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSchema {
    pub name: String,
    /// Deployment address; leaves of a hook without one cannot be serialized
    pub address: Option<Address>,
    pub args: Vec<ArgumentSpec>,
}

impl HookSchema {
    pub fn new(
        name: impl Into<String>,
        address: Option<Address>,
        args: Vec<ArgumentSpec>,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            args,
        }
    }
}

// ================================================================================================
// Registry
// ================================================================================================

pub const APPROVE_AND_REDEEM_4626_VAULT_HOOK: &str = "ApproveAndRedeem4626VaultHook";
pub const APPROVE_AND_DEPOSIT_4626_VAULT_HOOK: &str = "ApproveAndDeposit4626VaultHook";
pub const REDEEM_4626_VAULT_HOOK: &str = "Redeem4626VaultHook";

/// Ordered set of hook schemas, unique by name.
///
/// Registry order is the order leaves are pooled in, and the positional order of
/// an address override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookRegistry {
    hooks: Vec<HookSchema>,
}

impl HookRegistry {
    pub fn new(hooks: Vec<HookSchema>) -> CompilerResult<Self> {
        let mut names = HashSet::new();
        for hook in &hooks {
            if !names.insert(hook.name.as_str()) {
                return Err(CompilerError::DuplicateHook(hook.name.clone()));
            }

            let mut arg_names = HashSet::new();
            for arg in &hook.args {
                if !arg_names.insert(arg.name.as_str()) {
                    return Err(CompilerError::DuplicateArgument {
                        hook: hook.name.clone(),
                        argument: arg.name.clone(),
                    });
                }
            }
        }

        Ok(Self { hooks })
    }

    /// The three ERC-4626 vault hooks with their default deployment addresses
    pub fn default_hooks() -> Self {
        use ArgumentRole::*;

        Self {
            hooks: vec![
                HookSchema::new(
                    APPROVE_AND_REDEEM_4626_VAULT_HOOK,
                    Some(address!("66e1Ed81804cd6c574f18cA88123B3284868D845")),
                    vec![
                        ArgumentSpec::new("yieldSource", YieldSource),
                        ArgumentSpec::new("token", Token),
                        ArgumentSpec::new("owner", Beneficiary),
                    ],
                ),
                HookSchema::new(
                    APPROVE_AND_DEPOSIT_4626_VAULT_HOOK,
                    Some(address!("95C5A10d9C6d27985b7bad85635060C0AEcBf356")),
                    vec![
                        ArgumentSpec::new("yieldSource", YieldSource),
                        ArgumentSpec::new("token", Token),
                    ],
                ),
                HookSchema::new(
                    REDEEM_4626_VAULT_HOOK,
                    Some(address!("7692d9e0d10799199c8285E4c99E1fBC5C64fBf3")),
                    vec![
                        ArgumentSpec::new("yieldSource", YieldSource),
                        ArgumentSpec::new("owner", Beneficiary),
                    ],
                ),
            ],
        }
    }

    /// Load a registry from a YAML file (see [`HookRegistry::from_yaml_str`])
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> CompilerResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let registry = Self::from_yaml_str(&content)?;

        info!(
            path = %path.as_ref().display(),
            hooks = registry.len(),
            "Loaded hook registry"
        );

        Ok(registry)
    }

    /// Parse a registry from YAML:
    ///
    /// ```yaml
    /// hooks:
    ///   - name: Redeem4626VaultHook
    ///     address: "0x7692d9e0d10799199c8285E4c99E1fBC5C64fBf3"
    ///     args:
    ///       - { name: yieldSource, role: yieldSource }
    ///       - { name: owner, role: beneficiary }
    /// ```
    ///
    /// `address` may be omitted and supplied later through an override.
    pub fn from_yaml_str(yaml: &str) -> CompilerResult<Self> {
        let file: HookRegistryFile = serde_yaml::from_str(yaml)?;

        let mut hooks = Vec::with_capacity(file.hooks.len());
        for entry in file.hooks {
            let address = entry
                .address
                .as_deref()
                .map(|s| {
                    Address::from_str(s.trim())
                        .map_err(|_| CompilerError::InvalidHookAddress(s.to_string()))
                })
                .transpose()?;

            let mut args = Vec::with_capacity(entry.args.len());
            for arg in entry.args {
                let role = arg.role.parse().map_err(|_| CompilerError::UnknownRole {
                    hook: entry.name.clone(),
                    argument: arg.name.clone(),
                    role: arg.role.clone(),
                })?;
                args.push(ArgumentSpec::new(arg.name, role));
            }

            hooks.push(HookSchema::new(entry.name, address, args));
        }

        Self::new(hooks)
    }

    pub fn get(&self, name: &str) -> Option<&HookSchema> {
        self.hooks.iter().find(|hook| hook.name == name)
    }

    /// Deployment address of a hook, failing if the hook or its address is unknown
    pub fn hook_address(&self, name: &str) -> CompilerResult<Address> {
        let hook = self
            .get(name)
            .ok_or_else(|| CompilerError::UnknownHook(name.to_string()))?;

        hook.address
            .ok_or_else(|| CompilerError::MissingHookAddress(name.to_string()))
    }

    pub fn hooks(&self) -> &[HookSchema] {
        &self.hooks
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hooks.iter().map(|hook| hook.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Replace hook addresses positionally, in registry order.
    ///
    /// Fewer addresses than hooks is [`CompilerError::HookAddressCount`] and leaves
    /// the registry untouched; extra addresses are ignored.
    pub fn apply_address_override(&mut self, addresses: &[Address]) -> CompilerResult<()> {
        if addresses.len() < self.hooks.len() {
            return Err(CompilerError::HookAddressCount {
                expected: self.hooks.len(),
                actual: addresses.len(),
            });
        }
        if addresses.len() > self.hooks.len() {
            warn!(
                expected = self.hooks.len(),
                actual = addresses.len(),
                "Ignoring extra hook addresses"
            );
        }

        for (hook, address) in self.hooks.iter_mut().zip(addresses) {
            info!(hook = %hook.name, address = %address, "Using provided hook address");
            hook.address = Some(*address);
        }

        Ok(())
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}

/// Parse a comma-separated address override such as `0xabc…,0xdef…,0x123…`
pub fn parse_address_override(arg: &str) -> CompilerResult<Vec<Address>> {
    arg.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Address::from_str(s).map_err(|_| CompilerError::InvalidHookAddress(s.to_string())))
        .collect()
}

#[derive(Debug, Deserialize)]
struct HookRegistryFile {
    hooks: Vec<HookSchemaEntry>,
}

#[derive(Debug, Deserialize)]
struct HookSchemaEntry {
    name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    args: Vec<ArgumentSpecEntry>,
}

#[derive(Debug, Deserialize)]
struct ArgumentSpecEntry {
    name: String,
    role: String,
}
