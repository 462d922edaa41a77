/*!
# Hook Merkle SDK

Turns hook schemas and address lists into one merkle tree per chain committing to
every permitted hook call:

1. [`argument_expander::expand`]: Cartesian product of each argument's candidates
2. [`argument_encoder::encode`]: `abi.encodePacked` of the addresses in schema order
3. [`compile_hook_tree`]: pool every hook's leaves and build the standard tree
4. [`write_artifacts`]: `root_<chainId>.json` and the annotated `treeDump_<chainId>.json`

```rust,no_run
use hook_merkle_lists::AddressLists;
use hook_merkle_sdk::{
    compile_hook_tree, write_artifacts, AddressCatalog, CompilerResult, HookRegistry,
};
use hook_merkle_tree::TreeOptions;

fn example() -> CompilerResult<()> {
    let registry = HookRegistry::default_hooks();
    let catalog = AddressCatalog::from_lists(&AddressLists::read_from_dir("lists")?);

    if let Some(compiled) = compile_hook_tree(&registry, &catalog, 1, TreeOptions::default())? {
        write_artifacts(&compiled, &registry, "output")?;
    }
    Ok(())
}
```
*/

mod address_catalog;
pub mod argument_encoder;
pub mod argument_expander;
mod hook_schema;
mod tree_compiler;

pub use address_catalog::AddressCatalog;
pub use argument_expander::AddressTuple;
pub use hook_schema::*;
pub use tree_compiler::*;
