/*!
# Hook Merkle Address Lists

This crate provides the JSON schemas for the address lists that feed hook merkle
tree generation, and the readers/writers for them.

## List Files

### Token list (`token_list.json`)
Chain id → array of `{ "address": "0x…", … }`.

### Yield source list (`yield_sources_list.json`)
Chain id → array of `{ "address": "0x…", … }`.

### Owner list (`owner_list.json`)
Flat array of beneficiary addresses, shared by every chain.

## Usage

```rust,no_run
use hook_merkle_lists::{AddressLists, ListResult};

fn example() -> ListResult<()> {
    let lists = AddressLists::read_from_dir("target")?;
    let mainnet_tokens = lists.tokens.get(&1).map(Vec::len).unwrap_or(0);
    println!("{mainnet_tokens} tokens on mainnet");
    Ok(())
}
```
*/

pub mod errors;
pub mod schemas;
pub mod validation;

// Re-export main types for convenience
pub use errors::{ListError, ListResult};
pub use schemas::{
    parse_address, ChainAddressList, ListEntry, OwnerList, OWNER_LIST_FILE, TOKEN_LIST_FILE,
    YIELD_SOURCES_LIST_FILE,
};
pub use validation::{
    read_owner_list, read_token_list, read_yield_sources_list, write_json, AddressLists,
};
