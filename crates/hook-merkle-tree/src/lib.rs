/*!
# Hook Merkle Tree

Binary merkle tree compatible with OpenZeppelin's `StandardMerkleTree`
(`@openzeppelin/merkle-tree`) and the Solidity `MerkleProof` library.

- Leaves: `keccak256(keccak256(abi.encode(bytes)))`
- Internal nodes: `keccak256` of the two children in ascending byte order
- Layout: flat heap array of `2n - 1` nodes, root at index 0
- Dump: `standard-v1` JSON, loadable by the JavaScript library

```rust
use hook_merkle_tree::{StandardMerkleTree, TreeOptions, verify_proof};

let leaves = vec![vec![0xaau8; 40], vec![0xbbu8; 40], vec![0xccu8; 20]];
let tree = StandardMerkleTree::of(leaves.clone(), TreeOptions::default()).unwrap();

let proof = tree.get_proof(1).unwrap();
let leaf_hash = StandardMerkleTree::leaf_hash(&leaves[1]);
assert!(verify_proof(&leaf_hash, &proof, &tree.root()));
```
*/

pub mod builder;
pub mod dump;
pub mod errors;
pub mod hasher;
pub mod proof;
pub mod standard_tree;

pub use builder::{is_valid_merkle_tree, make_merkle_tree};
pub use dump::{
    from_prefixed_hex, hash_from_prefixed_hex, to_prefixed_hex, StandardTreeDump,
    StandardTreeDumpValue, BYTES_LEAF_ENCODING, STANDARD_FORMAT,
};
pub use errors::{TreeError, TreeResult};
pub use hasher::{abi_encode_bytes_leaf, hash_pair, standard_leaf_hash, KeccakSortedHasher};
pub use proof::{batch_verify_proofs, extract_root_from_proof, generate_proof, verify_proof};
pub use standard_tree::{IndexedValue, StandardMerkleTree, TreeOptions};

// Re-export the hasher trait for convenience
pub use rs_merkle::Hasher;
