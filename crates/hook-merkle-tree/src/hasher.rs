use alloy::primitives::{keccak256, Bytes};
use alloy::sol_types::SolValue;
use rs_merkle::Hasher;

/// Merkle tree hasher matching OpenZeppelin's `MerkleProof` library.
///
/// ## Hashing Scheme
///
/// - **Leaf nodes**: `keccak256(keccak256(abi.encode(leaf)))` - see [`standard_leaf_hash`]
/// - **Internal nodes**: `keccak256(min(a, b) || max(a, b))`
/// - **Child ordering**: the pair is sorted by byte value before concatenation, so a
///   proof is just the list of sibling hashes with no left/right flags
///
/// ## Domain Separation
///
/// OpenZeppelin trees carry no prefix byte. Leaves are instead hashed twice: an
/// internal node preimage is always exactly 64 bytes, while a leaf hash is the
/// keccak of a 32-byte digest, so a leaf hash can never be replayed as an
/// internal node (and vice versa).
#[derive(Clone, Debug)]
pub struct KeccakSortedHasher;

impl Hasher for KeccakSortedHasher {
    type Hash = [u8; 32];

    fn hash(data: &[u8]) -> [u8; 32] {
        keccak256(data).0
    }

    fn concat_and_hash(left: &Self::Hash, right: Option<&Self::Hash>) -> Self::Hash {
        match right {
            Some(right_hash) => hash_pair(left, right_hash),
            // lone node carries up unchanged
            None => *left,
        }
    }
}

/// Hash two nodes in ascending byte order: `keccak256(min(a, b) || max(a, b))`.
pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut preimage = [0u8; 64];
    if a <= b {
        preimage[..32].copy_from_slice(a);
        preimage[32..].copy_from_slice(b);
    } else {
        preimage[..32].copy_from_slice(b);
        preimage[32..].copy_from_slice(a);
    }
    KeccakSortedHasher::hash(&preimage)
}

/// ABI-encode a leaf value as the single-element parameter list `(bytes)`.
///
/// Produces `0x20 || len || data` with `data` right-padded to a 32-byte boundary,
/// identical to `abi.encode(value)` in Solidity for a `bytes` value.
pub fn abi_encode_bytes_leaf(value: &[u8]) -> Vec<u8> {
    (Bytes::copy_from_slice(value),).abi_encode_params()
}

/// Leaf hash of the OpenZeppelin standard tree with `leafEncoding = ["bytes"]`.
pub fn standard_leaf_hash(value: &[u8]) -> [u8; 32] {
    let encoded = abi_encode_bytes_leaf(value);
    KeccakSortedHasher::hash(&KeccakSortedHasher::hash(&encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_node_ordering() {
        let hash1 = [1u8; 32];
        let hash2 = [2u8; 32];

        let result1 = KeccakSortedHasher::concat_and_hash(&hash1, Some(&hash2));
        let result2 = KeccakSortedHasher::concat_and_hash(&hash2, Some(&hash1));

        assert_eq!(
            result1, result2,
            "Hash ordering should be consistent regardless of input order"
        );

        let mut manual = Vec::with_capacity(64);
        manual.extend_from_slice(&hash1); // hash1 < hash2 lexicographically
        manual.extend_from_slice(&hash2);
        assert_eq!(result1, keccak256(&manual).0, "Hash should match manual calculation");
    }

    #[test]
    fn test_missing_right_sibling_propagates() {
        let hash = [7u8; 32];
        assert_eq!(KeccakSortedHasher::concat_and_hash(&hash, None), hash);
    }

    #[test]
    fn test_abi_encoding_layout() {
        let value = [0xabu8; 20];
        let encoded = abi_encode_bytes_leaf(&value);

        // offset word + length word + one padded data word
        assert_eq!(encoded.len(), 96);
        assert_eq!(encoded[31], 0x20, "first word is the offset to the bytes payload");
        assert!(encoded[..31].iter().all(|b| *b == 0));
        assert_eq!(encoded[63], 20, "second word is the payload length");
        assert!(encoded[32..63].iter().all(|b| *b == 0));
        assert_eq!(&encoded[64..84], &value);
        assert!(encoded[84..].iter().all(|b| *b == 0), "payload is right-padded");
    }

    #[test]
    fn test_abi_encoding_exact_word_and_empty() {
        assert_eq!(abi_encode_bytes_leaf(&[0x11u8; 32]).len(), 96);
        assert_eq!(abi_encode_bytes_leaf(&[0x11u8; 40]).len(), 128);

        let empty = abi_encode_bytes_leaf(&[]);
        assert_eq!(empty.len(), 64, "empty bytes encode as offset + zero length");
        assert_eq!(empty[31], 0x20);
        assert!(empty[32..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_leaf_hash_is_double_keccak() {
        let value = [0x42u8; 40];
        let encoded = abi_encode_bytes_leaf(&value);
        let expected = keccak256(keccak256(&encoded)).0;

        assert_eq!(standard_leaf_hash(&value), expected);
        assert_ne!(
            standard_leaf_hash(&value),
            keccak256(&encoded).0,
            "leaf hash must differ from a single keccak of the encoding"
        );
    }

    #[test]
    fn test_leaf_hash_distinguishes_values() {
        let a = standard_leaf_hash(&[0x01u8; 20]);
        let b = standard_leaf_hash(&[0x02u8; 20]);
        let c = standard_leaf_hash(&[0x01u8; 40]);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }
}
