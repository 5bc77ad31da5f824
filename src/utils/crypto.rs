// src/utils/crypto.rs
//! Cryptographic utilities for the authorization protocol.
//!
//! Uses Keccak-256 (Ethereum's standard hash function) for all operations,
//! so every hash computed here can be recomputed verbatim by the on-chain
//! registrar with Solidity's `keccak256()`.

use ethers::utils::keccak256;

/// Computes a Keccak-256 hash of the input data.
///
/// # Arguments
/// * `data` - Binary data to hash (as bytes slice)
///
/// # Returns
/// Fixed-size 32-byte array (`[u8; 32]`) containing the hash.
pub fn hash_data(data: &[u8]) -> [u8; 32] {
    keccak256(data)
}

/// Computes a Keccak-256 hash over the packed (non-length-prefixed)
/// concatenation of the given parts.
///
/// This is the Rust counterpart of Solidity's
/// `keccak256(abi.encodePacked(...))`: parts are laid out back to back with
/// no padding and no length prefixes, then hashed as one buffer.
pub fn hash_packed(parts: &[&[u8]]) -> [u8; 32] {
    let len = parts.iter().map(|part| part.len()).sum();
    let mut buf = Vec::with_capacity(len);
    for part in parts {
        buf.extend_from_slice(part);
    }
    keccak256(&buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_hash_matches_flat_hash() {
        let flat = hash_data(b"hello world");
        let packed = hash_packed(&[b"hello", b" ", b"world"]);
        assert_eq!(flat, packed);
    }

    #[test]
    fn packed_hash_is_order_sensitive() {
        assert_ne!(hash_packed(&[b"ab", b"cd"]), hash_packed(&[b"cd", b"ab"]));
    }
}
