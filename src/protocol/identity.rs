// src/protocol/identity.rs
//! Credit identity derivation.
//!
//! A credit's identity is a pure function of its certification hash and a
//! caller-supplied 32-byte salt; there is no counter and no database. The
//! client, this service, and the registrar contract each derive the value
//! independently and must agree bit for bit.
//!
//! Salt uniqueness is the caller's responsibility: reusing a salt with an
//! identical certification reproduces the same identity.

use crate::utils::crypto::hash_packed;
use ethers::types::H256;

/// Derives the credit identity from a certification hash and salt.
///
/// Computed as `keccak256(cert_hash || salt)` over the packed 64-byte
/// concatenation, matching the contract's
/// `keccak256(abi.encodePacked(certHash, salt))`.
pub fn derive_id(cert_hash: H256, salt: H256) -> H256 {
    H256(hash_packed(&[cert_hash.as_bytes(), salt.as_bytes()]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_yield_identical_identity() {
        let cert_hash = H256::repeat_byte(0xab);
        let salt = H256::repeat_byte(0x01);
        assert_eq!(derive_id(cert_hash, salt), derive_id(cert_hash, salt));
    }

    #[test]
    fn salt_changes_the_identity() {
        let cert_hash = H256::repeat_byte(0xab);
        let zero_salt = H256::zero();
        let mut one = [0u8; 32];
        one[31] = 0x01;
        let one_salt = H256(one);

        let id_zero = derive_id(cert_hash, zero_salt);
        let id_one = derive_id(cert_hash, one_salt);
        assert_ne!(id_zero, H256::zero());
        assert_ne!(id_zero, id_one);
    }

    #[test]
    fn cert_hash_changes_the_identity() {
        let salt = H256::repeat_byte(0x55);
        assert_ne!(
            derive_id(H256::repeat_byte(0x01), salt),
            derive_id(H256::repeat_byte(0x02), salt)
        );
    }

    #[test]
    fn swapping_cert_hash_and_salt_changes_the_identity() {
        let a = H256::repeat_byte(0x0a);
        let b = H256::repeat_byte(0x0b);
        assert_ne!(derive_id(a, b), derive_id(b, a));
    }
}
