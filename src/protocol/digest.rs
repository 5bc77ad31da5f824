// src/protocol/digest.rs
//! Authorization digest construction.
//!
//! Builds the domain-separated, versioned digest the validator signs. Every
//! piece of context that could make a signature valid somewhere it should
//! not be (wrong contract, wrong chain, wrong action, wrong protocol
//! version) is folded into the hash before signing:
//!
//! ```text
//! message = keccak256(domain_tag || credit_id || proof_bytes)
//! digest  = keccak256(0x19 || 0x00 || registrar_address || chain_id(32) || message)
//! ```
//!
//! The registrar contract rebuilds exactly this digest on chain and
//! recovers the signer from the submitted signature; any divergence here
//! silently breaks minting.

use crate::protocol::constants::{CREDIT_ISSUING_DOMAIN, DIGEST_PREFIX, DIGEST_VERSION};
use crate::utils::crypto::{hash_data, hash_packed};
use ethers::types::{Address, H256, U256};

/// Builds the final authorization digest for one credit-issuing signature.
///
/// `registrar_address` and `chain_id` pin the signature to a single deployed
/// contract on a single network; `credit_id` and `proof_bytes` pin it to one
/// credit and one piece of evidence.
pub fn build_digest(
    registrar_address: Address,
    chain_id: U256,
    credit_id: H256,
    proof_bytes: &[u8],
) -> H256 {
    let message = hash_packed(&[
        CREDIT_ISSUING_DOMAIN.as_bytes(),
        credit_id.as_bytes(),
        proof_bytes,
    ]);

    let mut chain_id_word = [0u8; 32];
    chain_id.to_big_endian(&mut chain_id_word);

    let mut payload = Vec::with_capacity(2 + 20 + 32 + 32);
    payload.push(DIGEST_PREFIX);
    payload.push(DIGEST_VERSION);
    payload.extend_from_slice(registrar_address.as_bytes());
    payload.extend_from_slice(&chain_id_word);
    payload.extend_from_slice(&message);
    H256(hash_data(&payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_digest() -> H256 {
        build_digest(
            Address::repeat_byte(0x11),
            U256::from(100_009u64),
            H256::repeat_byte(0xaa),
            b"ipfs://Qm123",
        )
    }

    #[test]
    fn fixed_inputs_reproduce_the_digest() {
        assert_eq!(base_digest(), base_digest());
        assert_ne!(base_digest(), H256::zero());
    }

    #[test]
    fn digest_binds_registrar_address() {
        let other = build_digest(
            Address::repeat_byte(0x22),
            U256::from(100_009u64),
            H256::repeat_byte(0xaa),
            b"ipfs://Qm123",
        );
        assert_ne!(base_digest(), other);
    }

    #[test]
    fn digest_binds_chain_id() {
        let other = build_digest(
            Address::repeat_byte(0x11),
            U256::from(100_010u64),
            H256::repeat_byte(0xaa),
            b"ipfs://Qm123",
        );
        assert_ne!(base_digest(), other);
    }

    #[test]
    fn digest_binds_credit_id() {
        let other = build_digest(
            Address::repeat_byte(0x11),
            U256::from(100_009u64),
            H256::repeat_byte(0xab),
            b"ipfs://Qm123",
        );
        assert_ne!(base_digest(), other);
    }

    #[test]
    fn digest_binds_proof_bytes() {
        let other = build_digest(
            Address::repeat_byte(0x11),
            U256::from(100_009u64),
            H256::repeat_byte(0xaa),
            b"ipfs://Qm124",
        );
        assert_ne!(base_digest(), other);
    }
}
