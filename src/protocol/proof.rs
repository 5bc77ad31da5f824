// src/protocol/proof.rs
//! Validation proof normalization.
//!
//! A validation proof is an opaque off-chain reference (an IPFS URI, a URL,
//! any string). Before it enters a digest it is canonicalized to raw bytes:
//! a `0x`-prefixed string is decoded as hex, anything else is taken as
//! UTF-8. The proof is never parsed or fetched.
//!
//! The same normalization must run wherever proof bytes are consumed
//! (digest construction here, transaction submission on the client),
//! otherwise the signed digest and the digest the registrar reconstructs
//! diverge and the signature fails verification.

use crate::error::ProtocolError;
use ethers::utils::hex;

/// Canonicalizes a proof string into raw bytes.
///
/// # Errors
/// [`ProtocolError::InvalidInputKind`] if the input carries the `0x` hex
/// prefix but the remainder is not decodable hex.
pub fn normalize_proof(proof: &str) -> Result<Vec<u8>, ProtocolError> {
    match proof.strip_prefix("0x") {
        Some(rest) => {
            hex::decode(rest).map_err(|e| ProtocolError::InvalidInputKind(e.to_string()))
        }
        None => Ok(proof.as_bytes().to_vec()),
    }
}

/// Renders normalized proof bytes as the `0x` hex string the HTTP response
/// and the registrar `bytes` argument carry.
pub fn proof_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_proof_becomes_utf8_bytes() {
        let bytes = normalize_proof("ipfs://Qm123").unwrap();
        assert_eq!(bytes, b"ipfs://Qm123");
    }

    #[test]
    fn hex_proof_is_decoded() {
        let bytes = normalize_proof("0xdeadbeef").unwrap();
        assert_eq!(bytes, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn empty_hex_proof_is_empty_bytes() {
        assert!(normalize_proof("0x").unwrap().is_empty());
    }

    #[test]
    fn undecodable_hex_proof_is_rejected() {
        assert!(matches!(
            normalize_proof("0xnothex"),
            Err(ProtocolError::InvalidInputKind(_))
        ));
        assert!(normalize_proof("0xabc").is_err()); // odd length
    }

    #[test]
    fn normalization_is_idempotent_under_rehexing() {
        for proof in ["ipfs://Qm123", "0xdeadbeef", "https://example.com/evidence"] {
            let once = normalize_proof(proof).unwrap();
            let again = normalize_proof(&proof_to_hex(&once)).unwrap();
            assert_eq!(once, again);
        }
    }
}
