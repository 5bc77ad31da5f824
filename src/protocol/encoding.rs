// src/protocol/encoding.rs
//! Canonical certification encoding and hashing.
//!
//! Serializes the eight certification fields with standard ABI tuple
//! encoding (strings length-prefixed, integers as fixed-width big-endian
//! words) and hashes the result with Keccak-256. This matches Solidity's
//! `keccak256(abi.encode(certification))`, so the registrar contract can
//! recompute the identical hash from the tuple it receives at mint time.

use crate::error::ProtocolError;
use crate::models::certification::CertificationRecord;
use crate::utils::crypto::hash_data;
use ethers::abi;
use ethers::types::H256;

/// ABI-encodes a certification record into its canonical byte sequence.
pub fn encode_certification(cert: &CertificationRecord) -> Vec<u8> {
    abi::encode(&[cert.to_token()])
}

/// Encodes and hashes a certification record.
///
/// Validates the record first: integer fields outside their representable
/// range are rejected, never truncated.
pub fn certification_hash(cert: &CertificationRecord) -> Result<H256, ProtocolError> {
    cert.validate()?;
    Ok(H256(hash_data(&encode_certification(cert))))
}
