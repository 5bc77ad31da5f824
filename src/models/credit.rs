// src/models/credit.rs
//! On-chain credit metadata as returned by the registrar's `getMetadata`.
//!
//! Read-only mirror of the contract's metadata tuple; used purely for
//! display. The authoritative copy always lives on chain.

use crate::models::certification::CertificationRecord;
use ethers::abi::{Detokenize, InvalidOutputType, Token};
use ethers::types::{Address, Bytes, H256, U256};
use serde::Serialize;

/// Stored metadata for one minted credit.
#[derive(Debug, Clone, Serialize)]
pub struct CreditMetadata {
    /// Certification the credit was minted under
    pub certification: CertificationRecord,

    /// Salt that disambiguates this mint from others with the same certification
    pub salt: H256,

    /// Unix timestamp of the mint
    pub created_at: U256,

    /// Unix timestamp of retirement; 0 while the credit is active
    pub retired_at: U256,

    /// Account that submitted the mint transaction
    pub minted_by: Address,

    /// Account that retired the credit, if any
    pub retired_by: Address,

    /// Validator whose signature authorized the mint
    pub validated_by: Address,

    /// Normalized validation proof bytes recorded at mint time
    pub validation_proof: Bytes,
}

impl Detokenize for CreditMetadata {
    fn from_tokens(tokens: Vec<Token>) -> Result<Self, InvalidOutputType> {
        let mut tokens = tokens;
        if tokens.len() != 1 {
            return Err(InvalidOutputType(format!(
                "expected single metadata tuple, got {} tokens",
                tokens.len()
            )));
        }
        let fields = match tokens.remove(0) {
            Token::Tuple(fields) if fields.len() == 8 => fields,
            other => {
                return Err(InvalidOutputType(format!(
                    "expected 8-field metadata tuple, got {other:?}"
                )))
            }
        };
        let mut fields = fields.into_iter();
        let mut next = || {
            fields
                .next()
                .ok_or_else(|| InvalidOutputType("truncated metadata tuple".to_string()))
        };

        Ok(Self {
            certification: CertificationRecord::from_token(next()?)?,
            salt: take_bytes32(next()?)?,
            created_at: take_uint(next()?)?,
            retired_at: take_uint(next()?)?,
            minted_by: take_address(next()?)?,
            retired_by: take_address(next()?)?,
            validated_by: take_address(next()?)?,
            validation_proof: take_bytes(next()?)?,
        })
    }
}

fn take_bytes32(token: Token) -> Result<H256, InvalidOutputType> {
    match token {
        Token::FixedBytes(bytes) if bytes.len() == 32 => Ok(H256::from_slice(&bytes)),
        other => Err(InvalidOutputType(format!(
            "expected bytes32 field, got {other:?}"
        ))),
    }
}

fn take_uint(token: Token) -> Result<U256, InvalidOutputType> {
    match token {
        Token::Uint(value) => Ok(value),
        other => Err(InvalidOutputType(format!(
            "expected uint field, got {other:?}"
        ))),
    }
}

fn take_address(token: Token) -> Result<Address, InvalidOutputType> {
    match token {
        Token::Address(value) => Ok(value),
        other => Err(InvalidOutputType(format!(
            "expected address field, got {other:?}"
        ))),
    }
}

fn take_bytes(token: Token) -> Result<Bytes, InvalidOutputType> {
    match token {
        Token::Bytes(bytes) => Ok(Bytes::from(bytes)),
        other => Err(InvalidOutputType(format!(
            "expected bytes field, got {other:?}"
        ))),
    }
}
