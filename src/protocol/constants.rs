// src/protocol/constants.rs
//! Protocol constants shared by every digest producer and consumer.
//!
//! These values are wire-format law: the signing endpoint, the client
//! submission path, and the on-chain registrar must all use byte-identical
//! constants or signatures stop verifying. Keep them in this one module and
//! nowhere else.

/// Leading byte of the final digest. Marks the payload as a structured
/// signing scheme rather than arbitrary data, preventing cross-protocol
/// signature reuse.
pub const DIGEST_PREFIX: u8 = 0x19;

/// Protocol version byte. A future incompatible digest layout must bump
/// this so old signatures can never authorize under the new rules.
pub const DIGEST_VERSION: u8 = 0x00;

/// Domain tag bound into the message hash. Unique to the credit-issuing
/// action of the registrar; other registrar actions must use their own tag.
pub const CREDIT_ISSUING_DOMAIN: &str = "CarbonCreditRegistrar/IssueCredit";
