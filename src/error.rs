// src/error.rs
//! Error taxonomy for the validator authorization protocol.
//!
//! Every failure inside the signing path is caught at the request boundary
//! and surfaced as a structured result with a human-readable message.
//! Nothing is retried automatically: signing requests are pure functions of
//! their inputs, so retry is always the caller's decision.

use thiserror::Error;

/// Failures that can occur while deriving a credit identity, building an
/// authorization digest, or signing it.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A required top-level request field is missing or structurally invalid.
    ///
    /// The display string is the exact body the HTTP boundary returns for
    /// 400 responses, matching what on-chain tooling expects.
    #[error("Invalid payload")]
    BadRequest,

    /// The validation proof is not a usable text value. In practice this is
    /// a `0x`-prefixed proof whose remainder is not decodable hex.
    #[error("validation proof is not text or a hex literal: {0}")]
    InvalidInputKind(String),

    /// An integer certification field is outside the width the canonical
    /// tuple encoding can represent. Rejected, never silently truncated.
    #[error("{field} out of representable range: {value}")]
    EncodingRange { field: &'static str, value: u64 },

    /// No validator signing key was configured at startup. Fatal for the
    /// request, not for the process.
    #[error("Validator key not configured")]
    KeyNotConfigured,

    /// The underlying signature primitive failed.
    #[error("signing failed: {0}")]
    SigningFailure(String),

    /// A contract address string could not be parsed.
    #[error("invalid contract address: {0}")]
    InvalidAddress(String),

    /// An RPC or contract interaction with the chain failed.
    #[error("chain interaction failed: {0}")]
    Chain(String),

    /// No transaction receipt appeared within the confirmation deadline.
    #[error("transaction not confirmed within {0}s")]
    UpstreamTimeout(u64),
}

impl ProtocolError {
    /// Whether the failure was caused by the caller's input rather than by
    /// this service or its collaborators.
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            ProtocolError::BadRequest
                | ProtocolError::InvalidInputKind(_)
                | ProtocolError::EncodingRange { .. }
        )
    }
}
