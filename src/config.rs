// src/config.rs
//! Process-wide configuration for the validator signing service.
//!
//! All configuration is read once at startup from the environment (a `.env`
//! file is honored via `dotenv`) and materialized into an immutable
//! [`ValidatorConfig`] that is handed to the services by constructor. There
//! is no mutable configuration singleton and no key rotation at runtime.
//!
//! ## Environment Variables
//! - `REGISTRAR_ADDRESS`: Deployed CarbonCreditRegistrar contract address (required)
//! - `CHAIN_ID`: Numeric chain identifier the registrar is deployed on (required)
//! - `VALIDATOR_PRIVATE_KEY`: Hex secp256k1 key of the trusted validator
//!   (optional; when absent, signature requests fail with a 500 while the
//!   rest of the service keeps running)
//! - `BIND_ADDR`: Socket address for the HTTP server (default 127.0.0.1:3000)

use anyhow::Context;
use ethers::signers::LocalWallet;
use ethers::types::Address;
use std::net::SocketAddr;

/// Immutable startup configuration for the signing service.
pub struct ValidatorConfig {
    /// Address of the on-chain registrar the signatures are bound to.
    pub registrar_address: Address,

    /// Chain identifier of the network the registrar is deployed on.
    pub chain_id: u64,

    /// Socket address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// The validator signing key, if one was configured.
    pub signer: Option<LocalWallet>,
}

impl ValidatorConfig {
    /// Reads and validates the configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or if any present
    /// variable fails to parse. A missing `VALIDATOR_PRIVATE_KEY` is not an
    /// error; a present but malformed one is.
    pub fn from_env() -> anyhow::Result<Self> {
        let registrar_address = std::env::var("REGISTRAR_ADDRESS")
            .context("REGISTRAR_ADDRESS must be set")?
            .parse::<Address>()
            .context("REGISTRAR_ADDRESS is not a valid address")?;

        let chain_id = std::env::var("CHAIN_ID")
            .context("CHAIN_ID must be set")?
            .parse::<u64>()
            .context("CHAIN_ID is not a valid integer")?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR is not a valid socket address")?;

        let signer = match std::env::var("VALIDATOR_PRIVATE_KEY") {
            Ok(key) => Some(
                key.parse::<LocalWallet>()
                    .context("VALIDATOR_PRIVATE_KEY is not a valid secp256k1 key")?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            registrar_address,
            chain_id,
            bind_addr,
            signer,
        })
    }
}
