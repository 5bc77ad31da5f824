// src/main.rs

//! # CarbonX Validator Service - Main Entry Point
//!
//! Off-chain validator for tokenized carbon credits. Derives a credit's
//! identity from its certification attributes, builds the domain-separated
//! authorization digest, and signs it so the on-chain registrar can verify
//! the validator's approval at mint time.
//!
//! ## Architecture Overview
//! 1. **Protocol Layer**: canonical encoding, identity derivation, proof
//!    normalization, digest construction (pure functions)
//! 2. **Services Layer**: the signing pipeline and its HTTP boundary
//! 3. **Blockchain Layer**: submission assembly and the registrar
//!    contract interface
//!
//! ## Environment Variables
//! - `REGISTRAR_ADDRESS`: Deployed CarbonCreditRegistrar contract address
//! - `CHAIN_ID`: Chain identifier the registrar is deployed on
//! - `VALIDATOR_PRIVATE_KEY`: (Optional) validator signing key; without it
//!   the service runs but rejects signature requests
//! - `BIND_ADDR`: (Optional) listen address (default: 127.0.0.1:3000)

use crate::config::ValidatorConfig;
use crate::services::api_server::ApiServer;
use crate::services::signing_service::SigningService;
use dotenv::dotenv;

// Module declarations (organized by functional domain)
#[allow(dead_code)]
mod blockchain; // registrar contract interface and mint submissions
mod config; // startup configuration
mod error; // protocol error taxonomy
mod models; // data structures
mod protocol; // hashing and digest construction
mod services; // signing pipeline and API
mod utils; // helper functions

/// Main application entry point
///
/// # Initialization Sequence
/// 1. Load environment configuration
/// 2. Build the signing service around the validator key
/// 3. Start the API server
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();
    env_logger::init();

    let config = ValidatorConfig::from_env()?;
    log::info!(
        "registrar {:?} on chain {}",
        config.registrar_address,
        config.chain_id
    );
    if config.signer.is_none() {
        log::warn!("VALIDATOR_PRIVATE_KEY not set; signature requests will be rejected");
    }

    let signing_service =
        SigningService::new(config.registrar_address, config.chain_id, config.signer);
    if let Some(validator) = signing_service.validator_address() {
        log::info!("validator address {validator:?}");
    }

    let api_server = ApiServer::new(signing_service);
    api_server.run(config.bind_addr).await
}
