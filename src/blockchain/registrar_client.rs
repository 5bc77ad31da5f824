// src/blockchain/registrar_client.rs
//! Registrar contract client.
//!
//! Thin interface to the deployed CarbonCreditRegistrar: dispatching `issue`
//! transactions, reading credit metadata, and waiting for confirmations.
//! The signing core never touches this module: verification of submitted
//! signatures is the contract's job, and broadcasting is the client's.

use crate::blockchain::submission::IssueSubmission;
use crate::error::ProtocolError;
use crate::models::credit::CreditMetadata;
use ethers::abi::Abi;
use ethers::contract::Contract;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{TransactionReceipt, H256, U256};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// How often to poll for a transaction receipt.
const RECEIPT_POLL_INTERVAL: Duration = Duration::from_millis(1500);

/// How long to keep polling before giving up.
const RECEIPT_DEADLINE: Duration = Duration::from_secs(90);

/// Client for one deployed registrar contract.
pub struct RegistrarClient {
    /// RPC provider for the registrar's network
    provider: Arc<Provider<Http>>,
    /// Address of the deployed registrar
    registrar_address: ethers::types::Address,
    /// Chain id used when signing transactions
    chain_id: u64,
}

impl RegistrarClient {
    /// Creates a client for the registrar at the given address.
    ///
    /// # Errors
    /// Returns an error if the RPC URL or the contract address is invalid.
    pub fn new(
        rpc_url: &str,
        registrar_address: &str,
        chain_id: u64,
    ) -> Result<Self, ProtocolError> {
        let provider = Provider::<Http>::try_from(rpc_url)
            .map_err(|e| ProtocolError::Chain(e.to_string()))?;
        let registrar_address = registrar_address
            .parse()
            .map_err(|_| ProtocolError::InvalidAddress(registrar_address.to_string()))?;
        Ok(Self {
            provider: Arc::new(provider),
            registrar_address,
            chain_id,
        })
    }

    fn abi() -> Result<Abi, ProtocolError> {
        Abi::load(&include_bytes!("abi/CarbonCreditRegistrar.json")[..])
            .map_err(|e| ProtocolError::Chain(e.to_string()))
    }

    /// Sends an `issue` transaction signed by the submitting wallet.
    ///
    /// # Returns
    /// Transaction hash of the broadcast transaction. Use
    /// [`wait_for_receipt`](Self::wait_for_receipt) to observe confirmation.
    pub async fn issue(
        &self,
        wallet: LocalWallet,
        submission: &IssueSubmission,
    ) -> Result<H256, ProtocolError> {
        let signer = SignerMiddleware::new(
            self.provider.clone(),
            wallet.with_chain_id(self.chain_id),
        );
        let contract = Contract::new(self.registrar_address, Self::abi()?, Arc::new(signer));

        contract
            .method::<_, U256>("issue", submission.to_tokens())
            .map_err(|e| ProtocolError::Chain(e.to_string()))?
            .send()
            .await
            .map(|pending| pending.tx_hash())
            .map_err(|e| ProtocolError::Chain(e.to_string()))
    }

    /// Reads the stored metadata for a minted credit.
    pub async fn get_metadata(&self, credit_id: H256) -> Result<CreditMetadata, ProtocolError> {
        let contract = Contract::new(self.registrar_address, Self::abi()?, self.provider.clone());
        let id = U256::from_big_endian(credit_id.as_bytes());

        contract
            .method::<_, CreditMetadata>("getMetadata", id)
            .map_err(|e| ProtocolError::Chain(e.to_string()))?
            .call()
            .await
            .map_err(|e| ProtocolError::Chain(e.to_string()))
    }

    /// Polls for the receipt of a broadcast transaction.
    ///
    /// Polls every 1.5 seconds for up to 90 seconds, then fails with
    /// [`ProtocolError::UpstreamTimeout`]. Discarding the future cancels the
    /// wait with no side effects.
    pub async fn wait_for_receipt(
        &self,
        tx_hash: H256,
    ) -> Result<TransactionReceipt, ProtocolError> {
        let deadline = Instant::now() + RECEIPT_DEADLINE;
        while Instant::now() < deadline {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| ProtocolError::Chain(e.to_string()))?;
            if let Some(receipt) = receipt {
                return Ok(receipt);
            }
            tokio::time::sleep(RECEIPT_POLL_INTERVAL).await;
        }
        Err(ProtocolError::UpstreamTimeout(RECEIPT_DEADLINE.as_secs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_abi_declares_the_registrar_interface() {
        let abi = RegistrarClient::abi().unwrap();
        assert!(abi.function("issue").is_ok());
        assert!(abi.function("getMetadata").is_ok());
        assert_eq!(abi.function("issue").unwrap().inputs.len(), 5);
    }

    #[test]
    fn invalid_registrar_address_is_rejected() {
        let client = RegistrarClient::new("http://localhost:8545", "not-an-address", 100_009);
        assert!(matches!(client, Err(ProtocolError::InvalidAddress(_))));
    }
}
