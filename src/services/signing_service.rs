// src/services/signing_service.rs
//! Validator Signing Service
//!
//! Drives the full authorization pipeline for one request: validate and
//! hash the certification, derive the credit identity, normalize the proof,
//! build the domain-separated digest, and sign it with the process-wide
//! validator key.
//!
//! The service holds no mutable state; the key, registrar address, and
//! chain id are fixed at construction, so requests may run concurrently
//! with unbounded parallelism and identical requests always produce
//! identical outputs.

use crate::error::ProtocolError;
use crate::models::certification::CertificationRecord;
use crate::protocol::digest::build_digest;
use crate::protocol::encoding::certification_hash;
use crate::protocol::identity::derive_id;
use crate::protocol::proof::normalize_proof;
use ethers::signers::{LocalWallet, Signer};
use ethers::types::{Address, Bytes, Signature, H256, U256};

/// Everything a client needs to submit an authorized mint transaction.
///
/// Created per signing request and never persisted by this service.
#[derive(Debug, Clone)]
pub struct SignedAuthorization {
    /// Validator's signature over the authorization digest (65 bytes r||s||v)
    pub signature: Signature,

    /// Derived credit identity the signature authorizes
    pub credit_id: H256,

    /// Address of the validator key that produced the signature
    pub validated_by: Address,

    /// Salt the identity was derived with, echoed for the mint call
    pub salt: H256,

    /// Normalized proof bytes, echoed for the mint call
    pub validation_proof: Bytes,
}

/// Stateless signing service bound to one registrar deployment.
pub struct SigningService {
    /// Registrar contract the signatures are bound to
    registrar_address: Address,

    /// Chain the registrar is deployed on
    chain_id: u64,

    /// Validator key, loaded once at startup; `None` means every signing
    /// request fails with a configuration error while the process stays up
    signer: Option<LocalWallet>,
}

impl SigningService {
    /// Creates a signing service for one registrar deployment.
    pub fn new(registrar_address: Address, chain_id: u64, signer: Option<LocalWallet>) -> Self {
        Self {
            registrar_address,
            chain_id,
            signer,
        }
    }

    /// Address of the configured validator key, if any.
    pub fn validator_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|wallet| wallet.address())
    }

    /// Runs the authorization pipeline and signs the resulting digest.
    ///
    /// # Errors
    /// - [`ProtocolError::BadRequest`] / [`ProtocolError::EncodingRange`]
    ///   for invalid certification fields
    /// - [`ProtocolError::InvalidInputKind`] for an undecodable hex proof
    /// - [`ProtocolError::KeyNotConfigured`] when no validator key is loaded
    /// - [`ProtocolError::SigningFailure`] if the signature primitive fails
    pub async fn authorize(
        &self,
        certification: &CertificationRecord,
        salt: H256,
        validation_proof: &str,
    ) -> Result<SignedAuthorization, ProtocolError> {
        let cert_hash = certification_hash(certification)?;
        let credit_id = derive_id(cert_hash, salt);
        let proof_bytes = normalize_proof(validation_proof)?;
        let digest = build_digest(
            self.registrar_address,
            U256::from(self.chain_id),
            credit_id,
            &proof_bytes,
        );

        let signer = self.signer.as_ref().ok_or(ProtocolError::KeyNotConfigured)?;

        // EIP-191 personal-message wrapping happens inside sign_message; the
        // registrar applies the same prefix before recovering the signer.
        let signature = signer
            .sign_message(digest.as_bytes())
            .await
            .map_err(|e| ProtocolError::SigningFailure(e.to_string()))?;

        Ok(SignedAuthorization {
            signature,
            credit_id,
            validated_by: signer.address(),
            salt,
            validation_proof: Bytes::from(proof_bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::certification::Standard;

    fn sample_cert() -> CertificationRecord {
        CertificationRecord {
            project_name: "Solar Farm Alpha".to_string(),
            issuer_name: "Green Energy Corp".to_string(),
            location: "California, USA".to_string(),
            methodology: "ACM0002".to_string(),
            amount: 1000,
            vintage_year: 2024,
            expiry: 0,
            standard: Standard::Verra,
        }
    }

    fn service_with_key() -> SigningService {
        let wallet = LocalWallet::new(&mut rand::thread_rng());
        SigningService::new(Address::repeat_byte(0x11), 100_009, Some(wallet))
    }

    #[tokio::test]
    async fn signature_recovers_the_validator_address() {
        let service = service_with_key();
        let validator = service.validator_address().unwrap();

        let auth = service
            .authorize(&sample_cert(), H256::zero(), "ipfs://Qm123")
            .await
            .unwrap();

        let digest = build_digest(
            Address::repeat_byte(0x11),
            U256::from(100_009u64),
            auth.credit_id,
            auth.validation_proof.as_ref(),
        );
        let recovered = auth.signature.recover(digest.as_bytes()).unwrap();
        assert_eq!(recovered, validator);
        assert_eq!(auth.validated_by, validator);
    }

    #[tokio::test]
    async fn identity_is_stable_across_service_instances() {
        // Client-side and server-side derivations must agree bit for bit;
        // two independently constructed services stand in for the two sides.
        let a = service_with_key()
            .authorize(&sample_cert(), H256::zero(), "ipfs://Qm123")
            .await
            .unwrap();
        let b = service_with_key()
            .authorize(&sample_cert(), H256::zero(), "ipfs://Qm123")
            .await
            .unwrap();
        assert_eq!(a.credit_id, b.credit_id);
        assert_ne!(a.credit_id, H256::zero());
    }

    #[tokio::test]
    async fn salt_separates_identities_for_one_certification() {
        let service = service_with_key();
        let mut one = [0u8; 32];
        one[31] = 0x01;

        let zero_salt = service
            .authorize(&sample_cert(), H256::zero(), "ipfs://Qm123")
            .await
            .unwrap();
        let one_salt = service
            .authorize(&sample_cert(), H256(one), "ipfs://Qm123")
            .await
            .unwrap();
        assert_ne!(zero_salt.credit_id, one_salt.credit_id);
    }

    #[tokio::test]
    async fn missing_key_is_a_configuration_error() {
        let service = SigningService::new(Address::repeat_byte(0x11), 100_009, None);
        let err = service
            .authorize(&sample_cert(), H256::zero(), "ipfs://Qm123")
            .await
            .unwrap_err();
        assert!(matches!(err, ProtocolError::KeyNotConfigured));
    }

    #[tokio::test]
    async fn hex_and_text_proofs_yield_different_digest_inputs() {
        let service = service_with_key();
        let text = service
            .authorize(&sample_cert(), H256::zero(), "ipfs://Qm123")
            .await
            .unwrap();
        let hex = service
            .authorize(&sample_cert(), H256::zero(), "0xdeadbeef")
            .await
            .unwrap();
        assert_eq!(text.validation_proof.as_ref(), b"ipfs://Qm123");
        assert_eq!(hex.validation_proof.as_ref(), &[0xde, 0xad, 0xbe, 0xef]);
        // Same credit, different evidence: identity matches, signatures differ.
        assert_eq!(text.credit_id, hex.credit_id);
        assert_ne!(text.signature, hex.signature);
    }
}
