// src/blockchain/submission.rs
//! Mint submission assembly.
//!
//! Packages the certification tuple, recipient, salt, normalized proof
//! bytes, and validator signature into the exact argument shape of the
//! registrar's `issue` entry point. The salt, proof, and signature are
//! carried verbatim from the [`SignedAuthorization`]; re-deriving or
//! re-normalizing any of them on this side would break the digest the
//! registrar reconstructs.

use crate::models::certification::CertificationRecord;
use crate::services::signing_service::SignedAuthorization;
use ethers::abi::Token;
use ethers::types::{Address, Bytes, H256};
use rand::RngCore;

/// Generates a fresh 32-byte salt for one mint attempt.
///
/// Uniqueness per attempt is the caller's obligation; a reused salt with an
/// identical certification reproduces the same credit identity.
pub fn random_salt() -> H256 {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    H256(bytes)
}

/// One fully assembled call to the registrar's `issue` entry point.
#[derive(Debug, Clone)]
pub struct IssueSubmission {
    /// Certification tuple in canonical 8-field order
    pub certification: CertificationRecord,

    /// Recipient of the minted credit; the zero address means "mint to sender"
    pub recipient: Address,

    /// Salt the signing service derived the identity with
    pub salt: H256,

    /// Normalized proof bytes exactly as signed
    pub validation_proof: Bytes,

    /// Validator's 65-byte signature over the authorization digest
    pub signature: Bytes,
}

impl IssueSubmission {
    /// Assembles a submission from a signed authorization.
    ///
    /// # Arguments
    /// * `certification` - The certification the signature was requested for
    /// * `recipient` - Credit recipient; `None` mints to the transaction sender
    /// * `auth` - Signature bundle returned by the signing service
    pub fn from_authorization(
        certification: CertificationRecord,
        recipient: Option<Address>,
        auth: &SignedAuthorization,
    ) -> Self {
        Self {
            certification,
            recipient: recipient.unwrap_or_else(Address::zero),
            salt: auth.salt,
            validation_proof: auth.validation_proof.clone(),
            signature: Bytes::from(auth.signature.to_vec()),
        }
    }

    /// Converts the submission into the `issue` argument tokens, in the
    /// exact order the registrar ABI declares them.
    pub fn to_tokens(&self) -> (Token, Token, Token, Token, Token) {
        (
            self.certification.to_token(),
            Token::Address(self.recipient),
            Token::FixedBytes(self.salt.as_bytes().to_vec()),
            Token::Bytes(self.validation_proof.to_vec()),
            Token::Bytes(self.signature.to_vec()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::certification::Standard;
    use crate::services::signing_service::SigningService;
    use ethers::signers::LocalWallet;

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

    async fn sample_authorization() -> SignedAuthorization {
        let wallet = LocalWallet::new(&mut rand::thread_rng());
        SigningService::new(Address::repeat_byte(0x11), 100_009, Some(wallet))
            .authorize(&sample_cert(), random_salt(), "ipfs://Qm123")
            .await
            .unwrap()
    }

    #[test]
    fn random_salts_do_not_repeat() {
        assert_ne!(random_salt(), random_salt());
    }

    #[tokio::test]
    async fn submission_carries_authorization_values_verbatim() {
        let auth = sample_authorization().await;
        let submission = IssueSubmission::from_authorization(sample_cert(), None, &auth);

        assert_eq!(submission.recipient, Address::zero());
        assert_eq!(submission.salt, auth.salt);
        assert_eq!(submission.validation_proof, auth.validation_proof);
        assert_eq!(submission.signature.len(), 65);
    }

    #[tokio::test]
    async fn tokens_follow_registrar_argument_order() {
        let auth = sample_authorization().await;
        let recipient = Address::repeat_byte(0x07);
        let submission =
            IssueSubmission::from_authorization(sample_cert(), Some(recipient), &auth);

        let (cert, rec, salt, proof, sig) = submission.to_tokens();
        assert!(matches!(cert, Token::Tuple(fields) if fields.len() == 8));
        assert_eq!(rec, Token::Address(recipient));
        assert_eq!(salt, Token::FixedBytes(auth.salt.as_bytes().to_vec()));
        assert_eq!(proof, Token::Bytes(b"ipfs://Qm123".to_vec()));
        assert!(matches!(sig, Token::Bytes(bytes) if bytes.len() == 65));
    }
}
