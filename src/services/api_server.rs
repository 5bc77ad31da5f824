// src/services/api_server.rs
//! HTTP boundary for the validator signing service.
//!
//! Exposes a single JSON endpoint:
//! - POST /api/signature/request: validate the payload, run the
//!   authorization pipeline, and return the signature bundle
//!
//! The API is built with Axum. Request bodies are strongly typed and checked
//! at this boundary before any hashing happens; a request missing any of its
//! three top-level fields is rejected with the exact body
//! `{"success":false,"error":"Invalid payload"}` that client tooling matches
//! on.

use crate::error::ProtocolError;
use crate::models::certification::{CertificationRecord, Standard};
use crate::protocol::proof::proof_to_hex;
use crate::services::signing_service::SigningService;
use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use ethers::types::H256;
use ethers::utils::{hex, to_checksum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

// API request and response structures

/// Certification fields as they arrive on the wire. The `standard` code is
/// kept raw here so an unknown code produces this service's own 400 rather
/// than a deserialization rejection.
#[derive(Serialize, Deserialize)]
struct CertificationPayload {
    project_name: String,
    issuer_name: String,
    location: String,
    methodology: String,
    amount: u64,
    vintage_year: u16,
    expiry: u64,
    standard: u8,
}

impl CertificationPayload {
    fn into_record(self) -> Result<CertificationRecord, ProtocolError> {
        Ok(CertificationRecord {
            project_name: self.project_name,
            issuer_name: self.issuer_name,
            location: self.location,
            methodology: self.methodology,
            amount: self.amount,
            vintage_year: self.vintage_year,
            expiry: self.expiry,
            standard: Standard::try_from(self.standard)?,
        })
    }
}

/// Request payload for a validator signature. Top-level fields are optional
/// in the schema so their absence is reported by this handler, not by the
/// JSON extractor.
#[derive(Serialize, Deserialize)]
struct SignatureRequest {
    certification: Option<CertificationPayload>,
    salt: Option<String>,
    #[serde(rename = "validationProof")]
    validation_proof: Option<String>,
}

/// Successful signature response
#[derive(Serialize, Deserialize)]
struct SignatureResponse {
    success: bool,
    signature: String,
    #[serde(rename = "creditId")]
    credit_id: String,
    #[serde(rename = "validatedBy")]
    validated_by: String,
    salt: String,
    #[serde(rename = "validationProof")]
    validation_proof: String,
}

/// Structured failure response
#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    success: bool,
    error: String,
}

/// API server state holding the signing service.
#[derive(Clone)]
pub struct ApiServer {
    /// Stateless signing pipeline shared across requests
    signing_service: Arc<SigningService>,
}

impl ApiServer {
    /// Creates a new instance of the API server.
    pub fn new(signing_service: SigningService) -> Self {
        ApiServer {
            signing_service: Arc::new(signing_service),
        }
    }

    /// Builds the router with all API routes configured.
    pub fn router(&self) -> Router {
        Router::new()
            .route(
                "/api/signature/request",
                post(Self::request_signature_handler),
            )
            .with_state(Arc::new(self.clone()))
    }

    /// Starts the API server and begins listening for requests.
    ///
    /// # Arguments
    /// * `addr` - Socket address to bind to (e.g., "127.0.0.1:3000")
    pub async fn run(&self, addr: SocketAddr) -> anyhow::Result<()> {
        let app = self.router();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        log::info!("validator signing service listening on http://{addr}");
        axum::serve(listener, app).await?;
        Ok(())
    }

    /// Issues a validator signature for a mint request.
    ///
    /// # Endpoint
    /// POST /api/signature/request
    ///
    /// # Request Body
    /// JSON payload containing certification fields, a 32-byte hex salt,
    /// and a validation proof string
    ///
    /// # Responses
    /// - 200 OK: signature, credit id, validator address, salt, normalized proof
    /// - 400 Bad Request: missing or malformed fields
    /// - 500 Internal Server Error: validator key not configured, or signing failed
    async fn request_signature_handler(
        State(state): State<Arc<ApiServer>>,
        Json(payload): Json<SignatureRequest>,
    ) -> Response {
        let (Some(certification), Some(salt), Some(validation_proof)) =
            (payload.certification, payload.salt, payload.validation_proof)
        else {
            return failure(StatusCode::BAD_REQUEST, "Invalid payload");
        };

        // An empty proof reference authorizes nothing; treat it as missing.
        if validation_proof.is_empty() {
            return failure(StatusCode::BAD_REQUEST, "Invalid payload");
        }

        let Ok(salt_bytes) = salt.parse::<H256>() else {
            return failure(StatusCode::BAD_REQUEST, "Invalid payload");
        };

        let record = match certification.into_record() {
            Ok(record) => record,
            Err(e) => return failure(StatusCode::BAD_REQUEST, &e.to_string()),
        };

        match state
            .signing_service
            .authorize(&record, salt_bytes, &validation_proof)
            .await
        {
            Ok(auth) => (
                StatusCode::OK,
                Json(SignatureResponse {
                    success: true,
                    signature: format!("0x{}", auth.signature),
                    credit_id: format!("0x{}", hex::encode(auth.credit_id.as_bytes())),
                    validated_by: to_checksum(&auth.validated_by, None),
                    salt,
                    validation_proof: proof_to_hex(auth.validation_proof.as_ref()),
                }),
            )
                .into_response(),
            Err(e) => {
                log::warn!("signature request failed: {e}");
                let status = if e.is_client_fault() {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                failure(status, &e.to_string())
            }
        }
    }
}

fn failure(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message.to_string(),
        }),
    )
        .into_response()
}
