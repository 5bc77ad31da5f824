// src/models/certification.rs
//! Carbon credit certification data model.
//!
//! Defines the immutable certification record whose canonical ABI encoding
//! anchors a credit's identity. Field order and types mirror the registrar
//! contract's `Certification` struct exactly:
//!
//! ```text
//! (string,string,string,string,uint256,uint256,uint256,uint8)
//! ```
//!
//! Reordering or retyping any field changes every derived hash, so the
//! layout here is load-bearing and must never drift from the contract.

use crate::error::ProtocolError;
use ethers::abi::{InvalidOutputType, Token};
use ethers::types::U256;
use serde::{Deserialize, Serialize};

/// Certification standard under which a credit was issued.
///
/// The numeric codes are part of the wire format: the `uint8` in the
/// canonical tuple is exactly this discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Standard {
    Verra = 0,
    GoldStandard = 1,
    CDM = 2,
    ACR = 3,
    CAR = 4,
    Other = 5,
}

impl Standard {
    /// The single-byte code used in the canonical tuple encoding.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Standard {
    type Error = ProtocolError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Standard::Verra),
            1 => Ok(Standard::GoldStandard),
            2 => Ok(Standard::CDM),
            3 => Ok(Standard::ACR),
            4 => Ok(Standard::CAR),
            5 => Ok(Standard::Other),
            other => Err(ProtocolError::EncodingRange {
                field: "standard",
                value: other as u64,
            }),
        }
    }
}

impl From<Standard> for u8 {
    fn from(standard: Standard) -> u8 {
        standard.code()
    }
}

/// An immutable carbon credit certification record.
///
/// All values are request-scoped and owned; nothing here is shared between
/// requests. The struct is the off-chain mirror of the tuple the registrar
/// recomputes identity and digest from, so the client form, this service,
/// and the contract all agree on "which credit" a signature authorizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationRecord {
    /// Name of the emissions-reduction project
    /// Example: "Solar Farm Alpha"
    pub project_name: String,

    /// Entity that issued the certification
    /// Example: "Green Energy Corp"
    pub issuer_name: String,

    /// Geographic location of the project
    pub location: String,

    /// Certification methodology identifier
    /// Example: "ACM0002"
    pub methodology: String,

    /// Quantity in tons of CO2-equivalent
    pub amount: u64,

    /// Calendar year the reduction occurred in
    pub vintage_year: u16,

    /// Unix timestamp after which the certification lapses; 0 means no expiry
    pub expiry: u64,

    /// Certification standard code
    pub standard: Standard,
}

impl CertificationRecord {
    /// Checks the record's invariants before it enters the hashing pipeline.
    ///
    /// # Errors
    /// - [`ProtocolError::BadRequest`] if any text field is empty
    /// - [`ProtocolError::EncodingRange`] if `vintage_year` is not a
    ///   plausible calendar year
    pub fn validate(&self) -> Result<(), ProtocolError> {
        let text_fields = [
            &self.project_name,
            &self.issuer_name,
            &self.location,
            &self.methodology,
        ];
        if text_fields.iter().any(|field| field.trim().is_empty()) {
            return Err(ProtocolError::BadRequest);
        }
        if !(1900..=2200).contains(&self.vintage_year) {
            return Err(ProtocolError::EncodingRange {
                field: "vintage_year",
                value: self.vintage_year as u64,
            });
        }
        Ok(())
    }

    /// Converts the record into its canonical ABI token.
    ///
    /// The token is used both for the length-prefixed tuple encoding that
    /// anchors the credit identity and, verbatim, as the first argument of
    /// the registrar's `issue` call.
    pub fn to_token(&self) -> Token {
        Token::Tuple(vec![
            Token::String(self.project_name.clone()),
            Token::String(self.issuer_name.clone()),
            Token::String(self.location.clone()),
            Token::String(self.methodology.clone()),
            Token::Uint(U256::from(self.amount)),
            Token::Uint(U256::from(self.vintage_year)),
            Token::Uint(U256::from(self.expiry)),
            Token::Uint(U256::from(self.standard.code())),
        ])
    }

    /// Rebuilds a record from the tuple token returned by the registrar's
    /// read methods.
    pub fn from_token(token: Token) -> Result<Self, InvalidOutputType> {
        let fields = match token {
            Token::Tuple(fields) if fields.len() == 8 => fields,
            other => {
                return Err(InvalidOutputType(format!(
                    "expected 8-field certification tuple, got {other:?}"
                )))
            }
        };
        let mut fields = fields.into_iter();

        let project_name = take_string(fields.next())?;
        let issuer_name = take_string(fields.next())?;
        let location = take_string(fields.next())?;
        let methodology = take_string(fields.next())?;
        let amount = uint_field(take_uint(fields.next())?, "amount")?;
        let vintage_year = uint_field(take_uint(fields.next())?, "vintage_year")?;
        let expiry = uint_field(take_uint(fields.next())?, "expiry")?;
        let standard_code = uint_field(take_uint(fields.next())?, "standard")?;

        let vintage_year = u16::try_from(vintage_year)
            .map_err(|_| InvalidOutputType(format!("vintage_year {vintage_year} exceeds u16")))?;
        let standard_code = u8::try_from(standard_code)
            .map_err(|_| InvalidOutputType(format!("standard {standard_code} exceeds u8")))?;
        let standard = Standard::try_from(standard_code)
            .map_err(|e| InvalidOutputType(e.to_string()))?;

        Ok(Self {
            project_name,
            issuer_name,
            location,
            methodology,
            amount,
            vintage_year,
            expiry,
            standard,
        })
    }
}

fn take_string(token: Option<Token>) -> Result<String, InvalidOutputType> {
    match token {
        Some(Token::String(value)) => Ok(value),
        other => Err(InvalidOutputType(format!(
            "expected string field, got {other:?}"
        ))),
    }
}

fn take_uint(token: Option<Token>) -> Result<U256, InvalidOutputType> {
    match token {
        Some(Token::Uint(value)) => Ok(value),
        other => Err(InvalidOutputType(format!(
            "expected uint field, got {other:?}"
        ))),
    }
}

fn uint_field(value: U256, field: &str) -> Result<u64, InvalidOutputType> {
    if value.bits() > 64 {
        return Err(InvalidOutputType(format!("{field} {value} exceeds u64")));
    }
    Ok(value.low_u64())
}
