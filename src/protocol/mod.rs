// src/protocol/mod.rs
//! The validator authorization protocol: canonical encoding, identity
//! derivation, proof normalization, and digest construction. Everything in
//! here is a pure function the on-chain registrar recomputes verbatim.

pub mod constants;
pub mod digest;
pub mod encoding;
pub mod identity;
pub mod proof;
