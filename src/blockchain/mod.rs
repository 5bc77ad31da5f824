// src/blockchain/mod.rs

pub mod registrar_client;
pub mod submission;
