// src/models/mod.rs

pub mod certification;
#[allow(dead_code)]
pub mod credit;
