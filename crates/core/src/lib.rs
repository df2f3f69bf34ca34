//! Core library for woplab.
//!
//! Indexes the Words of Power Vault, computes its statistics and reconciles
//! vault drawings against destination alphabets.

pub mod abcs;
pub mod config;
pub mod drawing;
pub mod export;
pub mod templates;
pub mod vault;
