//! # febris-contracts
//!
//! Shared types for the FEBRIS dual-engine diagnosis core.
//!
//! All crates in the workspace import from here. No reasoning lives in this
//! crate, only the evidence vocabulary, knowledge-base tables, result records
//! and the error type.

pub mod assessment;
pub mod error;
pub mod evidence;
pub mod knowledge;
pub mod language;
pub mod report;
