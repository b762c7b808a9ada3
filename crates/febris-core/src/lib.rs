//! # febris-core
//!
//! The request-scope layer of the FEBRIS diagnosis core.
//!
//! This crate provides:
//! - The two engine traits (`SymbolicReasoner`, `ProbabilisticReasoner`)
//! - The intake normalizer turning raw answers into `PatientEvidence`
//! - The `Diagnostician` that runs both engines on the same evidence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use febris_core::{Diagnostician, traits::{SymbolicReasoner, ProbabilisticReasoner}};
//! ```

pub mod diagnostician;
pub mod intake;
pub mod traits;

pub use diagnostician::Diagnostician;
pub use intake::normalize;
