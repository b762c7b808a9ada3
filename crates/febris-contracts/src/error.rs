//! Error types for the FEBRIS diagnosis core.
//!
//! Construction-time failures (`ConfigError`, `InvalidModel`) are fatal and
//! surface once at startup. `InvalidQuery` is a per-request caller error that
//! is captured in that request's report.

use thiserror::Error;

/// The unified error type for the FEBRIS crates.
#[derive(Debug, Error)]
pub enum FebrisError {
    /// The knowledge-base document is unreadable, malformed, or names a fact
    /// key outside the evidence vocabulary.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A conditional probability table or the network graph failed validation.
    ///
    /// A miscalibrated model must never serve requests, so this aborts startup.
    #[error("invalid probabilistic model: {reason}")]
    InvalidModel { reason: String },

    /// Inference was requested with an unknown node, an out-of-range state,
    /// or evidence the model assigns zero probability.
    #[error("invalid inference query: {reason}")]
    InvalidQuery { reason: String },
}

/// Convenience alias used throughout the FEBRIS crates.
pub type FebrisResult<T> = Result<T, FebrisError>;
