//! Engine trait definitions.
//!
//! The two traits are the only seams between a request and the reasoning
//! engines:
//!
//! - `SymbolicReasoner`: weighted rules over a knowledge base
//! - `ProbabilisticReasoner`: exact inference over a Bayesian network
//!
//! Implementations hold only immutable data built at startup, so a single
//! instance serves any number of concurrent requests.

use febris_contracts::{
    assessment::{Observations, ProbabilisticAssessment, RuleAssessment},
    error::FebrisResult,
    evidence::PatientEvidence,
    language::Language,
};

/// The rule-based opinion.
pub trait SymbolicReasoner: Send + Sync {
    /// Classify the patient and explain why.
    ///
    /// Infallible: missing knowledge degrades the verdict toward dual
    /// suspicion instead of failing. `lang` selects wording only.
    fn evaluate(&self, evidence: &PatientEvidence, lang: Language) -> RuleAssessment;
}

/// The probabilistic opinion.
pub trait ProbabilisticReasoner: Send + Sync {
    /// Map canonical evidence onto this model's observable nodes.
    fn observe(&self, evidence: &PatientEvidence) -> Observations;

    /// Compute posterior disease probabilities given `observations`.
    ///
    /// Returns `FebrisError::InvalidQuery` for an unknown node, an
    /// out-of-range state, or impossible evidence.
    fn assess(&self, observations: &Observations) -> FebrisResult<ProbabilisticAssessment>;

    /// Render a one-line human description of `assessment`.
    fn summarize(&self, assessment: &ProbabilisticAssessment, lang: Language) -> String;
}
