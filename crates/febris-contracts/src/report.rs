//! The merged dual-opinion report returned for one diagnosis request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    assessment::{ProbabilisticAssessment, RuleAssessment},
    evidence::PatientEvidence,
    language::Language,
};

/// Unique identifier for a single diagnosis request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseId(pub uuid::Uuid);

impl CaseId {
    /// Create a new, unique case ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for CaseId {
    fn default() -> Self {
        Self::new()
    }
}

/// The probabilistic half of a report.
///
/// A failed query is recorded here rather than propagated, so one bad
/// request never takes the rule-based opinion down with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProbabilisticOutcome {
    Assessed {
        assessment: ProbabilisticAssessment,
        /// Localized one-line description of the inference.
        summary: String,
    },
    Failed {
        reason: String,
    },
}

impl ProbabilisticOutcome {
    pub fn assessment(&self) -> Option<&ProbabilisticAssessment> {
        match self {
            ProbabilisticOutcome::Assessed { assessment, .. } => Some(assessment),
            ProbabilisticOutcome::Failed { .. } => None,
        }
    }
}

/// Both opinions for one patient, computed from the same evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DualReport {
    pub case_id: CaseId,
    /// Wall-clock time the report was produced (UTC).
    pub evaluated_at: DateTime<Utc>,
    pub language: Language,
    /// The normalized evidence both engines consumed.
    pub evidence: PatientEvidence,
    pub deterministic: RuleAssessment,
    pub probabilistic: ProbabilisticOutcome,
}
