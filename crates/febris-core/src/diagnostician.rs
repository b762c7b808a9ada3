//! The FEBRIS diagnostician: one request in, two independent opinions out.
//!
//! Pipeline per request:
//!
//!   RawAnswers → normalize → PatientEvidence ─┬→ SymbolicReasoner::evaluate
//!                                              └→ ProbabilisticReasoner::observe → assess
//!
//! Both engines read the same `PatientEvidence` value. The probabilistic
//! branch may fail with a caller error; that failure is recorded in the
//! report and never affects the rule-based opinion or any other request.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use febris_contracts::{
    evidence::{PatientEvidence, RawAnswers},
    language::Language,
    report::{CaseId, DualReport, ProbabilisticOutcome},
};

use crate::{
    intake::normalize,
    traits::{ProbabilisticReasoner, SymbolicReasoner},
};

/// Runs both reasoning engines for each diagnosis request.
///
/// Construct once at startup and share by reference (or `Arc`) across
/// request handlers. Holds no per-request state.
#[derive(Clone)]
pub struct Diagnostician {
    rules: Arc<dyn SymbolicReasoner>,
    network: Arc<dyn ProbabilisticReasoner>,
}

impl Diagnostician {
    /// Create a diagnostician over already-built, immutable engines.
    pub fn new(rules: Arc<dyn SymbolicReasoner>, network: Arc<dyn ProbabilisticReasoner>) -> Self {
        Self { rules, network }
    }

    /// Normalize `raw` and produce both opinions.
    pub fn diagnose(&self, raw: &RawAnswers, lang: Language) -> DualReport {
        self.diagnose_evidence(normalize(raw), lang)
    }

    /// Produce both opinions for already-normalized evidence.
    pub fn diagnose_evidence(&self, evidence: PatientEvidence, lang: Language) -> DualReport {
        let case_id = CaseId::new();

        debug!(case_id = %case_id.0, language = %lang, "diagnosis starting");

        // ── Rule-based opinion ───────────────────────────────────────────────
        let deterministic = self.rules.evaluate(&evidence, lang);

        // ── Probabilistic opinion ────────────────────────────────────────────
        let observations = self.network.observe(&evidence);
        let probabilistic = match self.network.assess(&observations) {
            Ok(assessment) => {
                let summary = self.network.summarize(&assessment, lang);
                ProbabilisticOutcome::Assessed { assessment, summary }
            }
            Err(e) => {
                warn!(case_id = %case_id.0, error = %e, "probabilistic assessment failed");
                ProbabilisticOutcome::Failed { reason: e.to_string() }
            }
        };

        info!(
            case_id = %case_id.0,
            classification = ?deterministic.classification,
            alarm_active = deterministic.alarm_active,
            dengue = ?probabilistic.assessment().map(|a| a.dengue_probability),
            covid = ?probabilistic.assessment().map(|a| a.covid_probability),
            "diagnosis complete"
        );

        DualReport {
            case_id,
            evaluated_at: Utc::now(),
            language: lang,
            evidence,
            deterministic,
            probabilistic,
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
