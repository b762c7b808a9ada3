//! Weighted rule engine implementation.
//!
//! `WeightedRuleEngine` evaluates a `KnowledgeBase` against one patient's
//! evidence and implements the `SymbolicReasoner` trait from febris-core.
//!
//! Evaluation algorithm, strictly ordered:
//!
//! 1. Alarm pass: every alarm whose trigger holds marks the case severe,
//!    keeps its message, and replaces the pending action (last match wins).
//! 2. Differential pass: every symptom rule that holds adds its weight pair.
//! 3. Fever banding: the resolved temperature selects at most one band,
//!    the highest whose minimum is met; its extra weight goes to Dengue.
//!    When bands exist but none is met, the trace says so.
//! 4. Context pass: every context rule that holds adds its weight pair.
//! 5. Resolution: severe if any alarm fired; otherwise the disease whose
//!    score leads by more than the margin; otherwise dual suspicion.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use febris_contracts::{
    assessment::{Classification, RuleAssessment},
    error::FebrisResult,
    evidence::PatientEvidence,
    knowledge::KnowledgeBase,
    language::Language,
};
use febris_core::traits::SymbolicReasoner;

use crate::{
    knowledge::{load_knowledge_file, load_knowledge_str},
    messages,
    score::ScoreState,
};

/// Minimum score lead required to prefer one disease over dual suspicion.
pub const DEFAULT_MARGIN: f64 = 3.0;

/// A `SymbolicReasoner` backed by a shared, immutable knowledge base.
///
/// ```rust,ignore
/// use febris_rules::engine::WeightedRuleEngine;
///
/// let engine = WeightedRuleEngine::from_file(Path::new("knowledge/infectology.toml"))?;
/// ```
#[derive(Debug, Clone)]
pub struct WeightedRuleEngine {
    knowledge: Arc<KnowledgeBase>,
    margin: f64,
}

impl WeightedRuleEngine {
    /// Build an engine over an already-loaded knowledge base.
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        if knowledge.is_empty() {
            warn!("rule engine built over an empty knowledge base");
        }
        Self { knowledge, margin: DEFAULT_MARGIN }
    }

    /// Parse `s` as a TOML knowledge base and build an engine over it.
    pub fn from_toml_str(s: &str) -> FebrisResult<Self> {
        Ok(Self::new(Arc::new(load_knowledge_str(s)?)))
    }

    /// Load the knowledge base at `path` and build an engine over it.
    pub fn from_file(path: &Path) -> FebrisResult<Self> {
        Ok(Self::new(Arc::new(load_knowledge_file(path)?)))
    }

    /// Replace the resolution margin (default `DEFAULT_MARGIN`).
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Run passes 1–4 and return the resulting state.
    pub fn score(&self, evidence: &PatientEvidence) -> ScoreState {
        let mut state = ScoreState::new();
        self.alarm_pass(evidence, &mut state);
        self.differential_pass(evidence, &mut state);
        self.fever_pass(evidence, &mut state);
        self.context_pass(evidence, &mut state);
        state
    }

    // ── Passes ───────────────────────────────────────────────────────────────

    fn alarm_pass(&self, evidence: &PatientEvidence, state: &mut ScoreState) {
        for rule in self.knowledge.alarms() {
            if !evidence.fact(rule.trigger) {
                continue;
            }
            debug!(trigger = %rule.trigger, "alarm fired");
            state.raise_alarm(rule);
            state.record(format!("[alarm] {}: {}", rule.trigger, rule.message));
        }
    }

    fn differential_pass(&self, evidence: &PatientEvidence, state: &mut ScoreState) {
        for rule in self.knowledge.differential() {
            if !evidence.fact(rule.symptom) {
                continue;
            }
            debug!(
                symptom = %rule.symptom,
                covid = rule.weight_covid,
                dengue = rule.weight_dengue,
                "differential rule fired"
            );
            state.add(rule.weight_covid, rule.weight_dengue);
            state.record(format!(
                "[differential] {} ({}): COVID-19 {:+}, Dengue {:+}",
                rule.symptom, rule.description, rule.weight_covid, rule.weight_dengue
            ));
        }
    }

    fn fever_pass(&self, evidence: &PatientEvidence, state: &mut ScoreState) {
        let bands = self.knowledge.fever_bands();
        let temperature = evidence.resolved_temperature();
        // Bands are ordered highest threshold first; only the first match counts.
        if let Some(band) = bands.iter().find(|b| temperature >= b.min_temperature) {
            debug!(band = %band.name, temperature, "fever band applied");
            state.add(0.0, band.extra_weight);
            state.record(format!(
                "[fever] {} °C → band '{}' (≥ {} °C): Dengue {:+}",
                temperature, band.name, band.min_temperature, band.extra_weight
            ));
        } else if let Some(lowest) = bands.last() {
            debug!(temperature, "below every fever band");
            state.record(format!(
                "[fever] {} °C → no band (below {} °C)",
                temperature, lowest.min_temperature
            ));
        }
    }

    fn context_pass(&self, evidence: &PatientEvidence, state: &mut ScoreState) {
        for rule in self.knowledge.context() {
            if !evidence.fact(rule.condition) {
                continue;
            }
            debug!(
                condition = %rule.condition,
                covid = rule.weight_covid,
                dengue = rule.weight_dengue,
                "context rule fired"
            );
            state.add(rule.weight_covid, rule.weight_dengue);
            state.record(format!(
                "[context] {} ({}): COVID-19 {:+}, Dengue {:+}",
                rule.condition, rule.description, rule.weight_covid, rule.weight_dengue
            ));
        }
    }

    // ── Resolution ───────────────────────────────────────────────────────────

    /// Decide the classification for a finished score state.
    pub fn classify(&self, state: &ScoreState) -> Classification {
        let scores = state.scores();
        if state.alarm_active() {
            Classification::Severe { dominant: scores.dominant() }
        } else if scores.dengue - scores.covid > self.margin {
            Classification::LikelyDengue
        } else if scores.covid - scores.dengue > self.margin {
            Classification::LikelyCovid
        } else {
            Classification::DualSuspicion
        }
    }

    fn resolve(&self, state: ScoreState, lang: Language) -> RuleAssessment {
        let classification = self.classify(&state);
        let scores = state.scores();
        let alarm_active = state.alarm_active();
        let (triggered_alarms, pending_action, reasoning_trace) = state.into_parts();

        let recommended_action = match classification {
            Classification::Severe { .. } => {
                pending_action.unwrap_or_else(|| messages::action(classification, lang))
            }
            _ => messages::action(classification, lang),
        };
        let justification =
            messages::justification(classification, scores, self.margin, &triggered_alarms, lang);

        RuleAssessment {
            classification,
            label: messages::label(classification, lang),
            justification,
            recommended_action,
            reasoning_trace,
            scores,
            alarm_active,
            triggered_alarms,
        }
    }
}

impl SymbolicReasoner for WeightedRuleEngine {
    fn evaluate(&self, evidence: &PatientEvidence, lang: Language) -> RuleAssessment {
        let state = self.score(evidence);
        let assessment = self.resolve(state, lang);
        debug!(
            classification = ?assessment.classification,
            covid = assessment.scores.covid,
            dengue = assessment.scores.dengue,
            "rule evaluation complete"
        );
        assessment
    }
}
