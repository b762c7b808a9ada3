//! Knowledge-base tables consumed by the weighted rule engine.
//!
//! A `KnowledgeBase` is loaded once (see febris-rules) and then shared
//! read-only by every request. Rules refer to patient facts through
//! `FactKey`, never through free strings.

use serde::{Deserialize, Serialize};

use crate::evidence::FactKey;

/// A high-priority condition that forces a severe-case classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlarmRule {
    /// The fact that fires this alarm.
    pub trigger: FactKey,
    /// Warning shown in the justification when the alarm fires.
    pub message: String,
    /// Recommended action. The last alarm that fires sets the final action.
    pub action: String,
}

/// A symptom contributing additively to both disease scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DifferentialRule {
    pub symptom: FactKey,
    pub description: String,
    #[serde(default)]
    pub weight_covid: f64,
    #[serde(default)]
    pub weight_dengue: f64,
}

/// An epidemiological-context condition contributing to both scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextRule {
    pub condition: FactKey,
    pub description: String,
    #[serde(default)]
    pub weight_covid: f64,
    #[serde(default)]
    pub weight_dengue: f64,
}

/// A temperature tier granting extra weight to the Dengue score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeverBand {
    pub name: String,
    /// Inclusive lower bound in °C.
    pub min_temperature: f64,
    pub extra_weight: f64,
}

/// The complete, immutable rule set.
///
/// Fever bands are held in descending `min_temperature` order so the first
/// band whose minimum is met is always the highest applicable one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KnowledgeBase {
    alarms: Vec<AlarmRule>,
    differential: Vec<DifferentialRule>,
    context: Vec<ContextRule>,
    fever_bands: Vec<FeverBand>,
}

impl KnowledgeBase {
    /// Assemble a knowledge base. Table order is kept for alarms,
    /// differential and context rules; fever bands are re-sorted by
    /// descending threshold (stable, so equal thresholds keep input order).
    pub fn new(
        alarms: Vec<AlarmRule>,
        differential: Vec<DifferentialRule>,
        context: Vec<ContextRule>,
        mut fever_bands: Vec<FeverBand>,
    ) -> Self {
        fever_bands.sort_by(|a, b| b.min_temperature.total_cmp(&a.min_temperature));
        Self { alarms, differential, context, fever_bands }
    }

    /// A knowledge base with no tables at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn alarms(&self) -> &[AlarmRule] {
        &self.alarms
    }

    pub fn differential(&self) -> &[DifferentialRule] {
        &self.differential
    }

    pub fn context(&self) -> &[ContextRule] {
        &self.context
    }

    /// Fever bands, highest threshold first.
    pub fn fever_bands(&self) -> &[FeverBand] {
        &self.fever_bands
    }

    /// True when every table is empty.
    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
            && self.differential.is_empty()
            && self.context.is_empty()
            && self.fever_bands.is_empty()
    }
}
