//! Result records produced by the two reasoning engines.
//!
//! `RuleAssessment` is the symbolic opinion with its justification trail;
//! `ProbabilisticAssessment` is the calibrated posterior opinion. The two are
//! computed independently from the same `PatientEvidence`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The two diseases under differential diagnosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disease {
    /// The respiratory viral disease.
    Covid,
    /// The mosquito-borne hemorrhagic fever.
    Dengue,
}

/// Final accumulated scores of the weighted rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiseaseScores {
    pub covid: f64,
    pub dengue: f64,
}

impl DiseaseScores {
    /// The strictly higher-scoring disease, or `None` on a tie.
    pub fn dominant(&self) -> Option<Disease> {
        if self.dengue > self.covid {
            Some(Disease::Dengue)
        } else if self.covid > self.dengue {
            Some(Disease::Covid)
        } else {
            None
        }
    }
}

/// The qualitative verdict of the weighted rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    /// At least one alarm fired. `dominant` is `None` when the scores tie.
    Severe { dominant: Option<Disease> },
    /// Dengue score exceeds the COVID score by more than the margin.
    LikelyDengue,
    /// COVID score exceeds the Dengue score by more than the margin.
    LikelyCovid,
    /// Neither disease clears the margin: possible co-infection.
    DualSuspicion,
}

impl Classification {
    pub fn is_severe(&self) -> bool {
        matches!(self, Classification::Severe { .. })
    }
}

/// Output of the weighted rule engine for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleAssessment {
    pub classification: Classification,
    /// Localized classification label.
    pub label: String,
    /// Localized explanation interpolating the final scores.
    pub justification: String,
    pub recommended_action: String,
    /// Every rule firing in evaluation order.
    pub reasoning_trace: Vec<String>,
    pub scores: DiseaseScores,
    pub alarm_active: bool,
    /// Messages of every alarm that fired, in table order.
    pub triggered_alarms: Vec<String>,
}

/// Observed node states for a probabilistic query: node name → state index.
///
/// State 0 is "absent", state 1 is "present". Nodes left out are
/// marginalized. Ordered so the same evidence always iterates identically.
pub type Observations = BTreeMap<String, usize>;

/// Output of the inference engine for one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilisticAssessment {
    /// P(dengue present | evidence), in [0, 1].
    pub dengue_probability: f64,
    /// P(covid present | evidence), in [0, 1].
    pub covid_probability: f64,
    /// Product of the two marginals, assuming the diseases are independent.
    pub coinfection_probability: f64,
    /// Symptom node names observed as present.
    pub observed_symptoms: Vec<String>,
}
