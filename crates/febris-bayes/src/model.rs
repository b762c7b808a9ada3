//! The Dengue / COVID-19 network and its `ProbabilisticReasoner`.
//!
//! Graph:
//!
//! ```text
//! season ─┐
//! location ┼─> dengue ─┐
//! travel ──┤           ├─> fever, cough, sore_throat, retro_orbital_pain,
//! contact ─┘           │   myalgia, anosmia, dyspnea
//! covid ───────────────┘
//! ```
//!
//! COVID-19 has no exposure parents; its prior carries the community rate.

use std::sync::Arc;

use tracing::debug;

use febris_contracts::{
    assessment::{Observations, ProbabilisticAssessment},
    error::FebrisResult,
    evidence::{Location, PatientEvidence, Season},
    language::Language,
};
use febris_core::traits::ProbabilisticReasoner;

use crate::{
    inference::VariableElimination,
    network::{BayesianNetwork, Cpt, NetworkBuilder},
};

pub const SEASON: &str = "season";
pub const LOCATION: &str = "location";
pub const TRAVEL: &str = "travel";
pub const CONTACT: &str = "contact";
pub const COVID: &str = "covid";
pub const DENGUE: &str = "dengue";

pub const FEVER: &str = "fever";
pub const COUGH: &str = "cough";
pub const SORE_THROAT: &str = "sore_throat";
pub const RETRO_ORBITAL_PAIN: &str = "retro_orbital_pain";
pub const MYALGIA: &str = "myalgia";
pub const ANOSMIA: &str = "anosmia";
pub const DYSPNEA: &str = "dyspnea";

/// Symptom nodes in display order.
pub const SYMPTOMS: [&str; 7] =
    [FEVER, COUGH, SORE_THROAT, RETRO_ORBITAL_PAIN, MYALGIA, ANOSMIA, DYSPNEA];

/// P(symptom present) per (dengue, covid) column: (0,0), (0,1), (1,0), (1,1).
const SYMPTOM_TABLES: [(&str, [f64; 4]); 7] = [
    (FEVER, [0.05, 0.80, 0.90, 0.95]),
    (COUGH, [0.10, 0.70, 0.15, 0.75]),
    (SORE_THROAT, [0.15, 0.50, 0.25, 0.60]),
    (RETRO_ORBITAL_PAIN, [0.02, 0.07, 0.75, 0.80]),
    (MYALGIA, [0.10, 0.40, 0.85, 0.90]),
    (ANOSMIA, [0.01, 0.65, 0.03, 0.70]),
    (DYSPNEA, [0.05, 0.35, 0.12, 0.40]),
];

/// P(dengue) for one exposure configuration.
fn dengue_risk(contact: bool, summer: bool, endemic_city: bool, travel: bool) -> f64 {
    if contact {
        0.85
    } else if travel {
        0.55
    } else if endemic_city && summer {
        0.20
    } else if endemic_city {
        0.08
    } else {
        0.01
    }
}

/// Build and validate the fixed Dengue / COVID-19 network.
pub fn dengue_covid_network() -> FebrisResult<BayesianNetwork> {
    let dengue_parents = [CONTACT, SEASON, LOCATION, TRAVEL];
    let dengue_column: Vec<f64> = (0..16usize)
        .map(|col| dengue_risk(col & 8 != 0, col & 4 != 0, col & 2 != 0, col & 1 != 0))
        .collect();

    let mut builder = NetworkBuilder::new()
        .with(Cpt::prior(SEASON, 0.5))
        .with(Cpt::prior(LOCATION, 0.5))
        .with(Cpt::prior(TRAVEL, 0.2))
        .with(Cpt::prior(CONTACT, 0.1))
        .with(Cpt::prior(COVID, 0.05))
        .with(Cpt::bernoulli(DENGUE, &dengue_parents, &dengue_column));

    for (symptom, p_present) in SYMPTOM_TABLES {
        builder = builder.with(Cpt::bernoulli(symptom, &[DENGUE, COVID], &p_present));
    }

    builder.build()
}

/// Map canonical evidence onto observed states of this network.
///
/// Every context and symptom node is observed; an unreported symptom is
/// observed absent.
pub fn observations_from_evidence(evidence: &PatientEvidence) -> Observations {
    let mut obs = Observations::new();
    obs.insert(SEASON.to_string(), usize::from(evidence.season == Season::Summer));
    obs.insert(LOCATION.to_string(), usize::from(evidence.location == Location::EndemicCity));
    obs.insert(TRAVEL.to_string(), usize::from(evidence.travel_to_endemic_area));
    obs.insert(CONTACT.to_string(), usize::from(evidence.confirmed_contact));

    let reported = [
        (FEVER, evidence.fever),
        (COUGH, evidence.cough),
        (SORE_THROAT, evidence.sore_throat),
        (RETRO_ORBITAL_PAIN, evidence.retro_orbital_pain),
        (MYALGIA, evidence.myalgia),
        (ANOSMIA, evidence.anosmia),
        (DYSPNEA, evidence.dyspnea),
    ];
    for (symptom, present) in reported {
        obs.insert(symptom.to_string(), usize::from(present));
    }
    obs
}

/// Localized name of a symptom node; unknown names are returned unchanged.
pub fn symptom_display_name(node: &str, lang: Language) -> &str {
    match (node, lang) {
        (FEVER, Language::Es) => "Fiebre",
        (FEVER, Language::En) => "Fever",
        (COUGH, Language::Es) => "Tos",
        (COUGH, Language::En) => "Cough",
        (SORE_THROAT, Language::Es) => "Dolor de Garganta",
        (SORE_THROAT, Language::En) => "Sore Throat",
        (RETRO_ORBITAL_PAIN, Language::Es) => "Dolor Retroocular",
        (RETRO_ORBITAL_PAIN, Language::En) => "Retro-Orbital Pain",
        (MYALGIA, Language::Es) => "Mialgia",
        (MYALGIA, Language::En) => "Myalgia",
        (ANOSMIA, _) => "Anosmia",
        (DYSPNEA, Language::Es) => "Disnea",
        (DYSPNEA, Language::En) => "Dyspnea",
        (other, _) => other,
    }
}

/// The probabilistic engine: variable elimination over the Dengue / COVID-19
/// network.
#[derive(Debug, Clone)]
pub struct InferenceEngine {
    inference: VariableElimination,
}

impl InferenceEngine {
    /// Build the fixed network and wrap it.
    pub fn new() -> FebrisResult<Self> {
        Ok(Self::with_network(Arc::new(dengue_covid_network()?)))
    }

    /// Wrap an existing network. It must contain the `dengue` and `covid`
    /// nodes or every assessment fails with `InvalidQuery`.
    pub fn with_network(network: Arc<BayesianNetwork>) -> Self {
        Self { inference: VariableElimination::new(network) }
    }

    pub fn inference(&self) -> &VariableElimination {
        &self.inference
    }
}

impl ProbabilisticReasoner for InferenceEngine {
    fn observe(&self, evidence: &PatientEvidence) -> Observations {
        observations_from_evidence(evidence)
    }

    fn assess(&self, observations: &Observations) -> FebrisResult<ProbabilisticAssessment> {
        let dengue = self.inference.probability_present(DENGUE, observations)?;
        let covid = self.inference.probability_present(COVID, observations)?;

        let observed_symptoms = SYMPTOMS
            .iter()
            .filter(|s| observations.get(**s) == Some(&1))
            .map(|s| s.to_string())
            .collect();

        debug!(dengue, covid, "posterior computed");

        Ok(ProbabilisticAssessment {
            dengue_probability: dengue,
            covid_probability: covid,
            // Product of marginals, not a joint posterior.
            coinfection_probability: dengue * covid,
            observed_symptoms,
        })
    }

    fn summarize(&self, assessment: &ProbabilisticAssessment, lang: Language) -> String {
        let names: Vec<&str> = assessment
            .observed_symptoms
            .iter()
            .map(|s| symptom_display_name(s, lang))
            .collect();
        let count = names.len();
        let list = names.join(", ");
        match lang {
            Language::Es => format!(
                "Inferencia Bayesiana con {} síntomas: {}. Red completa COVID-Dengue.",
                count, list
            ),
            Language::En => format!(
                "Bayesian inference with {} symptoms: {}. Complete COVID-Dengue network.",
                count, list
            ),
        }
    }
}
