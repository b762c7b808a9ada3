//! Patient evidence vocabulary.
//!
//! `PatientEvidence` is the canonical fact record both engines consume. It is
//! produced once per request from `RawAnswers` by the intake normalizer in
//! febris-core and never mutated afterwards.
//!
//! Every boolean fact, asked or derived, is named by a `FactKey`. Knowledge-base
//! rules reference facts through this enum, so a rule can never point at a
//! field that does not exist.

use serde::{Deserialize, Serialize};

/// Temperature assumed when the patient reports fever but gave no reading.
pub const FEVER_DEFAULT_TEMPERATURE: f64 = 38.5;

/// Temperature assumed when the patient reports no fever and gave no reading.
pub const AFEBRILE_DEFAULT_TEMPERATURE: f64 = 36.5;

/// Where the patient currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// A city with active vector circulation (Corrientes in the reference data).
    EndemicCity,
    #[default]
    Other,
}

/// The current season at the patient's location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Summer,
    #[default]
    Winter,
}

/// A named boolean fact about the patient.
///
/// The first thirteen variants are asked directly; the last five are derived
/// from them and never asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactKey {
    Fever,
    Cough,
    SoreThroat,
    RetroOrbitalPain,
    Myalgia,
    Anosmia,
    SevereAbdominalPain,
    MucosalBleeding,
    Dyspnea,
    Asthma,
    Hypertension,
    TravelToEndemicArea,
    ConfirmedContact,
    // ── Derived ──
    RespiratorySymptoms,
    Comorbidities,
    DengueExposure,
    EndemicZone,
    OffSeasonEndemicCity,
}

impl FactKey {
    /// Every fact key, asked keys first, in declaration order.
    pub const ALL: [FactKey; 18] = [
        FactKey::Fever,
        FactKey::Cough,
        FactKey::SoreThroat,
        FactKey::RetroOrbitalPain,
        FactKey::Myalgia,
        FactKey::Anosmia,
        FactKey::SevereAbdominalPain,
        FactKey::MucosalBleeding,
        FactKey::Dyspnea,
        FactKey::Asthma,
        FactKey::Hypertension,
        FactKey::TravelToEndemicArea,
        FactKey::ConfirmedContact,
        FactKey::RespiratorySymptoms,
        FactKey::Comorbidities,
        FactKey::DengueExposure,
        FactKey::EndemicZone,
        FactKey::OffSeasonEndemicCity,
    ];

    /// The snake_case name used in knowledge-base files and reasoning traces.
    pub fn as_str(self) -> &'static str {
        match self {
            FactKey::Fever => "fever",
            FactKey::Cough => "cough",
            FactKey::SoreThroat => "sore_throat",
            FactKey::RetroOrbitalPain => "retro_orbital_pain",
            FactKey::Myalgia => "myalgia",
            FactKey::Anosmia => "anosmia",
            FactKey::SevereAbdominalPain => "severe_abdominal_pain",
            FactKey::MucosalBleeding => "mucosal_bleeding",
            FactKey::Dyspnea => "dyspnea",
            FactKey::Asthma => "asthma",
            FactKey::Hypertension => "hypertension",
            FactKey::TravelToEndemicArea => "travel_to_endemic_area",
            FactKey::ConfirmedContact => "confirmed_contact",
            FactKey::RespiratorySymptoms => "respiratory_symptoms",
            FactKey::Comorbidities => "comorbidities",
            FactKey::DengueExposure => "dengue_exposure",
            FactKey::EndemicZone => "endemic_zone",
            FactKey::OffSeasonEndemicCity => "off_season_endemic_city",
        }
    }
}

impl std::fmt::Display for FactKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical, fully-enumerated evidence record for one patient.
///
/// Every field is required except `temperature`; its absence is resolved by
/// `resolved_temperature()` and never reaches scoring as a missing value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientEvidence {
    // Symptoms
    pub fever: bool,
    pub cough: bool,
    pub sore_throat: bool,
    pub retro_orbital_pain: bool,
    pub myalgia: bool,
    pub anosmia: bool,
    pub severe_abdominal_pain: bool,
    pub mucosal_bleeding: bool,
    pub dyspnea: bool,

    // History
    pub asthma: bool,
    pub hypertension: bool,
    pub travel_to_endemic_area: bool,
    pub confirmed_contact: bool,

    /// Measured body temperature in °C, if the patient gave one.
    pub temperature: Option<f64>,

    pub location: Location,
    pub season: Season,
}

impl PatientEvidence {
    /// Look up any asked or derived fact.
    pub fn fact(&self, key: FactKey) -> bool {
        match key {
            FactKey::Fever => self.fever,
            FactKey::Cough => self.cough,
            FactKey::SoreThroat => self.sore_throat,
            FactKey::RetroOrbitalPain => self.retro_orbital_pain,
            FactKey::Myalgia => self.myalgia,
            FactKey::Anosmia => self.anosmia,
            FactKey::SevereAbdominalPain => self.severe_abdominal_pain,
            FactKey::MucosalBleeding => self.mucosal_bleeding,
            FactKey::Dyspnea => self.dyspnea,
            FactKey::Asthma => self.asthma,
            FactKey::Hypertension => self.hypertension,
            FactKey::TravelToEndemicArea => self.travel_to_endemic_area,
            FactKey::ConfirmedContact => self.confirmed_contact,
            FactKey::RespiratorySymptoms => self.cough || self.sore_throat,
            FactKey::Comorbidities => self.asthma || self.hypertension,
            FactKey::DengueExposure => self.travel_to_endemic_area || self.confirmed_contact,
            FactKey::EndemicZone => {
                self.location == Location::EndemicCity && self.season == Season::Summer
            }
            FactKey::OffSeasonEndemicCity => {
                self.location == Location::EndemicCity && self.season != Season::Summer
            }
        }
    }

    /// All facts that hold for this patient, in `FactKey::ALL` order.
    pub fn true_facts(&self) -> Vec<FactKey> {
        FactKey::ALL.into_iter().filter(|k| self.fact(*k)).collect()
    }

    /// The temperature used for fever banding.
    ///
    /// A finite reading wins. Without one, fever implies
    /// `FEVER_DEFAULT_TEMPERATURE` and no fever implies
    /// `AFEBRILE_DEFAULT_TEMPERATURE`.
    pub fn resolved_temperature(&self) -> f64 {
        match self.temperature {
            Some(t) if t.is_finite() => t,
            _ if self.fever => FEVER_DEFAULT_TEMPERATURE,
            _ => AFEBRILE_DEFAULT_TEMPERATURE,
        }
    }
}

/// Free-form intake answers as collected by the question flow.
///
/// Values may be booleans, numbers, or yes/no strings, under English or
/// Spanish field names. Only the intake normalizer reads this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAnswers(pub serde_json::Map<String, serde_json::Value>);

impl RawAnswers {
    /// Build from a JSON value. Anything other than an object yields an
    /// empty answer set.
    pub fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// Return the first present, non-null value among `names`.
    pub fn get_any(&self, names: &[&str]) -> Option<&serde_json::Value> {
        names
            .iter()
            .filter_map(|name| self.0.get(*name))
            .find(|v| !v.is_null())
    }
}
