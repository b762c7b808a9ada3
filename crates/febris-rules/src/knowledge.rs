//! Knowledge-base file schema and loader.
//!
//! A `KnowledgeFile` is deserialized from TOML and validated once, then
//! converted into the immutable `KnowledgeBase` the engine evaluates. Every
//! table is optional. Rule keys are `FactKey` values, so a key that is not
//! part of the evidence vocabulary fails here, at load time.
//!
//! Example:
//! ```toml
//! [[alarms]]
//! trigger = "mucosal_bleeding"
//! message = "Mucosal bleeding: warning sign of severe dengue"
//! action = "Immediate referral to emergency care"
//!
//! [[differential]]
//! symptom = "anosmia"
//! description = "Loss of smell"
//! weight_covid = 4
//! weight_dengue = 0
//!
//! [[context]]
//! condition = "endemic_zone"
//! description = "Endemic city during summer"
//! weight_dengue = 2
//!
//! [fever_bands.high]
//! min_temperature = 38.0
//! extra_weight = 2
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use febris_contracts::{
    error::{FebrisError, FebrisResult},
    knowledge::{AlarmRule, ContextRule, DifferentialRule, FeverBand, KnowledgeBase},
};

/// One entry of the `[fever_bands]` table; the table key is the band name.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeverBandEntry {
    pub min_temperature: f64,
    #[serde(default)]
    pub extra_weight: f64,
}

/// The top-level structure deserialized from a knowledge-base TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeFile {
    #[serde(default)]
    pub alarms: Vec<AlarmRule>,
    #[serde(default)]
    pub differential: Vec<DifferentialRule>,
    #[serde(default)]
    pub context: Vec<ContextRule>,
    #[serde(default)]
    pub fever_bands: BTreeMap<String, FeverBandEntry>,
}

impl KnowledgeFile {
    /// Check numeric sanity of every table.
    ///
    /// Weights and thresholds must be finite, and no two fever bands may
    /// share a threshold: "highest threshold wins" must name exactly one band.
    pub fn validate(&self) -> FebrisResult<()> {
        let weights = self
            .differential
            .iter()
            .map(|r| (r.symptom.as_str(), r.weight_covid, r.weight_dengue))
            .chain(
                self.context
                    .iter()
                    .map(|r| (r.condition.as_str(), r.weight_covid, r.weight_dengue)),
            );
        for (key, covid, dengue) in weights {
            if !covid.is_finite() || !dengue.is_finite() {
                return Err(FebrisError::ConfigError {
                    reason: format!("rule '{}' has a non-finite weight", key),
                });
            }
        }

        let mut seen: Vec<(&str, f64)> = Vec::with_capacity(self.fever_bands.len());
        for (name, band) in &self.fever_bands {
            if !band.min_temperature.is_finite() || !band.extra_weight.is_finite() {
                return Err(FebrisError::ConfigError {
                    reason: format!("fever band '{}' has a non-finite value", name),
                });
            }
            if let Some((other, _)) = seen.iter().find(|(_, t)| *t == band.min_temperature) {
                return Err(FebrisError::ConfigError {
                    reason: format!(
                        "fever bands '{}' and '{}' share threshold {} °C",
                        other, name, band.min_temperature
                    ),
                });
            }
            seen.push((name.as_str(), band.min_temperature));
        }

        Ok(())
    }

    /// Validate and convert into the immutable runtime representation.
    pub fn into_knowledge_base(self) -> FebrisResult<KnowledgeBase> {
        self.validate()?;
        let bands = self
            .fever_bands
            .into_iter()
            .map(|(name, entry)| FeverBand {
                name,
                min_temperature: entry.min_temperature,
                extra_weight: entry.extra_weight,
            })
            .collect();
        Ok(KnowledgeBase::new(self.alarms, self.differential, self.context, bands))
    }
}

/// Parse `s` as TOML and build a `KnowledgeBase`.
///
/// Returns `FebrisError::ConfigError` if the TOML is malformed, uses an
/// unknown fact key or table, or fails validation.
pub fn load_knowledge_str(s: &str) -> FebrisResult<KnowledgeBase> {
    let file: KnowledgeFile = toml::from_str(s).map_err(|e| FebrisError::ConfigError {
        reason: format!("failed to parse knowledge base TOML: {}", e),
    })?;
    let kb = file.into_knowledge_base()?;

    info!(
        alarms = kb.alarms().len(),
        differential = kb.differential().len(),
        context = kb.context().len(),
        fever_bands = kb.fever_bands().len(),
        "knowledge base loaded"
    );
    Ok(kb)
}

/// Read the file at `path` and parse it as a knowledge base.
pub fn load_knowledge_file(path: &Path) -> FebrisResult<KnowledgeBase> {
    let contents = std::fs::read_to_string(path).map_err(|e| FebrisError::ConfigError {
        reason: format!("failed to read knowledge base file '{}': {}", path.display(), e),
    })?;
    load_knowledge_str(&contents)
}
