//! Intake normalization: raw answers → `PatientEvidence`.
//!
//! This is the only place that reads `RawAnswers`. Both engines consume the
//! record produced here, so the two opinions can never disagree about what
//! the patient said.
//!
//! Normalization is total. A missing, null, or unrecognized answer becomes
//! `false` (or the baseline category), and an unusable temperature becomes
//! `None`, which the temperature policy resolves later.

use serde_json::Value;
use tracing::debug;

use febris_contracts::evidence::{Location, PatientEvidence, RawAnswers, Season};

// Field names accepted for each answer: canonical name first, then the
// Spanish name used by the questionnaire.
const FEVER: &[&str] = &["fever", "fiebre"];
const TEMPERATURE: &[&str] = &["temperature", "temperatura"];
const COUGH: &[&str] = &["cough", "tos"];
const SORE_THROAT: &[&str] = &["sore_throat", "dolor_garganta"];
const RETRO_ORBITAL_PAIN: &[&str] = &["retro_orbital_pain", "dolor_retroocular"];
const MYALGIA: &[&str] = &["myalgia", "mialgia"];
const ANOSMIA: &[&str] = &["anosmia"];
const SEVERE_ABDOMINAL_PAIN: &[&str] = &["severe_abdominal_pain", "dolor_abdominal_intenso"];
const MUCOSAL_BLEEDING: &[&str] = &["mucosal_bleeding", "sangrado_mucosas"];
const DYSPNEA: &[&str] = &["dyspnea", "disnea"];
const ASTHMA: &[&str] = &["asthma", "asma"];
const HYPERTENSION: &[&str] = &["hypertension", "hipertension"];
const TRAVEL: &[&str] = &["travel_to_endemic_area", "viaje_brasil"];
const CONTACT: &[&str] = &["confirmed_contact", "contacto_dengue"];
const LOCATION: &[&str] = &["location", "lugar"];
const SEASON: &[&str] = &["season", "estacion"];

/// Translate free-form intake answers into canonical evidence.
pub fn normalize(raw: &RawAnswers) -> PatientEvidence {
    let flag = |names: &[&str]| raw.get_any(names).map(answer_flag).unwrap_or(false);

    let evidence = PatientEvidence {
        fever: flag(FEVER),
        cough: flag(COUGH),
        sore_throat: flag(SORE_THROAT),
        retro_orbital_pain: flag(RETRO_ORBITAL_PAIN),
        myalgia: flag(MYALGIA),
        anosmia: flag(ANOSMIA),
        severe_abdominal_pain: flag(SEVERE_ABDOMINAL_PAIN),
        mucosal_bleeding: flag(MUCOSAL_BLEEDING),
        dyspnea: flag(DYSPNEA),
        asthma: flag(ASTHMA),
        hypertension: flag(HYPERTENSION),
        travel_to_endemic_area: flag(TRAVEL),
        confirmed_contact: flag(CONTACT),
        temperature: raw.get_any(TEMPERATURE).and_then(answer_temperature),
        location: raw.get_any(LOCATION).map(answer_location).unwrap_or_default(),
        season: raw.get_any(SEASON).map(answer_season).unwrap_or_default(),
    };

    debug!(
        answers = raw.0.len(),
        facts = ?evidence.true_facts(),
        temperature = ?evidence.temperature,
        "normalized intake answers"
    );

    evidence
}

/// Interpret a yes/no answer. Booleans are taken as-is, numbers are true
/// when non-zero, and strings are matched against yes-words in either
/// language. Everything else is `false`.
fn answer_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "sí" | "si" | "s" | "yes" | "y" | "true" | "1"
        ),
        _ => false,
    }
}

/// Interpret a temperature reading in °C. Accepts numbers and numeric
/// strings with either decimal separator; non-finite values are dropped.
fn answer_temperature(value: &Value) -> Option<f64> {
    let reading = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().ok(),
        _ => None,
    };
    reading.filter(|t| t.is_finite())
}

fn answer_location(value: &Value) -> Location {
    let Some(s) = value.as_str() else {
        return Location::Other;
    };
    match s.trim().to_lowercase().as_str() {
        "corrientes" | "endemic_city" | "endemiccity" | "endemic city" => Location::EndemicCity,
        _ => Location::Other,
    }
}

fn answer_season(value: &Value) -> Season {
    let Some(s) = value.as_str() else {
        return Season::Winter;
    };
    match s.trim().to_lowercase().as_str() {
        "verano" | "summer" => Season::Summer,
        _ => Season::Winter,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use febris_contracts::evidence::{FactKey, Location, PatientEvidence, RawAnswers, Season};

    use super::normalize;

    fn raw(value: serde_json::Value) -> RawAnswers {
        RawAnswers::from_value(value)
    }

    #[test]
    fn empty_answers_normalize_to_baseline() {
        let ev = normalize(&RawAnswers::default());
        assert_eq!(ev, PatientEvidence::default());
        assert_eq!(ev.location, Location::Other);
        assert_eq!(ev.season, Season::Winter);
        assert_eq!(ev.temperature, None);
    }

    #[test]
    fn spanish_intake_names_are_accepted() {
        let ev = normalize(&raw(json!({
            "fiebre": true,
            "tos": true,
            "dolor_garganta": true,
            "asma": true,
            "hipertension": true,
            "viaje_brasil": true,
            "contacto_dengue": true,
            "lugar": "Corrientes",
            "estacion": "Verano",
            "dolor_abdominal_intenso": false,
            "disnea": false
        })));

        assert!(ev.fever && ev.cough && ev.sore_throat);
        assert!(ev.asthma && ev.hypertension);
        assert!(ev.travel_to_endemic_area && ev.confirmed_contact);
        assert!(ev.fact(FactKey::EndemicZone));
        assert!(!ev.severe_abdominal_pain);
    }

    #[test]
    fn canonical_names_take_precedence_over_aliases() {
        let ev = normalize(&raw(json!({ "cough": false, "tos": true })));
        assert!(!ev.cough);
    }

    #[test]
    fn lenient_boolean_answers() {
        let ev = normalize(&raw(json!({
            "fever": "Sí",
            "cough": "yes",
            "sore_throat": 1,
            "myalgia": "no",
            "anosmia": 0,
            "dyspnea": "maybe",
            "asthma": ["yes"]
        })));
        assert!(ev.fever);
        assert!(ev.cough);
        assert!(ev.sore_throat);
        assert!(!ev.myalgia);
        assert!(!ev.anosmia);
        assert!(!ev.dyspnea);
        assert!(!ev.asthma);
    }

    #[test]
    fn temperature_parsing() {
        assert_eq!(normalize(&raw(json!({ "temperature": 39.2 }))).temperature, Some(39.2));
        assert_eq!(normalize(&raw(json!({ "temperatura": "38,4" }))).temperature, Some(38.4));
        assert_eq!(normalize(&raw(json!({ "temperature": "hot" }))).temperature, None);
        assert_eq!(normalize(&raw(json!({ "temperature": null }))).temperature, None);
    }

    #[test]
    fn location_and_season_are_case_insensitive() {
        let ev = normalize(&raw(json!({ "location": " corrientes ", "season": "SUMMER" })));
        assert_eq!(ev.location, Location::EndemicCity);
        assert_eq!(ev.season, Season::Summer);

        let ev = normalize(&raw(json!({ "lugar": "Otra ubicación", "estacion": "Invierno" })));
        assert_eq!(ev.location, Location::Other);
        assert_eq!(ev.season, Season::Winter);

        let ev = normalize(&raw(json!({ "location": 7 })));
        assert_eq!(ev.location, Location::Other);
    }
}
