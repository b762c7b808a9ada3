//! Fictional patient intake answers for the FEBRIS reference runtime.
//!
//! All cases are hardcoded and fictional. Some use the Spanish intake field
//! names of the clinic's questionnaire, some the English canonical names;
//! the normalizer accepts both.

use serde_json::json;

use febris_contracts::evidence::RawAnswers;

// ── Conflict case ─────────────────────────────────────────────────────────────

/// Adult resident of Corrientes seen in summer.
///
/// Respiratory presentation (fever, cough, sore throat) in a patient with
/// asthma and treated hypertension, who also travelled to Brazil and had
/// close contact with a confirmed Dengue case. Both diseases accumulate
/// weight and neither leads by enough to be preferred.
pub fn conflict_case() -> RawAnswers {
    RawAnswers::from_value(json!({
        "lugar": "Corrientes",
        "estacion": "Verano",
        "fiebre": "sí",
        "tos": "sí",
        "dolor_garganta": "sí",
        "asma": "sí",
        "hipertension": "sí",
        "viaje_brasil": "sí",
        "contacto_dengue": "sí"
    }))
}

// ── Alarm case ────────────────────────────────────────────────────────────────

/// Dengue presentation with two warning signs of severe disease.
pub fn alarm_case() -> RawAnswers {
    RawAnswers::from_value(json!({
        "location": "endemic_city",
        "season": "summer",
        "fever": true,
        "temperature": 39.8,
        "retro_orbital_pain": true,
        "myalgia": true,
        "severe_abdominal_pain": true,
        "mucosal_bleeding": true
    }))
}

// ── Single-disease cases ──────────────────────────────────────────────────────

/// Classic Dengue: high fever, eye and muscle pain, confirmed contact.
pub fn classic_dengue() -> RawAnswers {
    RawAnswers::from_value(json!({
        "lugar": "Corrientes",
        "estacion": "Verano",
        "fiebre": true,
        "temperatura": "39,2",
        "dolor_retroocular": true,
        "mialgia": true,
        "contacto_dengue": true
    }))
}

/// Classic COVID-19: fever, respiratory symptoms and loss of smell, no
/// Dengue exposure, outside the endemic area.
pub fn classic_covid() -> RawAnswers {
    RawAnswers::from_value(json!({
        "location": "Buenos Aires",
        "season": "winter",
        "fever": "yes",
        "temperature": 38.1,
        "cough": "yes",
        "sore_throat": "yes",
        "anosmia": "yes"
    }))
}

/// Afebrile patient with nothing to report.
pub fn unremarkable() -> RawAnswers {
    RawAnswers::from_value(json!({
        "fiebre": "no",
        "tos": "no"
    }))
}

