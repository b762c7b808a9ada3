//! Message catalogue for rule-engine verdicts.
//!
//! Wording only. Every function here is a pure mapping from an already
//! decided verdict and its numbers to text in the requested language.

use febris_contracts::{
    assessment::{Classification, Disease, DiseaseScores},
    language::Language,
};

pub fn label(classification: Classification, lang: Language) -> String {
    let text = match (classification, lang) {
        (Classification::Severe { dominant: Some(Disease::Dengue) }, Language::Es) => {
            "CASO GRAVE: sospecha de Dengue con signos de alarma"
        }
        (Classification::Severe { dominant: Some(Disease::Dengue) }, Language::En) => {
            "SEVERE CASE: suspected Dengue with warning signs"
        }
        (Classification::Severe { dominant: Some(Disease::Covid) }, Language::Es) => {
            "CASO GRAVE: sospecha de COVID-19 con signos de alarma"
        }
        (Classification::Severe { dominant: Some(Disease::Covid) }, Language::En) => {
            "SEVERE CASE: suspected COVID-19 with warning signs"
        }
        (Classification::Severe { dominant: None }, Language::Es) => {
            "CASO GRAVE: cuadro dual indeterminado"
        }
        (Classification::Severe { dominant: None }, Language::En) => {
            "SEVERE CASE: indeterminate dual presentation"
        }
        (Classification::LikelyDengue, Language::Es) => "Alta probabilidad de Dengue",
        (Classification::LikelyDengue, Language::En) => "High probability of Dengue",
        (Classification::LikelyCovid, Language::Es) => "Alta probabilidad de COVID-19",
        (Classification::LikelyCovid, Language::En) => "High probability of COVID-19",
        (Classification::DualSuspicion, Language::Es) => {
            "Sospecha dual / posible coinfección Dengue y COVID-19"
        }
        (Classification::DualSuspicion, Language::En) => {
            "Dual suspicion / possible Dengue and COVID-19 co-infection"
        }
    };
    text.to_string()
}

pub fn action(classification: Classification, lang: Language) -> String {
    let text = match (classification, lang) {
        (Classification::LikelyDengue, Language::Es) => {
            "Test NS1 para Dengue + aislamiento vectorial (mosquitero, repelente)"
        }
        (Classification::LikelyDengue, Language::En) => {
            "NS1 test for Dengue + vector isolation (bed net, repellent)"
        }
        (Classification::LikelyCovid, Language::Es) => {
            "Test PCR para COVID-19 + aislamiento respiratorio"
        }
        (Classification::LikelyCovid, Language::En) => {
            "PCR test for COVID-19 + respiratory isolation"
        }
        // Severe cases use the alarm's own action; this is only reached when
        // the alarm left none.
        (Classification::DualSuspicion | Classification::Severe { .. }, Language::Es) => {
            "Aislamiento mixto (vectorial y respiratorio) + Test NS1 + PCR COVID"
        }
        (Classification::DualSuspicion | Classification::Severe { .. }, Language::En) => {
            "Mixed isolation (vector and respiratory) + NS1 test + COVID PCR"
        }
    };
    text.to_string()
}

pub fn justification(
    classification: Classification,
    scores: DiseaseScores,
    margin: f64,
    alarms: &[String],
    lang: Language,
) -> String {
    let (dengue, covid) = (scores.dengue, scores.covid);
    match (classification, lang) {
        (Classification::Severe { .. }, Language::Es) => format!(
            "Signos de alarma: {}. Puntajes: Dengue {}, COVID-19 {}.",
            alarms.join("; "),
            dengue,
            covid
        ),
        (Classification::Severe { .. }, Language::En) => format!(
            "Warning signs: {}. Scores: Dengue {}, COVID-19 {}.",
            alarms.join("; "),
            dengue,
            covid
        ),
        (Classification::LikelyDengue, Language::Es) => format!(
            "El puntaje de Dengue ({}) supera al de COVID-19 ({}) por más de {} puntos.",
            dengue, covid, margin
        ),
        (Classification::LikelyDengue, Language::En) => format!(
            "Dengue score ({}) exceeds COVID-19 score ({}) by more than {} points.",
            dengue, covid, margin
        ),
        (Classification::LikelyCovid, Language::Es) => format!(
            "El puntaje de COVID-19 ({}) supera al de Dengue ({}) por más de {} puntos.",
            covid, dengue, margin
        ),
        (Classification::LikelyCovid, Language::En) => format!(
            "COVID-19 score ({}) exceeds Dengue score ({}) by more than {} points.",
            covid, dengue, margin
        ),
        (Classification::DualSuspicion, Language::Es) => format!(
            "Puntajes cercanos (Dengue {}, COVID-19 {}): la diferencia no supera {} puntos; no se descarta coinfección.",
            dengue, covid, margin
        ),
        (Classification::DualSuspicion, Language::En) => format!(
            "Close scores (Dengue {}, COVID-19 {}): the difference does not exceed {} points; co-infection cannot be ruled out.",
            dengue, covid, margin
        ),
    }
}
