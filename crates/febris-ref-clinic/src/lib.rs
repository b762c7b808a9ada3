//! # febris-ref-clinic
//!
//! Infectology reference runtime for the FEBRIS dual-opinion diagnosis core.
//!
//! Demonstrates three scenarios using fictional patients:
//!
//! 1. **Conflict case**: respiratory symptoms in a patient with strong Dengue
//!    exposure; the rule engine declines to pick one disease while the
//!    network quantifies both.
//! 2. **Alarm case**: warning signs of severe Dengue override the
//!    differential and set the recommended action.
//! 3. **Degraded knowledge**: the rule engine runs over an empty and a
//!    partial knowledge base and still answers.
//!
//! The canonical knowledge base ships in `knowledge/infectology.toml` and is
//! embedded at compile time.

pub mod cases;
pub mod runtime;
pub mod scenarios;

pub use runtime::{ClinicRuntime, INFECTOLOGY_KNOWLEDGE};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use febris_contracts::{
        assessment::{Classification, Disease},
        knowledge::KnowledgeBase,
        language::Language,
        report::ProbabilisticOutcome,
    };
    use febris_rules::{load_knowledge_str, WeightedRuleEngine};

    use crate::{cases, ClinicRuntime, INFECTOLOGY_KNOWLEDGE};

    fn runtime() -> ClinicRuntime {
        ClinicRuntime::reference().unwrap()
    }

    #[test]
    fn canonical_knowledge_base_loads_every_table() {
        let kb = load_knowledge_str(INFECTOLOGY_KNOWLEDGE).unwrap();
        assert_eq!(kb.alarms().len(), 3);
        assert_eq!(kb.differential().len(), 6);
        assert_eq!(kb.context().len(), 4);
        let bands: Vec<&str> = kb.fever_bands().iter().map(|b| b.name.as_str()).collect();
        assert_eq!(bands, vec!["hyperpyrexia", "high", "low"]);
    }

    #[test]
    fn conflict_case_is_dual_suspicion_with_both_diseases_scored() {
        let report = runtime().diagnostician().diagnose(&cases::conflict_case(), Language::Es);
        let rules = &report.deterministic;

        // COVID-19: cough 3 + sore throat 2 + comorbidities 1.
        // Dengue: fever 38.5 °C in band 'high' 2 + exposure 4 + endemic zone 2.
        assert_eq!(rules.scores.covid, 6.0);
        assert_eq!(rules.scores.dengue, 8.0);
        assert_eq!(rules.classification, Classification::DualSuspicion);
        assert!(!rules.alarm_active);
        assert!(rules.label.starts_with("Sospecha dual"));

        let assessment = report.probabilistic.assessment().unwrap();
        assert!(assessment.dengue_probability > 0.5);
        assert!(assessment.covid_probability > 0.05);
        assert_eq!(assessment.observed_symptoms, vec!["fever", "cough", "sore_throat"]);
    }

    #[test]
    fn alarm_case_is_severe_and_uses_the_last_alarm_action() {
        let report = runtime().diagnostician().diagnose(&cases::alarm_case(), Language::En);
        let rules = &report.deterministic;

        assert_eq!(rules.classification, Classification::Severe { dominant: Some(Disease::Dengue) });
        assert_eq!(rules.triggered_alarms.len(), 2);
        assert!(rules.recommended_action.starts_with("Hospital admission"));
        assert!(rules.reasoning_trace.iter().any(|l| l.contains("hyperpyrexia")));
    }

    #[test]
    fn single_disease_cases_resolve_to_their_disease() {
        let runtime = runtime();
        let dengue = runtime.diagnostician().diagnose(&cases::classic_dengue(), Language::En);
        assert_eq!(dengue.deterministic.classification, Classification::LikelyDengue);
        assert_eq!(dengue.evidence.temperature, Some(39.2));

        let covid = runtime.diagnostician().diagnose(&cases::classic_covid(), Language::En);
        assert_eq!(covid.deterministic.classification, Classification::LikelyCovid);
        let p = covid.probabilistic.assessment().unwrap();
        assert!(p.covid_probability > p.dengue_probability);
    }

    #[test]
    fn unremarkable_case_has_no_findings() {
        let report = runtime().diagnostician().diagnose(&cases::unremarkable(), Language::Es);
        assert_eq!(report.deterministic.scores.covid, 0.0);
        assert_eq!(report.deterministic.scores.dengue, 0.0);
        let trace = &report.deterministic.reasoning_trace;
        assert_eq!(trace.len(), 1);
        assert!(trace[0].starts_with("[fever] 36.5 °C → no band"));
        assert!(report.probabilistic.assessment().unwrap().observed_symptoms.is_empty());
    }

    #[test]
    fn empty_knowledge_keeps_the_network_opinion() {
        let runtime = runtime();
        let degraded =
            runtime.with_rules(WeightedRuleEngine::new(Arc::new(KnowledgeBase::empty())));
        let report = degraded.diagnostician().diagnose(&cases::alarm_case(), Language::En);

        assert_eq!(report.deterministic.classification, Classification::DualSuspicion);
        assert!(!report.deterministic.alarm_active);
        assert!(matches!(report.probabilistic, ProbabilisticOutcome::Assessed { .. }));
    }

    #[test]
    fn concurrent_diagnoses_give_identical_opinions() {
        let runtime = runtime();
        let expected = runtime.diagnostician().diagnose(&cases::conflict_case(), Language::En);

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let diagnostician = runtime.diagnostician().clone();
                    s.spawn(move || diagnostician.diagnose(&cases::conflict_case(), Language::En))
                })
                .collect();
            for handle in handles {
                let report = handle.join().unwrap();
                assert_ne!(report.case_id, expected.case_id);
                assert_eq!(report.evidence, expected.evidence);
                assert_eq!(report.deterministic, expected.deterministic);
                assert_eq!(report.probabilistic, expected.probabilistic);
            }
        });
    }

    #[test]
    fn every_scenario_runs() {
        let runtime = runtime();
        crate::scenarios::conflict_case::run_scenario(&runtime, Language::Es).unwrap();
        crate::scenarios::alarm_case::run_scenario(&runtime, Language::En).unwrap();
        crate::scenarios::degraded_knowledge::run_scenario(&runtime, Language::En).unwrap();
    }
}
