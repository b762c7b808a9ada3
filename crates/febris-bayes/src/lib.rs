//! # febris-bayes
//!
//! Exact probabilistic reasoning for the FEBRIS diagnosis core.
//!
//! ## Overview
//!
//! This crate provides [`InferenceEngine`], which implements the
//! [`ProbabilisticReasoner`](febris_core::traits::ProbabilisticReasoner)
//! trait over a fixed Dengue / COVID-19 Bayesian network. The network is
//! declared through [`NetworkBuilder`], validated once, and then shared
//! read-only. Queries run variable elimination with per-request scratch
//! factors, so one engine serves any number of threads.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use febris_bayes::InferenceEngine;
//! use febris_core::traits::ProbabilisticReasoner;
//!
//! let engine = InferenceEngine::new()?;
//! let assessment = engine.assess(&engine.observe(&evidence))?;
//! ```

pub mod factor;
pub mod inference;
pub mod model;
pub mod network;

pub use inference::VariableElimination;
pub use model::{dengue_covid_network, observations_from_evidence, InferenceEngine};
pub use network::{BayesianNetwork, Cpt, NetworkBuilder};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use febris_contracts::{
        assessment::Observations,
        error::FebrisError,
        evidence::{Location, PatientEvidence, Season},
        language::Language,
    };
    use febris_core::traits::ProbabilisticReasoner;

    use crate::{
        dengue_covid_network, model, observations_from_evidence, BayesianNetwork, Cpt,
        InferenceEngine, NetworkBuilder, VariableElimination,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn engine() -> InferenceEngine {
        InferenceEngine::new().unwrap()
    }

    fn obs(pairs: &[(&str, usize)]) -> Observations {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    /// Posterior by summing the full joint over every assignment.
    fn brute_force(net: &BayesianNetwork, target: usize, evidence: &[(usize, usize)]) -> [f64; 2] {
        let n = net.len();
        let mut dist = [0.0; 2];
        for assignment in 0..1usize << n {
            let state = |i: usize| (assignment >> i) & 1;
            if evidence.iter().any(|&(var, s)| state(var) != s) {
                continue;
            }
            let joint: f64 = (0..n)
                .map(|i| {
                    let node = net.node(i);
                    let column = node.parents().iter().fold(0, |c, &p| (c << 1) | state(p));
                    node.probability(state(i), column)
                })
                .product();
            dist[state(target)] += joint;
        }
        let total = dist[0] + dist[1];
        [dist[0] / total, dist[1] / total]
    }

    fn dengue_patient() -> PatientEvidence {
        PatientEvidence {
            fever: true,
            retro_orbital_pain: true,
            myalgia: true,
            confirmed_contact: true,
            location: Location::EndemicCity,
            season: Season::Summer,
            ..PatientEvidence::default()
        }
    }

    fn covid_patient() -> PatientEvidence {
        PatientEvidence {
            fever: true,
            cough: true,
            sore_throat: true,
            anosmia: true,
            ..PatientEvidence::default()
        }
    }

    // ── Network construction ──────────────────────────────────────────────────

    #[test]
    fn fixed_network_has_thirteen_binary_nodes() {
        let net = dengue_covid_network().unwrap();
        assert_eq!(net.len(), 13);
        let dengue = net.node(net.node_index(model::DENGUE).unwrap());
        assert_eq!(dengue.parents().len(), 4);
        for symptom in model::SYMPTOMS {
            let node = net.node(net.node_index(symptom).unwrap());
            assert_eq!(node.parents().len(), 2, "{symptom}");
        }
    }

    #[test]
    fn dengue_table_follows_exposure_precedence() {
        let net = dengue_covid_network().unwrap();
        let dengue = net.node(net.node_index(model::DENGUE).unwrap());
        // Columns: contact, season, location, travel (contact most significant).
        assert_eq!(dengue.probability(1, 0b1000), 0.85);
        assert_eq!(dengue.probability(1, 0b1111), 0.85);
        assert_eq!(dengue.probability(1, 0b0001), 0.55);
        assert_eq!(dengue.probability(1, 0b0110), 0.20);
        assert_eq!(dengue.probability(1, 0b0010), 0.08);
        assert_eq!(dengue.probability(1, 0b0100), 0.01);
        assert_eq!(dengue.probability(1, 0b0000), 0.01);
    }

    // ── Exactness ─────────────────────────────────────────────────────────────

    #[test]
    fn prior_marginal_of_dengue_matches_hand_computation() {
        let p = engine().inference().probability_present(model::DENGUE, &Observations::new()).unwrap();
        // 0.1 * 0.85 + 0.9 * (0.2 * 0.55 + 0.8 * (0.5 * (0.5 * 0.20 + 0.5 * 0.08) + 0.5 * 0.01))
        assert!((p - 0.238).abs() < 1e-12, "got {p}");
    }

    #[test]
    fn variable_elimination_matches_full_enumeration() {
        let net = Arc::new(dengue_covid_network().unwrap());
        let ve = VariableElimination::new(Arc::clone(&net));

        let cases = [
            Observations::new(),
            obs(&[("fever", 1)]),
            obs(&[("anosmia", 1), ("cough", 1), ("travel", 0)]),
            obs(&[("retro_orbital_pain", 1), ("season", 1), ("location", 1)]),
            observations_from_evidence(&dengue_patient()),
            observations_from_evidence(&covid_patient()),
            observations_from_evidence(&PatientEvidence::default()),
        ];

        for case in &cases {
            let evidence: Vec<(usize, usize)> =
                case.iter().map(|(k, &v)| (net.node_index(k).unwrap(), v)).collect();
            for target in [model::DENGUE, model::COVID, model::FEVER] {
                if case.contains_key(target) {
                    continue;
                }
                let exact = brute_force(&net, net.node_index(target).unwrap(), &evidence);
                let got = ve.posterior(target, case).unwrap();
                for s in 0..2 {
                    assert!(
                        (got[s] - exact[s]).abs() < 1e-12,
                        "{target} | {case:?}: {} vs {}",
                        got[s],
                        exact[s]
                    );
                }
            }
        }
    }

    #[test]
    fn observed_target_returns_its_state() {
        let ve = engine();
        let p = ve.inference().posterior(model::DENGUE, &obs(&[("dengue", 1)])).unwrap();
        assert_eq!(p, [0.0, 1.0]);
    }

    // ── Assessment ────────────────────────────────────────────────────────────

    #[test]
    fn classic_presentations_point_to_the_right_disease() {
        let engine = engine();

        let dengue = engine.assess(&engine.observe(&dengue_patient())).unwrap();
        assert!(dengue.dengue_probability > 0.9, "{dengue:?}");
        assert!(dengue.dengue_probability > dengue.covid_probability);

        let covid = engine.assess(&engine.observe(&covid_patient())).unwrap();
        assert!(covid.covid_probability > 0.9, "{covid:?}");
        assert!(covid.covid_probability > covid.dengue_probability);
    }

    #[test]
    fn probabilities_are_bounded_and_coinfection_is_the_product() {
        let engine = engine();
        let patients = [
            PatientEvidence::default(),
            dengue_patient(),
            covid_patient(),
            PatientEvidence {
                fever: true,
                cough: true,
                myalgia: true,
                dyspnea: true,
                travel_to_endemic_area: true,
                ..PatientEvidence::default()
            },
        ];
        for patient in &patients {
            let a = engine.assess(&engine.observe(patient)).unwrap();
            for p in [a.dengue_probability, a.covid_probability, a.coinfection_probability] {
                assert!((0.0..=1.0).contains(&p), "{a:?}");
            }
            let product = a.dengue_probability * a.covid_probability;
            assert!((a.coinfection_probability - product).abs() < 1e-15);
        }
    }

    #[test]
    fn bounds_hold_for_every_complete_observation() {
        let engine = engine();
        let observable: Vec<String> =
            observations_from_evidence(&PatientEvidence::default()).into_keys().collect();

        for mask in 0..1usize << observable.len() {
            let o: Observations = observable
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), (mask >> i) & 1))
                .collect();
            let a = engine.assess(&o).unwrap();
            assert!((0.0..=1.0).contains(&a.dengue_probability), "{o:?}");
            assert!((0.0..=1.0).contains(&a.covid_probability), "{o:?}");
            assert!(a.coinfection_probability <= a.dengue_probability.min(a.covid_probability));
        }
    }

    #[test]
    fn observed_symptoms_lists_present_symptoms_in_display_order() {
        let engine = engine();
        let a = engine.assess(&engine.observe(&covid_patient())).unwrap();
        assert_eq!(a.observed_symptoms, vec!["fever", "cough", "sore_throat", "anosmia"]);

        let none = engine.assess(&engine.observe(&PatientEvidence::default())).unwrap();
        assert!(none.observed_symptoms.is_empty());
    }

    #[test]
    fn every_network_node_is_observed_from_evidence() {
        let observed = observations_from_evidence(&PatientEvidence::default());
        assert_eq!(observed.len(), 11);
        assert!(observed.values().all(|&s| s == 0));
        assert!(!observed.contains_key(model::DENGUE));
        assert!(!observed.contains_key(model::COVID));
    }

    #[test]
    fn summary_is_localized() {
        let engine = engine();
        let a = engine.assess(&engine.observe(&dengue_patient())).unwrap();
        assert_eq!(
            engine.summarize(&a, Language::En),
            "Bayesian inference with 3 symptoms: Fever, Retro-Orbital Pain, Myalgia. \
             Complete COVID-Dengue network."
        );
        assert_eq!(
            engine.summarize(&a, Language::Es),
            "Inferencia Bayesiana con 3 síntomas: Fiebre, Dolor Retroocular, Mialgia. \
             Red completa COVID-Dengue."
        );
    }

    #[test]
    fn repeated_assessment_is_identical() {
        let engine = engine();
        let o = engine.observe(&dengue_patient());
        assert_eq!(engine.assess(&o).unwrap(), engine.assess(&o).unwrap());
    }

    #[test]
    fn shared_engine_answers_concurrent_queries() {
        let engine = Arc::new(engine());
        let expected = engine.assess(&engine.observe(&covid_patient())).unwrap();

        std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let engine = Arc::clone(&engine);
                    s.spawn(move || engine.assess(&engine.observe(&covid_patient())).unwrap())
                })
                .collect();
            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }

    // ── Invalid queries ───────────────────────────────────────────────────────

    #[test]
    fn unknown_evidence_node_is_invalid_query() {
        let err = engine().assess(&obs(&[("headache", 1)])).unwrap_err();
        assert!(matches!(err, FebrisError::InvalidQuery { ref reason } if reason.contains("headache")));
    }

    #[test]
    fn out_of_range_state_is_invalid_query() {
        let err = engine().assess(&obs(&[("fever", 2)])).unwrap_err();
        assert!(matches!(err, FebrisError::InvalidQuery { .. }));
    }

    #[test]
    fn unknown_target_is_invalid_query() {
        let err = engine().inference().posterior("malaria", &Observations::new()).unwrap_err();
        assert!(matches!(err, FebrisError::InvalidQuery { .. }));
    }

    #[test]
    fn impossible_evidence_is_invalid_query() {
        let net = NetworkBuilder::new()
            .with(Cpt::prior("exposure", 0.0))
            .with(Cpt::bernoulli("disease", &["exposure"], &[0.0, 0.5]))
            .build()
            .unwrap();
        let ve = VariableElimination::new(Arc::new(net));
        let err = ve.posterior("disease", &obs(&[("exposure", 1)])).unwrap_err();
        assert!(matches!(err, FebrisError::InvalidQuery { ref reason } if reason.contains("zero probability")));
    }

    #[test]
    fn network_without_disease_nodes_fails_per_query() {
        let net = NetworkBuilder::new().with(Cpt::prior("fever", 0.3)).build().unwrap();
        let engine = InferenceEngine::with_network(Arc::new(net));
        assert!(matches!(
            engine.assess(&Observations::new()),
            Err(FebrisError::InvalidQuery { .. })
        ));
    }
}
