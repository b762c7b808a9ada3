//! Scenario 3: Degraded knowledge
//!
//! The same patient is evaluated three times: with the canonical knowledge
//! base, with one that only defines fever bands, and with none at all. The
//! rule engine never fails; with less knowledge its verdict falls back
//! toward dual suspicion. The network opinion is unaffected.

use std::sync::Arc;

use febris_contracts::{error::FebrisResult, knowledge::KnowledgeBase, language::Language};
use febris_rules::WeightedRuleEngine;

use crate::{cases, runtime::ClinicRuntime};

/// Knowledge base with only the fever-band table.
const BANDS_ONLY: &str = r#"
[fever_bands.low]
min_temperature = 37.0
extra_weight = 1

[fever_bands.high]
min_temperature = 38.0
extra_weight = 2
"#;

/// Run Scenario 3: Degraded knowledge.
pub fn run_scenario(runtime: &ClinicRuntime, lang: Language) -> FebrisResult<()> {
    println!("=== Scenario 3: Degraded knowledge (partial and empty rule tables) ===");
    println!();
    println!("  Patient: alarm case (warning signs of severe Dengue)");
    println!();

    let variants = [
        ("canonical knowledge base", runtime.clone()),
        ("fever bands only", runtime.with_rules(WeightedRuleEngine::from_toml_str(BANDS_ONLY)?)),
        (
            "empty knowledge base",
            runtime.with_rules(WeightedRuleEngine::new(Arc::new(KnowledgeBase::empty()))),
        ),
    ];

    for (name, variant) in &variants {
        let report = variant.diagnostician().diagnose(&cases::alarm_case(), lang);
        let rules = &report.deterministic;
        let dengue = report
            .probabilistic
            .assessment()
            .map(|a| format!("{:.1}%", a.dengue_probability * 100.0))
            .unwrap_or_else(|| "n/a".to_string());

        println!("  Knowledge:              {}", name);
        println!("    Trace lines:          {}", rules.reasoning_trace.len());
        println!("    Scores:               Dengue {} / COVID-19 {}", rules.scores.dengue, rules.scores.covid);
        println!("    Classification:       {}", rules.label);
        println!("    P(Dengue) [network]:  {}", dengue);
        println!();
    }

    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}
