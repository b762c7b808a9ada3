//! Infectology reference runtime demo scenarios.
//!
//! Each scenario runs real FEBRIS components (knowledge base, rule engine,
//! Bayesian network, diagnostician) over fictional patient answers and
//! prints both opinions side by side.

pub mod alarm_case;
pub mod conflict_case;
pub mod degraded_knowledge;

use febris_contracts::report::{DualReport, ProbabilisticOutcome};

/// Print both opinions of `report` in the demo's layout.
pub fn print_report(report: &DualReport) {
    let rules = &report.deterministic;

    println!("  Case id:                {}", report.case_id.0);
    println!("  Temperature used:       {} °C", report.evidence.resolved_temperature());
    println!();
    println!("  [rules] Classification: {}", rules.label);
    println!("  [rules] Scores:         Dengue {} / COVID-19 {}", rules.scores.dengue, rules.scores.covid);
    println!("  [rules] Justification:  {}", rules.justification);
    println!("  [rules] Action:         {}", rules.recommended_action);
    if rules.reasoning_trace.is_empty() {
        println!("  [rules] Trace:          (no rule fired)");
    } else {
        println!("  [rules] Trace:");
        for line in &rules.reasoning_trace {
            println!("            {}", line);
        }
    }
    println!();

    match &report.probabilistic {
        ProbabilisticOutcome::Assessed { assessment, summary } => {
            println!("  [bayes] P(Dengue):      {:.1}%", assessment.dengue_probability * 100.0);
            println!("  [bayes] P(COVID-19):    {:.1}%", assessment.covid_probability * 100.0);
            println!("  [bayes] P(co-infection):{:.1}%", assessment.coinfection_probability * 100.0);
            println!("  [bayes] {}", summary);
        }
        ProbabilisticOutcome::Failed { reason } => {
            println!("  [bayes] FAILED: {}", reason);
        }
    }
    println!();
}
