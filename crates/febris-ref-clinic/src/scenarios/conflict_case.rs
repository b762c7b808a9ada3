//! Scenario 1: Conflict case
//!
//! A febrile patient from an endemic city in summer presents with cough and
//! sore throat, has asthma and hypertension, and reports both travel to an
//! endemic area and contact with a confirmed Dengue case.
//!
//! Walk-through for the demo run:
//!   1. Intake answers (Spanish field names) are normalized to evidence
//!   2. Rule engine: respiratory symptoms and comorbidities weigh toward
//!      COVID-19, exposure and endemic context toward Dengue
//!   3. Neither lead exceeds the margin, so the verdict is dual suspicion
//!      with mixed isolation
//!   4. The network reports calibrated probabilities for both diseases

use febris_contracts::{error::FebrisResult, language::Language};

use crate::{cases, runtime::ClinicRuntime, scenarios::print_report};

/// Run Scenario 1: Conflict case.
pub fn run_scenario(runtime: &ClinicRuntime, lang: Language) -> FebrisResult<()> {
    println!("=== Scenario 1: Conflict case (respiratory symptoms + Dengue exposure) ===");
    println!();
    println!("  Patient: adult, resident of Corrientes, summer");
    println!("  Reports: fever, cough, sore throat; asthma, hypertension;");
    println!("           travel to Brazil, contact with a confirmed Dengue case");
    println!();

    let report = runtime.diagnostician().diagnose(&cases::conflict_case(), lang);
    print_report(&report);

    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
