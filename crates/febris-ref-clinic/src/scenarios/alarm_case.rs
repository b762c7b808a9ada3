//! Scenario 2: Alarm case
//!
//! A Dengue presentation with intense abdominal pain and mucosal bleeding.
//! Alarm rules fire before any scoring; the case is classified severe and
//! the recommended action comes from the last matching alarm.

use febris_contracts::{error::FebrisResult, language::Language};

use crate::{cases, runtime::ClinicRuntime, scenarios::print_report};

/// Run Scenario 2: Alarm case.
pub fn run_scenario(runtime: &ClinicRuntime, lang: Language) -> FebrisResult<()> {
    println!("=== Scenario 2: Alarm case (warning signs of severe Dengue) ===");
    println!();
    println!("  Patient: endemic city, summer, 39.8 °C");
    println!("  Reports: retro-orbital pain, myalgia, severe abdominal pain, mucosal bleeding");
    println!();

    let report = runtime.diagnostician().diagnose(&cases::alarm_case(), lang);
    print_report(&report);

    let rules = &report.deterministic;
    println!(
        "  Alarms triggered:       {} (severe: {})",
        rules.triggered_alarms.len(),
        rules.classification.is_severe()
    );
    println!();
    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}
