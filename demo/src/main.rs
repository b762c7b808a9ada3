//! FEBRIS Infectology Reference Runtime, Demo CLI
//!
//! Runs the reference scenarios, or diagnoses one patient from a JSON file of
//! intake answers. Both engines are built once at startup and shared by every
//! diagnosis in the run.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- conflict-case --lang en
//!   cargo run -p demo -- alarm-case
//!   cargo run -p demo -- degraded-knowledge
//!   cargo run -p demo -- diagnose --answers patient.json [--knowledge kb.toml] [--lang es|en]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use febris_contracts::{
    error::{FebrisError, FebrisResult},
    evidence::RawAnswers,
    language::Language,
};
use febris_ref_clinic::{
    scenarios::{alarm_case, conflict_case, degraded_knowledge},
    ClinicRuntime,
};
use febris_rules::WeightedRuleEngine;

// ── CLI definition ────────────────────────────────────────────────────────────

/// FEBRIS: dual-opinion Dengue / COVID-19 differential diagnosis demo.
///
/// Every case is evaluated by a weighted rule engine and by exact inference
/// over a Bayesian network, and both opinions are reported.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "FEBRIS infectology reference runtime demo",
    long_about = "Runs FEBRIS reference scenarios showing rule-based scoring, alarm\n\
                  handling, degraded knowledge, and Bayesian posteriors side by side."
)]
struct Cli {
    /// Output language for verdicts and summaries (es or en).
    #[arg(long, global = true, default_value = "es")]
    lang: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three reference scenarios in sequence.
    RunAll,
    /// Scenario 1: respiratory symptoms with strong Dengue exposure.
    ConflictCase,
    /// Scenario 2: warning signs of severe Dengue.
    AlarmCase,
    /// Scenario 3: partial and empty knowledge bases.
    DegradedKnowledge,
    /// Diagnose one patient and print the full report as JSON.
    Diagnose {
        /// JSON file holding one object of intake answers.
        #[arg(long)]
        answers: PathBuf,
        /// Knowledge base TOML to use instead of the embedded one.
        #[arg(long)]
        knowledge: Option<PathBuf>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging. Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();
    let lang = Language::from_tag(&cli.lang);

    let result = match cli.command {
        Command::RunAll => run_scenarios(&Scenario::ALL, lang),
        Command::ConflictCase => run_scenarios(&[Scenario::Conflict], lang),
        Command::AlarmCase => run_scenarios(&[Scenario::Alarm], lang),
        Command::DegradedKnowledge => run_scenarios(&[Scenario::DegradedKnowledge], lang),
        Command::Diagnose { answers, knowledge } => diagnose(&answers, knowledge.as_deref(), lang),
    };

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Scenario {
    Conflict,
    Alarm,
    DegradedKnowledge,
}

impl Scenario {
    const ALL: [Scenario; 3] = [Scenario::Conflict, Scenario::Alarm, Scenario::DegradedKnowledge];

    fn run(self, runtime: &ClinicRuntime, lang: Language) -> FebrisResult<()> {
        match self {
            Scenario::Conflict => conflict_case::run_scenario(runtime, lang),
            Scenario::Alarm => alarm_case::run_scenario(runtime, lang),
            Scenario::DegradedKnowledge => degraded_knowledge::run_scenario(runtime, lang),
        }
    }
}

fn run_scenarios(scenarios: &[Scenario], lang: Language) -> FebrisResult<()> {
    print_banner();
    let runtime = ClinicRuntime::reference()?;
    for scenario in scenarios {
        info!(?scenario, "running scenario");
        scenario.run(&runtime, lang)?;
    }

    println!("All selected scenarios completed successfully.");
    Ok(())
}

// ── Single diagnosis ──────────────────────────────────────────────────────────

fn diagnose(answers: &Path, knowledge: Option<&Path>, lang: Language) -> FebrisResult<()> {
    let runtime = match knowledge {
        Some(path) => ClinicRuntime::new(WeightedRuleEngine::from_file(path)?)?,
        None => ClinicRuntime::reference()?,
    };

    let contents = std::fs::read_to_string(answers).map_err(|e| FebrisError::ConfigError {
        reason: format!("failed to read answers file '{}': {}", answers.display(), e),
    })?;
    let value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| FebrisError::ConfigError {
            reason: format!("failed to parse answers JSON: {}", e),
        })?;
    if !value.is_object() {
        return Err(FebrisError::ConfigError {
            reason: "answers file must hold a JSON object".to_string(),
        });
    }

    info!(answers = %answers.display(), "diagnosing from file");
    let report = runtime.diagnostician().diagnose(&RawAnswers::from_value(value), lang);

    let json = serde_json::to_string_pretty(&report).map_err(|e| FebrisError::ConfigError {
        reason: format!("failed to serialize report: {}", e),
    })?;
    println!("{}", json);
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("FEBRIS: Dual-opinion Febrile Differential");
    println!("Infectology Reference Demo");
    println!("=========================================");
    println!();
    println!("FEBRIS pipeline per case:");
    println!("  [1] Intake answers normalized to canonical evidence");
    println!("  [2] Alarm rules: any warning sign marks the case severe");
    println!("  [3] Differential, fever-band and context rules add Dengue / COVID-19 weight");
    println!("  [4] Resolution: severe, likely Dengue, likely COVID-19, or dual suspicion");
    println!("  [5] Bayesian network: exact posteriors by variable elimination");
    println!();
}
