//! Process-wide engines for the reference clinic.
//!
//! Built once at startup: the knowledge base is parsed and the Bayesian
//! network validated here, and both are then shared read-only by every
//! diagnosis. Construction errors are fatal to the caller.

use std::sync::Arc;

use tracing::info;

use febris_bayes::InferenceEngine;
use febris_contracts::error::FebrisResult;
use febris_core::Diagnostician;
use febris_rules::WeightedRuleEngine;

/// Embedded canonical knowledge base.
pub const INFECTOLOGY_KNOWLEDGE: &str = include_str!("../knowledge/infectology.toml");

/// Both engines plus the diagnostician wired over them.
#[derive(Clone)]
pub struct ClinicRuntime {
    network: Arc<InferenceEngine>,
    diagnostician: Diagnostician,
}

impl ClinicRuntime {
    /// Build the runtime over the embedded canonical knowledge base.
    pub fn reference() -> FebrisResult<Self> {
        Self::new(WeightedRuleEngine::from_toml_str(INFECTOLOGY_KNOWLEDGE)?)
    }

    /// Build the runtime over `rules` and a freshly validated network.
    pub fn new(rules: WeightedRuleEngine) -> FebrisResult<Self> {
        let network = Arc::new(InferenceEngine::new()?);
        info!("clinic runtime ready");
        Ok(Self::assemble(Arc::new(rules), network))
    }

    /// A runtime sharing this one's network but evaluating `rules`.
    pub fn with_rules(&self, rules: WeightedRuleEngine) -> Self {
        Self::assemble(Arc::new(rules), Arc::clone(&self.network))
    }

    fn assemble(rules: Arc<WeightedRuleEngine>, network: Arc<InferenceEngine>) -> Self {
        let diagnostician = Diagnostician::new(rules, network.clone());
        Self { network, diagnostician }
    }

    pub fn diagnostician(&self) -> &Diagnostician {
        &self.diagnostician
    }
}
