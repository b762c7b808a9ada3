//! # febris-rules
//!
//! A TOML-loaded knowledge base and the weighted rule engine that turns
//! patient evidence into a qualitative, explained classification.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use febris_rules::engine::WeightedRuleEngine;
//!
//! let engine = WeightedRuleEngine::from_file(Path::new("knowledge/infectology.toml"))?;
//! // Pass `Arc::new(engine)` to `febris_core::Diagnostician::new(...)`.
//! ```
//!
//! ## Scoring
//!
//! Alarms are checked first and force a severe classification. Differential
//! symptoms, one fever band and context conditions then add signed weights to
//! a COVID-19 score and a Dengue score. A disease is preferred only when its
//! score leads by more than the margin (3 by default).

pub mod engine;
pub mod knowledge;
pub mod messages;
pub mod score;

pub use engine::{WeightedRuleEngine, DEFAULT_MARGIN};
pub use knowledge::{load_knowledge_file, load_knowledge_str, KnowledgeFile};
pub use score::ScoreState;

// ── Tests ─────────────────────────────────────────────────────────────────────
