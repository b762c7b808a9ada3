//! Exact inference by variable elimination.
//!
//! Query flow:
//!
//! 1. Resolve the target and every observed node to indices; reject unknown
//!    names and states outside {0, 1}.
//! 2. Keep only the ancestral set of the target and the evidence. Nodes
//!    outside it are barren and sum to one.
//! 3. Build one factor per kept node and fix the observed variables.
//! 4. Eliminate the hidden variables one at a time, always picking the
//!    variable whose combined factor is smallest (ties go to the lower
//!    node index), so the order is deterministic.
//! 5. Multiply what remains and normalize. A zero total means the evidence
//!    has probability zero under the model.

use std::sync::Arc;

use tracing::debug;

use febris_contracts::{
    assessment::Observations,
    error::{FebrisError, FebrisResult},
};

use crate::{factor::Factor, network::BayesianNetwork};

/// Answers posterior queries over one shared network.
#[derive(Debug, Clone)]
pub struct VariableElimination {
    network: Arc<BayesianNetwork>,
}

impl VariableElimination {
    pub fn new(network: Arc<BayesianNetwork>) -> Self {
        Self { network }
    }

    /// P(`target` = 0 | evidence) and P(`target` = 1 | evidence).
    pub fn posterior(&self, target: &str, observations: &Observations) -> FebrisResult<[f64; 2]> {
        let target_idx = self.network.node_index(target).ok_or_else(|| FebrisError::InvalidQuery {
            reason: format!("unknown target node '{}'", target),
        })?;
        let evidence = self.resolve_evidence(observations)?;

        if let Some(&(_, state)) = evidence.iter().find(|(idx, _)| *idx == target_idx) {
            let mut dist = [0.0; 2];
            dist[state] = 1.0;
            return Ok(dist);
        }

        let relevant = self
            .network
            .ancestral_set(evidence.iter().map(|(idx, _)| *idx).chain([target_idx]));

        let mut factors: Vec<Factor> = Vec::with_capacity(relevant.len());
        let mut hidden: Vec<usize> = Vec::new();
        for &idx in self.network.topological_order() {
            if !relevant.contains(&idx) {
                continue;
            }
            let mut factor = Factor::from_node(&self.network, idx);
            for &(var, state) in &evidence {
                factor = factor.reduce(var, state);
            }
            factors.push(factor);
            if idx != target_idx && !evidence.iter().any(|(var, _)| *var == idx) {
                hidden.push(idx);
            }
        }

        let order = eliminate(&mut factors, hidden);
        debug!(query = target, order = ?order, "variable elimination complete");

        let joint = factors.iter().fold(Factor::unit(), |acc, f| acc.product(f));
        match joint.normalized() {
            Some(p) if p.len() == 2 => Ok([p[0], p[1]]),
            _ => Err(FebrisError::InvalidQuery {
                reason: "evidence has zero probability under the model".to_string(),
            }),
        }
    }

    /// P(`target` = 1 | evidence).
    pub fn probability_present(&self, target: &str, observations: &Observations) -> FebrisResult<f64> {
        Ok(self.posterior(target, observations)?[1])
    }

    fn resolve_evidence(&self, observations: &Observations) -> FebrisResult<Vec<(usize, usize)>> {
        observations
            .iter()
            .map(|(name, &state)| {
                let idx = self.network.node_index(name).ok_or_else(|| FebrisError::InvalidQuery {
                    reason: format!("unknown evidence node '{}'", name),
                })?;
                if state > 1 {
                    return Err(FebrisError::InvalidQuery {
                        reason: format!("state {} of '{}' is outside {{0, 1}}", state, name),
                    });
                }
                Ok((idx, state))
            })
            .collect()
    }
}

/// Eliminate every variable in `hidden` from `factors`, greedily by
/// smallest combined scope. Returns the order used.
fn eliminate(factors: &mut Vec<Factor>, mut hidden: Vec<usize>) -> Vec<usize> {
    let mut order = Vec::with_capacity(hidden.len());
    while !hidden.is_empty() {
        let (slot, var, width) = hidden
            .iter()
            .enumerate()
            .map(|(slot, &var)| (slot, var, combined_width(factors.as_slice(), var)))
            .min_by_key(|&(_, var, width)| (width, var))
            .unwrap_or((0, hidden[0], 0));
        hidden.swap_remove(slot);
        debug!(var, width, "eliminating variable");

        let (touching, rest): (Vec<Factor>, Vec<Factor>) =
            factors.drain(..).partition(|f| f.contains(var));
        *factors = rest;

        let mut combined = touching
            .iter()
            .fold(Factor::unit(), |acc, f| acc.product(f))
            .sum_out(var);
        combined.rescale();
        factors.push(combined);
        order.push(var);
    }
    order
}

/// Number of distinct variables across the factors that mention `var`.
fn combined_width(factors: &[Factor], var: usize) -> usize {
    let mut scope: Vec<usize> = factors
        .iter()
        .filter(|f| f.contains(var))
        .flat_map(|f| f.vars().iter().copied())
        .collect();
    scope.sort_unstable();
    scope.dedup();
    scope.len()
}
