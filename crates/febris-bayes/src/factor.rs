//! Dense factors over binary variables.
//!
//! A factor maps every joint assignment of its variables to a non-negative
//! number. Variables are node indices kept in ascending order; the first
//! variable is the most significant bit of the assignment index.

use crate::network::BayesianNetwork;

/// Factors whose largest entry falls below this are rescaled by 1/max.
pub const RESCALE_THRESHOLD: f64 = 1e-150;

#[derive(Debug, Clone, PartialEq)]
pub struct Factor {
    vars: Vec<usize>,
    values: Vec<f64>,
}

impl Factor {
    /// The factor of node `idx`'s CPT, over the node and its parents.
    pub fn from_node(network: &BayesianNetwork, idx: usize) -> Self {
        let node = network.node(idx);
        let mut vars: Vec<usize> = node.parents().to_vec();
        vars.push(idx);
        vars.sort_unstable();

        let self_pos = position(&vars, idx);
        let parent_pos: Vec<usize> = node.parents().iter().map(|&p| position(&vars, p)).collect();
        let n = vars.len();

        let values = (0..1usize << n)
            .map(|assignment| {
                let column = parent_pos
                    .iter()
                    .fold(0, |col, &pos| (col << 1) | bit(assignment, pos, n));
                node.probability(bit(assignment, self_pos, n), column)
            })
            .collect();

        Self { vars, values }
    }

    /// The constant factor 1 over no variables.
    pub fn unit() -> Self {
        Self { vars: Vec::new(), values: vec![1.0] }
    }

    pub fn vars(&self) -> &[usize] {
        &self.vars
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn contains(&self, var: usize) -> bool {
        self.vars.binary_search(&var).is_ok()
    }

    /// Fix `var` to `state`, dropping it from the scope.
    pub fn reduce(&self, var: usize, state: usize) -> Self {
        let Ok(pos) = self.vars.binary_search(&var) else {
            return self.clone();
        };
        let n = self.vars.len();
        let mut vars = self.vars.clone();
        vars.remove(pos);

        let shift = n - 1 - pos;
        let low_mask = (1usize << shift) - 1;
        let values = (0..1usize << (n - 1))
            .map(|a| {
                let high = (a & !low_mask) << 1;
                let low = a & low_mask;
                self.values[high | (state << shift) | low]
            })
            .collect();

        Self { vars, values }
    }

    /// Pointwise product over the union of both scopes.
    pub fn product(&self, other: &Factor) -> Self {
        let mut vars = self.vars.clone();
        for &v in &other.vars {
            if let Err(pos) = vars.binary_search(&v) {
                vars.insert(pos, v);
            }
        }
        let n = vars.len();
        let left: Vec<usize> = self.vars.iter().map(|&v| position(&vars, v)).collect();
        let right: Vec<usize> = other.vars.iter().map(|&v| position(&vars, v)).collect();

        let values = (0..1usize << n)
            .map(|a| {
                self.values[project(a, &left, n)] * other.values[project(a, &right, n)]
            })
            .collect();

        Self { vars, values }
    }

    /// Marginalize `var` out of the scope.
    pub fn sum_out(&self, var: usize) -> Self {
        let absent = self.reduce(var, 0);
        let present = self.reduce(var, 1);
        let values = absent
            .values
            .iter()
            .zip(&present.values)
            .map(|(a, b)| a + b)
            .collect();
        Self { vars: absent.vars, values }
    }

    /// Divide by the largest entry when it has drifted toward underflow.
    pub fn rescale(&mut self) {
        let max = self.values.iter().copied().fold(0.0_f64, f64::max);
        if max > 0.0 && max < RESCALE_THRESHOLD {
            for v in &mut self.values {
                *v /= max;
            }
        }
    }

    /// Entries divided by their sum, or `None` when the sum is not positive.
    pub fn normalized(&self) -> Option<Vec<f64>> {
        let total: f64 = self.values.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            return None;
        }
        Some(self.values.iter().map(|v| v / total).collect())
    }
}

fn position(vars: &[usize], var: usize) -> usize {
    vars.iter().position(|&v| v == var).unwrap_or_default()
}

fn bit(assignment: usize, pos: usize, n: usize) -> usize {
    (assignment >> (n - 1 - pos)) & 1
}

/// Index into a sub-factor whose variables sit at `positions` of an `n`-wide scope.
fn project(assignment: usize, positions: &[usize], n: usize) -> usize {
    positions.iter().fold(0, |idx, &pos| (idx << 1) | bit(assignment, pos, n))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
