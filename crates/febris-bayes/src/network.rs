//! Binary Bayesian network definition and validation.
//!
//! A network is declared as a list of conditional probability tables, one per
//! node, through `NetworkBuilder`. `build()` validates everything once and
//! returns an immutable `BayesianNetwork`; a table that does not describe a
//! proper distribution, or a parent relation that loops, is rejected with
//! `FebrisError::InvalidModel`.
//!
//! Every node has exactly two states: 0 = absent, 1 = present.
//!
//! Table layout: `rows[state][column]`, where the column enumerates parent
//! configurations with the first listed parent as the most significant bit.
//! For parents `[a, b]` the columns are `(a0,b0), (a0,b1), (a1,b0), (a1,b1)`.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::info;

use febris_contracts::error::{FebrisError, FebrisResult};

/// Number of states of every node.
pub const STATES: usize = 2;

/// Allowed deviation of a CPT column sum from 1.
pub const COLUMN_SUM_TOLERANCE: f64 = 1e-9;

/// A conditional probability table as declared, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Cpt {
    pub node: String,
    pub parents: Vec<String>,
    /// `rows[0]` = P(absent | column), `rows[1]` = P(present | column).
    pub rows: [Vec<f64>; STATES],
}

impl Cpt {
    /// A table with explicit rows.
    pub fn table(node: &str, parents: &[&str], rows: [Vec<f64>; STATES]) -> Self {
        Self {
            node: node.to_string(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            rows,
        }
    }

    /// A table given only P(present) per column; P(absent) is its complement.
    pub fn bernoulli(node: &str, parents: &[&str], p_present: &[f64]) -> Self {
        let absent = p_present.iter().map(|p| 1.0 - p).collect();
        Self::table(node, parents, [absent, p_present.to_vec()])
    }

    /// A root node with prior P(present) = `p_present`.
    pub fn prior(node: &str, p_present: f64) -> Self {
        Self::bernoulli(node, &[], &[p_present])
    }
}

/// A validated node.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    parents: Vec<usize>,
    rows: [Vec<f64>; STATES],
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent node indices in table order.
    pub fn parents(&self) -> &[usize] {
        &self.parents
    }

    /// P(self = `state` | parents in configuration `column`).
    pub fn probability(&self, state: usize, column: usize) -> f64 {
        self.rows[state][column]
    }
}

/// An immutable, validated directed acyclic graph of binary nodes.
///
/// Safe to share across threads; nothing in it changes after `build()`.
#[derive(Debug, Clone)]
pub struct BayesianNetwork {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    topological_order: Vec<usize>,
}

impl BayesianNetwork {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Node indices ordered so every parent precedes its children.
    pub fn topological_order(&self) -> &[usize] {
        &self.topological_order
    }

    /// `seeds` plus every node with a directed path into one of them.
    pub fn ancestral_set(&self, seeds: impl IntoIterator<Item = usize>) -> HashSet<usize> {
        let mut set = HashSet::new();
        let mut stack: Vec<usize> = seeds.into_iter().collect();
        while let Some(idx) = stack.pop() {
            if set.insert(idx) {
                stack.extend(self.nodes[idx].parents.iter().copied());
            }
        }
        set
    }
}

/// Collects CPTs and validates them into a `BayesianNetwork`.
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    cpts: Vec<Cpt>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare one node through its CPT. Parents may be declared later.
    pub fn with(mut self, cpt: Cpt) -> Self {
        self.cpts.push(cpt);
        self
    }

    /// Validate every table and the graph, then freeze the network.
    pub fn build(self) -> FebrisResult<BayesianNetwork> {
        let mut index = HashMap::with_capacity(self.cpts.len());
        for (i, cpt) in self.cpts.iter().enumerate() {
            if index.insert(cpt.node.clone(), i).is_some() {
                return Err(invalid(format!("node '{}' is declared twice", cpt.node)));
            }
        }

        let mut nodes = Vec::with_capacity(self.cpts.len());
        for cpt in self.cpts {
            let parents = resolve_parents(&cpt, &index)?;
            check_table(&cpt)?;
            nodes.push(Node {
                name: cpt.node,
                parents,
                rows: cpt.rows,
            });
        }

        let topological_order = topological_sort(&nodes)?;

        info!(nodes = nodes.len(), "bayesian network validated");

        Ok(BayesianNetwork { nodes, index, topological_order })
    }
}

fn invalid(reason: String) -> FebrisError {
    FebrisError::InvalidModel { reason }
}

fn resolve_parents(cpt: &Cpt, index: &HashMap<String, usize>) -> FebrisResult<Vec<usize>> {
    let mut parents = Vec::with_capacity(cpt.parents.len());
    for name in &cpt.parents {
        let idx = index.get(name).copied().ok_or_else(|| {
            invalid(format!("node '{}' lists unknown parent '{}'", cpt.node, name))
        })?;
        if parents.contains(&idx) {
            return Err(invalid(format!("node '{}' lists parent '{}' twice", cpt.node, name)));
        }
        parents.push(idx);
    }
    Ok(parents)
}

fn check_table(cpt: &Cpt) -> FebrisResult<()> {
    let columns = 1usize << cpt.parents.len();
    for (state, row) in cpt.rows.iter().enumerate() {
        if row.len() != columns {
            return Err(invalid(format!(
                "CPT of '{}' has {} column(s) in row {}, expected {}",
                cpt.node,
                row.len(),
                state,
                columns
            )));
        }
        if let Some(p) = row.iter().find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0) {
            return Err(invalid(format!(
                "CPT of '{}' holds {} which is not a probability",
                cpt.node, p
            )));
        }
    }
    for column in 0..columns {
        let sum: f64 = cpt.rows.iter().map(|row| row[column]).sum();
        if (sum - 1.0).abs() > COLUMN_SUM_TOLERANCE {
            return Err(invalid(format!(
                "CPT column {} of '{}' sums to {}, expected 1",
                column, cpt.node, sum
            )));
        }
    }
    Ok(())
}

/// Kahn's algorithm; any node left unvisited sits on a cycle.
fn topological_sort(nodes: &[Node]) -> FebrisResult<Vec<usize>> {
    let mut in_degree: Vec<usize> = nodes.iter().map(|n| n.parents.len()).collect();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (child, node) in nodes.iter().enumerate() {
        for &parent in &node.parents {
            children[parent].push(child);
        }
    }

    let mut ready: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut order = Vec::with_capacity(nodes.len());
    while let Some(idx) = ready.pop_front() {
        order.push(idx);
        for &child in &children[idx] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                ready.push_back(child);
            }
        }
    }

    if order.len() != nodes.len() {
        let cyclic: Vec<&str> = (0..nodes.len())
            .filter(|&i| in_degree[i] > 0)
            .map(|i| nodes[i].name.as_str())
            .collect();
        return Err(invalid(format!("graph contains a cycle through {}", cyclic.join(", "))));
    }
    Ok(order)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
