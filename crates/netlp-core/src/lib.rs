//! # netlp-core: Network Model and MILP Adapter
//!
//! Provides the directed network data model and the thin solver-agnostic MILP
//! layer shared by the optimization algorithms in `netlp-algo`.
//!
//! ## Design Philosophy
//!
//! Instances are modeled as **directed simple graphs** where:
//! - **Nodes**: opaque identifiers with a display name
//! - **Arcs**: ordered node pairs carrying immutable numeric attributes
//!   (`length`, `secondary_length`, `weight`, `cost`, `capacity`)
//!
//! At most one arc exists per ordered pair, so an [`ArcKey`] (`from`, `to`) is
//! a stable composite key for every per-arc decision variable.
//!
//! ## Quick Start
//!
//! ```rust
//! use netlp_core::*;
//!
//! let mut network = Network::new();
//! let s = network.add_node("s");
//! let t = network.add_node("t");
//! network.add_arc(Arc::new(s, t).with_length(3.0).with_cost(1.0))?;
//!
//! assert_eq!(network.arc_count(), 1);
//! assert_eq!(network.total_length(), 3.0);
//! # Ok::<(), NetlpError>(())
//! ```
//!
//! ## Modules
//!
//! - [`milp`] - Model, variable domains, solve status and backend selection
//! - [`graph_utils`] - Reachability and instance validation
//! - [`config`] - TOML-backed optimizer configuration
//! - [`error`] - Unified error type

use petgraph::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

pub mod config;
pub mod error;
pub mod graph_utils;
pub mod milp;

pub use config::{BoundStep, OptimizerConfig, ParetoSettings, SolverSettings};
pub use error::{NetlpError, NetlpResult};
pub use graph_utils::*;
pub use milp::{
    is_selected, LpSolverKind, MilpModel, ObjectiveSense, SolveStatus, Solution, VarDomain,
    SELECTION_TOLERANCE,
};
pub use petgraph::graph::NodeIndex;

/// Opaque node identifier, assigned in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn new(value: usize) -> Self {
        NodeId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Composite key identifying an arc by its ordered endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArcKey {
    pub from: NodeId,
    pub to: NodeId,
}

impl ArcKey {
    #[inline]
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for ArcKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.from, self.to)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
}

/// A directed arc with the numeric attributes used by the models.
///
/// Attributes a model does not read may be left at their default of zero.
#[derive(Debug, Clone)]
pub struct Arc {
    pub from: NodeId,
    pub to: NodeId,
    /// Primary length (first objective of the bi-objective path problem)
    pub length: f64,
    /// Secondary length (second objective of the bi-objective path problem)
    pub secondary_length: f64,
    /// Resource consumption for weight-constrained paths
    pub weight: f64,
    /// Cost of interdicting this arc
    pub cost: f64,
    /// Flow capacity
    pub capacity: f64,
}

impl Arc {
    pub fn new(from: NodeId, to: NodeId) -> Self {
        Self {
            from,
            to,
            length: 0.0,
            secondary_length: 0.0,
            weight: 0.0,
            cost: 0.0,
            capacity: 0.0,
        }
    }

    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Set both lengths of a bi-objective arc.
    pub fn with_lengths(mut self, length: f64, secondary_length: f64) -> Self {
        self.length = length;
        self.secondary_length = secondary_length;
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    #[inline]
    pub fn key(&self) -> ArcKey {
        ArcKey::new(self.from, self.to)
    }

    /// Read one attribute by selector.
    #[inline]
    pub fn attribute(&self, attribute: ArcAttribute) -> f64 {
        match attribute {
            ArcAttribute::Length => self.length,
            ArcAttribute::SecondaryLength => self.secondary_length,
            ArcAttribute::Weight => self.weight,
            ArcAttribute::Cost => self.cost,
            ArcAttribute::Capacity => self.capacity,
        }
    }
}

/// Selector for a numeric arc attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcAttribute {
    Length,
    SecondaryLength,
    Weight,
    Cost,
    Capacity,
}

impl ArcAttribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArcAttribute::Length => "length",
            ArcAttribute::SecondaryLength => "secondary_length",
            ArcAttribute::Weight => "weight",
            ArcAttribute::Cost => "cost",
            ArcAttribute::Capacity => "capacity",
        }
    }
}

impl fmt::Display for ArcAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed network instance.
///
/// The network is read-only for the algorithms: every solve borrows it
/// immutably and builds its own model.
#[derive(Debug, Clone, Default)]
pub struct Network {
    graph: DiGraph<Node, Arc>,
    index: HashMap<NodeId, NodeIndex>,
    arc_index: HashMap<ArcKey, EdgeIndex>,
}

// Arcs are stored as petgraph edges and mirrored in a key index so that model
// builders can look up an arc, and the variables attached to it, by ArcKey.

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node and return its identifier.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.graph.node_count());
        let idx = self.graph.add_node(Node {
            id,
            name: name.into(),
        });
        self.index.insert(id, idx);
        id
    }

    /// Add an arc between two existing nodes.
    ///
    /// Self-loops and a second arc for the same ordered pair are rejected.
    pub fn add_arc(&mut self, arc: Arc) -> NetlpResult<()> {
        let from = self.node_index(arc.from)?;
        let to = self.node_index(arc.to)?;
        let key = arc.key();
        if arc.from == arc.to {
            return Err(NetlpError::Validation(format!("self-loop at {}", arc.from)));
        }
        if self.arc_index.contains_key(&key) {
            return Err(NetlpError::DuplicateArc(key));
        }
        let edge = self.graph.add_edge(from, to, arc);
        self.arc_index.insert(key, edge);
        Ok(())
    }

    /// Build a complete directed graph on `n` nodes; `attrs` fills in each arc.
    pub fn complete_digraph<F>(n: usize, mut attrs: F) -> Self
    where
        F: FnMut(Arc) -> Arc,
    {
        let mut network = Network::new();
        let ids: Vec<NodeId> = (0..n).map(|i| network.add_node(format!("{}", i))).collect();
        for &u in &ids {
            for &v in &ids {
                if u != v {
                    let arc = attrs(Arc::new(u, v));
                    let key = ArcKey::new(u, v);
                    let edge = network.graph.add_edge(network.index[&u], network.index[&v], arc);
                    network.arc_index.insert(key, edge);
                }
            }
        }
        network
    }

    /// Underlying petgraph storage, for read-only graph algorithms.
    pub fn graph(&self) -> &DiGraph<Node, Arc> {
        &self.graph
    }

    pub fn node_index(&self, id: NodeId) -> NetlpResult<NodeIndex> {
        self.index
            .get(&id)
            .copied()
            .ok_or(NetlpError::UnknownNode(id))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|idx| &self.graph[*idx])
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_weights()
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_weights().map(|n| n.id)
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Arc> + '_ {
        self.graph.edge_weights()
    }

    pub fn arc(&self, key: ArcKey) -> Option<&Arc> {
        self.arc_index.get(&key).map(|e| &self.graph[*e])
    }

    /// Arcs leaving `id` (empty for an unknown node).
    pub fn out_arcs(&self, id: NodeId) -> impl Iterator<Item = &Arc> + '_ {
        self.directed_arcs(id, Direction::Outgoing)
    }

    /// Arcs entering `id` (empty for an unknown node).
    pub fn in_arcs(&self, id: NodeId) -> impl Iterator<Item = &Arc> + '_ {
        self.directed_arcs(id, Direction::Incoming)
    }

    fn directed_arcs(&self, id: NodeId, dir: Direction) -> impl Iterator<Item = &Arc> + '_ {
        self.index
            .get(&id)
            .into_iter()
            .flat_map(move |idx| self.graph.edges_directed(*idx, dir).map(|e| e.weight()))
    }

    /// Sum of an attribute over all arcs.
    pub fn total(&self, attribute: ArcAttribute) -> f64 {
        self.arcs().map(|a| a.attribute(attribute)).sum()
    }

    pub fn total_length(&self) -> f64 {
        self.total(ArcAttribute::Length)
    }

    pub fn total_secondary_length(&self) -> f64 {
        self.total(ArcAttribute::SecondaryLength)
    }

    /// Sum of an attribute over a set of arcs; unknown keys contribute nothing.
    pub fn sum_over<'k, I>(&self, keys: I, attribute: ArcAttribute) -> f64
    where
        I: IntoIterator<Item = &'k ArcKey>,
    {
        keys.into_iter()
            .filter_map(|k| self.arc(*k))
            .map(|a| a.attribute(attribute))
            .sum()
    }

    /// Copy of this network with the given arcs removed. Node identifiers are kept.
    pub fn without_arcs(&self, removed: &BTreeSet<ArcKey>) -> Network {
        let mut network = Network::new();
        for node in self.nodes() {
            network.add_node(node.name.clone());
        }
        for arc in self.arcs().filter(|a| !removed.contains(&a.key())) {
            let key = arc.key();
            let edge = network
                .graph
                .add_edge(network.index[&arc.from], network.index[&arc.to], arc.clone());
            network.arc_index.insert(key, edge);
        }
        network
    }

    pub fn stats(&self) -> NetworkStats {
        NetworkStats {
            num_nodes: self.node_count(),
            num_arcs: self.arc_count(),
            total_length: self.total_length(),
            total_capacity: self.total(ArcAttribute::Capacity),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct NetworkStats {
    pub num_nodes: usize,
    pub num_arcs: usize,
    pub total_length: f64,
    pub total_capacity: f64,
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} nodes, {} arcs, total length {:.1}, total capacity {:.1}",
            self.num_nodes, self.num_arcs, self.total_length, self.total_capacity
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Network, NodeId, NodeId, NodeId) {
        let mut network = Network::new();
        let a = network.add_node("a");
        let b = network.add_node("b");
        let c = network.add_node("c");
        network.add_arc(Arc::new(a, b).with_length(1.0).with_capacity(4.0)).unwrap();
        network.add_arc(Arc::new(b, c).with_length(2.0).with_capacity(3.0)).unwrap();
        network.add_arc(Arc::new(a, c).with_length(5.0).with_capacity(1.0)).unwrap();
        (network, a, b, c)
    }

    #[test]
    fn test_add_arc_rejects_duplicates_and_loops() {
        let (mut network, a, b, _) = triangle();

        let dup = network.add_arc(Arc::new(a, b));
        assert!(matches!(dup, Err(NetlpError::DuplicateArc(k)) if k == ArcKey::new(a, b)));

        let reverse = network.add_arc(Arc::new(b, a));
        assert!(reverse.is_ok());

        let looped = network.add_arc(Arc::new(a, a));
        assert!(matches!(looped, Err(NetlpError::Validation(_))));

        let unknown = network.add_arc(Arc::new(a, NodeId::new(42)));
        assert!(matches!(unknown, Err(NetlpError::UnknownNode(_))));
    }

    #[test]
    fn test_in_and_out_arcs() {
        let (network, a, b, c) = triangle();

        let out_a: Vec<ArcKey> = network.out_arcs(a).map(Arc::key).collect();
        assert_eq!(out_a.len(), 2);
        assert!(out_a.contains(&ArcKey::new(a, b)));
        assert!(out_a.contains(&ArcKey::new(a, c)));

        let in_c: Vec<ArcKey> = network.in_arcs(c).map(Arc::key).collect();
        assert_eq!(in_c.len(), 2);
        assert_eq!(network.in_arcs(a).count(), 0);
        assert_eq!(network.out_arcs(NodeId::new(9)).count(), 0);
    }

    #[test]
    fn test_totals_and_lookup() {
        let (network, a, b, c) = triangle();

        assert_eq!(network.total_length(), 8.0);
        assert_eq!(network.total(ArcAttribute::Capacity), 8.0);
        assert_eq!(network.arc(ArcKey::new(b, c)).map(|a| a.length), Some(2.0));
        assert!(network.arc(ArcKey::new(c, a)).is_none());

        let keys: BTreeSet<ArcKey> = [ArcKey::new(a, b), ArcKey::new(b, c)].into_iter().collect();
        assert_eq!(network.sum_over(&keys, ArcAttribute::Length), 3.0);
    }

    #[test]
    fn test_without_arcs_keeps_nodes() {
        let (network, a, b, c) = triangle();
        let removed: BTreeSet<ArcKey> = [ArcKey::new(a, c)].into_iter().collect();
        let residual = network.without_arcs(&removed);

        assert_eq!(residual.node_count(), 3);
        assert_eq!(residual.arc_count(), 2);
        assert!(residual.arc(ArcKey::new(a, c)).is_none());
        assert!(residual.arc(ArcKey::new(b, c)).is_some());
        // the original is untouched
        assert_eq!(network.arc_count(), 3);
    }

    #[test]
    fn test_complete_digraph() {
        let network = Network::complete_digraph(4, |arc| arc.with_lengths(1.0, 2.0));
        assert_eq!(network.node_count(), 4);
        assert_eq!(network.arc_count(), 12);
        assert_eq!(network.total_secondary_length(), 24.0);
        let stats = network.stats();
        assert!(stats.to_string().starts_with("4 nodes, 12 arcs"));
    }
}
