use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use tracing::warn;

use crate::error::{GraphError, Result};

/// Dense internal node index, assigned in insertion order.
pub type NodeId = usize;

/// Bound on node labels: cheap to clone, hashable, printable in errors.
pub trait Label: Clone + Eq + Hash + Display {}

impl<T: Clone + Eq + Hash + Display> Label for T {}

/// A directed, weighted edge in the adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    pub weight: f64,
}

/// One `(from, to, weight)` triple for bulk loading.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRecord<L> {
    pub from: L,
    pub to: L,
    pub weight: f64,
}

impl<L> EdgeRecord<L> {
    pub fn new(from: L, to: L, weight: f64) -> Self {
        Self { from, to, weight }
    }
}

/// In-memory weighted digraph: label interning + per-node outgoing adjacency.
///
/// Nodes are unique by label and never removed. At most one edge is kept per
/// ordered `(from, to)` pair; inserting the pair again replaces its weight.
/// Weights are assumed finite and non-negative; validation belongs to
/// whoever feeds the graph (see `load`).
#[derive(Debug, Clone)]
pub struct Graph<L: Label> {
    labels: Vec<L>,
    index: HashMap<L, NodeId>,
    outgoing: Vec<Vec<Edge>>,
}

impl<L: Label> Graph<L> {
    pub fn new() -> Self {
        Self {
            labels: Vec::new(),
            index: HashMap::new(),
            outgoing: Vec::new(),
        }
    }

    /// Pre-allocate for a known graph size.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            labels: Vec::with_capacity(node_count),
            index: HashMap::with_capacity(node_count),
            outgoing: Vec::with_capacity(node_count),
        }
    }

    /// Add a node if its label is new. Returns `false` (and changes nothing)
    /// when the label is already present.
    pub fn insert_node(&mut self, label: L) -> bool {
        if self.index.contains_key(&label) {
            return false;
        }
        let id = self.labels.len();
        self.index.insert(label.clone(), id);
        self.labels.push(label);
        self.outgoing.push(Vec::new());
        true
    }

    pub fn contains_node(&self, label: &L) -> bool {
        self.index.contains_key(label)
    }

    /// Store the directed edge `from -> to`. Both endpoints must already be
    /// nodes. Returns the previous weight if the pair was already connected.
    pub fn insert_edge(&mut self, from: &L, to: &L, weight: f64) -> Result<Option<f64>> {
        let from_id = self.require(from)?;
        let to_id = self.require(to)?;

        let edges = &mut self.outgoing[from_id];
        if let Some(existing) = edges.iter_mut().find(|e| e.target == to_id) {
            let previous = existing.weight;
            existing.weight = weight;
            if previous != weight {
                warn!(%from, %to, previous, weight, "replaced edge weight");
            }
            return Ok(Some(previous));
        }

        edges.push(Edge {
            target: to_id,
            weight,
        });
        Ok(None)
    }

    pub fn contains_edge(&self, from: &L, to: &L) -> bool {
        match (self.node_id(from), self.node_id(to)) {
            (Some(f), Some(t)) => self.find_edge(f, t).is_some(),
            _ => false,
        }
    }

    /// Weight of the edge `from -> to`.
    pub fn edge_weight(&self, from: &L, to: &L) -> Result<f64> {
        let from_id = self.require(from)?;
        let to_id = self.require(to)?;
        self.find_edge(from_id, to_id)
            .map(|e| e.weight)
            .ok_or_else(|| GraphError::edge_not_found(from, to))
    }

    /// Outgoing `(neighbor, weight)` pairs of a node, in insertion order.
    pub fn outgoing<'a>(&'a self, label: &L) -> Result<impl Iterator<Item = (&'a L, f64)> + 'a> {
        let id = self.require(label)?;
        Ok(self.outgoing[id]
            .iter()
            .map(move |e| (&self.labels[e.target], e.weight)))
    }

    /// All node labels in insertion order.
    pub fn node_labels(&self) -> impl Iterator<Item = &L> {
        self.labels.iter()
    }

    /// Bulk load `(from, to, weight)` records, creating endpoints as needed.
    pub fn load_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = EdgeRecord<L>>,
    {
        for record in edges {
            self.insert_node(record.from.clone());
            self.insert_node(record.to.clone());
            // Both endpoints were just ensured, so this cannot fail.
            let _ = self.insert_edge(&record.from, &record.to, record.weight);
        }
    }

    /// Resolve a label to its internal index.
    pub fn node_id(&self, label: &L) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    /// Resolve an internal index back to its label.
    pub fn label(&self, id: NodeId) -> Option<&L> {
        self.labels.get(id)
    }

    /// Outgoing edges of a node by index. Empty for out-of-range indices.
    pub fn neighbors_out(&self, id: NodeId) -> &[Edge] {
        self.outgoing.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.outgoing.iter().map(|v| v.len()).sum()
    }

    /// Approximate memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let labels_mem = self.labels.len() * (size_of::<L>() * 2 + size_of::<NodeId>() + 16);
        let edges_mem: usize = self
            .outgoing
            .iter()
            .map(|v| size_of::<Vec<Edge>>() + v.capacity() * size_of::<Edge>())
            .sum();

        labels_mem + edges_mem
    }

    fn require(&self, label: &L) -> Result<NodeId> {
        self.node_id(label)
            .ok_or_else(|| GraphError::node_not_found(label))
    }

    fn find_edge(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.outgoing[from].iter().find(|e| e.target == to)
    }
}

impl<L: Label> Default for Graph<L> {
    fn default() -> Self {
        Self::new()
    }
}
