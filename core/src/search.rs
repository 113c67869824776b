use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::Serialize;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Label, NodeId};

/// One discovered route to a node: the node, the accumulated cost from the
/// source, and the arena slot of the previous hop (`None` for the source).
///
/// A node may own several records while the search runs, one per cheaper
/// discovery; only the first one extracted from the frontier is kept as its
/// settled route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchNode {
    pub node: NodeId,
    pub cost: f64,
    pub predecessor: Option<usize>,
}

/// Outcome of a successful single-pair search.
///
/// Owns the search arena, so the path can be read back by following
/// predecessor slots from the terminal record.
#[derive(Debug, Clone)]
pub struct PathSearch {
    arena: Vec<SearchNode>,
    terminal: usize,
    nodes_settled: usize,
}

impl PathSearch {
    /// The terminal record: the target, its cost and its predecessor.
    pub fn terminal(&self) -> &SearchNode {
        &self.arena[self.terminal]
    }

    /// Total cost of the path.
    pub fn cost(&self) -> f64 {
        self.terminal().cost
    }

    /// Node indices along the path, source first.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut slot = Some(self.terminal);
        while let Some(s) = slot {
            let record = &self.arena[s];
            path.push(record.node);
            slot = record.predecessor;
        }
        path.reverse();
        path
    }

    /// Labels along the path, source first.
    pub fn labels<L: Label>(&self, graph: &Graph<L>) -> Vec<L> {
        self.node_ids()
            .into_iter()
            .filter_map(|id| graph.label(id).cloned())
            .collect()
    }

    /// Number of nodes settled before the target was reached.
    pub fn nodes_settled(&self) -> usize {
        self.nodes_settled
    }

    /// Number of search records created, stale ones included.
    pub fn nodes_discovered(&self) -> usize {
        self.arena.len()
    }
}

/// A node reached by a full single-source expansion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reached<L> {
    pub label: L,
    pub cost: f64,
    pub hops: usize,
    /// Previous node on one cheapest route from the source.
    pub predecessor: L,
}

/// Frontier entry ordered so that `BinaryHeap` pops the lowest cost first.
/// Equal costs pop in discovery order, which keeps results deterministic.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    cost: f64,
    slot: usize,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Per-call Dijkstra state. Nothing here is shared between calls.
struct Search<'g, L: Label> {
    graph: &'g Graph<L>,
    arena: Vec<SearchNode>,
    frontier: BinaryHeap<FrontierEntry>,
    settled: Vec<bool>,
    best: Vec<f64>,
    nodes_settled: usize,
}

impl<'g, L: Label> Search<'g, L> {
    fn new(graph: &'g Graph<L>, source: NodeId) -> Self {
        let n = graph.node_count();
        let mut best = vec![f64::INFINITY; n];
        best[source] = 0.0;

        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry { cost: 0.0, slot: 0 });

        Self {
            graph,
            arena: vec![SearchNode {
                node: source,
                cost: 0.0,
                predecessor: None,
            }],
            frontier,
            settled: vec![false; n],
            best,
            nodes_settled: 0,
        }
    }

    /// Pop frontier entries until one names an unsettled node, settle it and
    /// return its slot. Entries for already-settled nodes are stale and
    /// dropped here.
    fn settle_next(&mut self) -> Option<usize> {
        while let Some(entry) = self.frontier.pop() {
            let node = self.arena[entry.slot].node;
            if self.settled[node] {
                continue;
            }
            self.settled[node] = true;
            self.nodes_settled += 1;
            return Some(entry.slot);
        }
        None
    }

    /// Relax every outgoing edge of the node settled at `slot`.
    fn expand(&mut self, slot: usize) {
        let graph = self.graph;
        let current = self.arena[slot];
        for edge in graph.neighbors_out(current.node) {
            if self.settled[edge.target] {
                continue;
            }
            let candidate = current.cost + edge.weight;
            if candidate < self.best[edge.target] {
                self.best[edge.target] = candidate;
                self.arena.push(SearchNode {
                    node: edge.target,
                    cost: candidate,
                    predecessor: Some(slot),
                });
                self.frontier.push(FrontierEntry {
                    cost: candidate,
                    slot: self.arena.len() - 1,
                });
            }
        }
    }
}

fn resolve<L: Label>(graph: &Graph<L>, label: &L) -> Result<NodeId> {
    graph
        .node_id(label)
        .ok_or_else(|| GraphError::node_not_found(label))
}

/// Dijkstra search from `source` to `target`.
///
/// Fails with `NodeNotFound` before doing any work if either label is
/// unknown (source checked first), and with `PathNotFound` if the frontier
/// drains before `target` is settled. Among equal-cost routes the one
/// discovered first is reported.
pub fn compute_shortest_path<L: Label>(graph: &Graph<L>, source: &L, target: &L) -> Result<PathSearch> {
    let source_id = resolve(graph, source)?;
    let target_id = resolve(graph, target)?;

    let mut search = Search::new(graph, source_id);

    while let Some(slot) = search.settle_next() {
        if search.arena[slot].node == target_id {
            debug!(
                %source,
                %target,
                cost = search.arena[slot].cost,
                settled = search.nodes_settled,
                discovered = search.arena.len(),
                "shortest path found"
            );
            return Ok(PathSearch {
                arena: search.arena,
                terminal: slot,
                nodes_settled: search.nodes_settled,
            });
        }
        search.expand(slot);
    }

    debug!(%source, %target, settled = search.nodes_settled, "no path");
    Err(GraphError::path_not_found(source, target))
}

/// Labels on the cheapest route, `[source, ..., target]`.
pub fn shortest_path_nodes<L: Label>(graph: &Graph<L>, source: &L, target: &L) -> Result<Vec<L>> {
    Ok(compute_shortest_path(graph, source, target)?.labels(graph))
}

/// Cost of the cheapest route.
///
/// An unreachable target yields `f64::NAN` instead of `PathNotFound`, so
/// callers scanning many targets can skip it; unknown labels still fail.
pub fn shortest_path_cost<L: Label>(graph: &Graph<L>, source: &L, target: &L) -> Result<f64> {
    match compute_shortest_path(graph, source, target) {
        Ok(search) => Ok(search.cost()),
        Err(GraphError::PathNotFound { .. }) => Ok(f64::NAN),
        Err(e) => Err(e),
    }
}

/// Expand from `source` without a target and report every other node it
/// reaches, cheapest first.
///
/// With `max_cost`, nodes whose cost exceeds the bound are left out and the
/// expansion stops at the first of them.
pub fn reachable_from<L: Label>(
    graph: &Graph<L>,
    source: &L,
    max_cost: Option<f64>,
) -> Result<Vec<Reached<L>>> {
    let source_id = resolve(graph, source)?;
    let mut search = Search::new(graph, source_id);

    // Settled slots in settle order; the source comes out first.
    let mut settled_slots = Vec::new();
    while let Some(slot) = search.settle_next() {
        if max_cost.is_some_and(|max| search.arena[slot].cost > max) {
            break;
        }
        settled_slots.push(slot);
        search.expand(slot);
    }

    // Predecessor slots always precede their successors in the arena.
    let mut hops = vec![0usize; search.arena.len()];
    for (slot, record) in search.arena.iter().enumerate() {
        if let Some(pred) = record.predecessor {
            hops[slot] = hops[pred] + 1;
        }
    }

    let reached: Vec<Reached<L>> = settled_slots
        .into_iter()
        .filter_map(|slot| {
            let record = &search.arena[slot];
            let pred = search.arena[record.predecessor?].node;
            Some(Reached {
                label: graph.label(record.node)?.clone(),
                cost: record.cost,
                hops: hops[slot],
                predecessor: graph.label(pred)?.clone(),
            })
        })
        .collect();

    debug!(
        %source,
        reached = reached.len(),
        settled = search.nodes_settled,
        "expansion finished"
    );
    Ok(reached)
}
