//! route-graph-core: weighted route graph and shortest-path engine.
//!
//! A pure Rust library that keeps a labeled, weighted directed graph in
//! memory and answers shortest-route queries over it with Dijkstra's
//! algorithm: the cheapest path between two locations, its per-leg costs,
//! and the location farthest from a given start.
//!
//! Populate a [`Graph`] (directly or through [`load`]), wrap it in a
//! [`Navigator`], and query. The graph is only read while searching, and
//! every search owns its own working state.

mod error;
mod graph;
pub mod load;
mod query;
mod search;

pub use error::{GraphError, LoadError, Result};
pub use graph::{Edge, EdgeRecord, Graph, Label, NodeId};
pub use query::{Navigator, PathGraph, Route};
pub use search::{
    compute_shortest_path, reachable_from, shortest_path_cost, shortest_path_nodes, PathSearch,
    Reached, SearchNode,
};
