use serde::Serialize;
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::graph::{Graph, Label};
use crate::search::{self, Reached};

/// The graph capabilities the route queries need.
///
/// `Graph` is the real implementation; tests can hand `Navigator` any other
/// implementor (a canned fixture, a counting wrapper) instead.
pub trait PathGraph {
    type Label: Label;

    fn insert_node(&mut self, label: Self::Label) -> bool;
    fn insert_edge(&mut self, from: &Self::Label, to: &Self::Label, weight: f64) -> Result<Option<f64>>;
    fn contains_node(&self, label: &Self::Label) -> bool;
    fn contains_edge(&self, from: &Self::Label, to: &Self::Label) -> bool;
    fn edge_weight(&self, from: &Self::Label, to: &Self::Label) -> Result<f64>;
    /// All labels in insertion order.
    fn node_labels(&self) -> Vec<Self::Label>;
    fn shortest_path_nodes(&self, source: &Self::Label, target: &Self::Label) -> Result<Vec<Self::Label>>;
    /// `NaN` when `target` is unreachable; unknown labels fail.
    fn shortest_path_cost(&self, source: &Self::Label, target: &Self::Label) -> Result<f64>;

    /// Every other node reachable from `source` within `max_cost`, cheapest
    /// first.
    ///
    /// The default answers one pair query per node; implementors with a
    /// single-source search should override it.
    fn reachable_from(&self, source: &Self::Label, max_cost: Option<f64>) -> Result<Vec<Reached<Self::Label>>> {
        if !self.contains_node(source) {
            return Err(GraphError::node_not_found(source));
        }
        let mut reached = Vec::new();
        for label in self.node_labels() {
            if &label == source {
                continue;
            }
            let path = match self.shortest_path_nodes(source, &label) {
                Ok(path) => path,
                Err(GraphError::PathNotFound { .. }) => continue,
                Err(e) => return Err(e),
            };
            let cost = self.shortest_path_cost(source, &label)?;
            if max_cost.is_some_and(|max| cost > max) {
                continue;
            }
            let Some(predecessor) = path.len().checked_sub(2).map(|i| path[i].clone()) else {
                continue;
            };
            reached.push(Reached {
                label,
                cost,
                hops: path.len() - 1,
                predecessor,
            });
        }
        reached.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        Ok(reached)
    }
}

impl<L: Label> PathGraph for Graph<L> {
    type Label = L;

    fn insert_node(&mut self, label: L) -> bool {
        Graph::insert_node(self, label)
    }

    fn insert_edge(&mut self, from: &L, to: &L, weight: f64) -> Result<Option<f64>> {
        Graph::insert_edge(self, from, to, weight)
    }

    fn contains_node(&self, label: &L) -> bool {
        Graph::contains_node(self, label)
    }

    fn contains_edge(&self, from: &L, to: &L) -> bool {
        Graph::contains_edge(self, from, to)
    }

    fn edge_weight(&self, from: &L, to: &L) -> Result<f64> {
        Graph::edge_weight(self, from, to)
    }

    fn node_labels(&self) -> Vec<L> {
        Graph::node_labels(self).cloned().collect()
    }

    fn shortest_path_nodes(&self, source: &L, target: &L) -> Result<Vec<L>> {
        search::shortest_path_nodes(self, source, target)
    }

    fn shortest_path_cost(&self, source: &L, target: &L) -> Result<f64> {
        search::shortest_path_cost(self, source, target)
    }

    fn reachable_from(&self, source: &L, max_cost: Option<f64>) -> Result<Vec<Reached<L>>> {
        search::reachable_from(self, source, max_cost)
    }
}

/// A cheapest route with its per-leg weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route<L> {
    pub stops: Vec<L>,
    /// `legs[i]` is the weight of `stops[i] -> stops[i + 1]`.
    pub legs: Vec<f64>,
    pub total: f64,
}

/// Route queries over a loaded graph. This is the only surface a front end
/// is meant to call.
#[derive(Debug)]
pub struct Navigator<G: PathGraph> {
    graph: G,
}

impl<G: PathGraph> Navigator<G> {
    pub fn new(graph: G) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph
    }

    pub fn into_graph(self) -> G {
        self.graph
    }

    /// Every known location, in the order it was first loaded.
    pub fn locations(&self) -> Vec<G::Label> {
        self.graph.node_labels()
    }

    /// Stops on the cheapest route, `[source, ..., target]`.
    pub fn find_shortest_path(&self, source: &G::Label, target: &G::Label) -> Result<Vec<G::Label>> {
        self.graph.shortest_path_nodes(source, target)
    }

    /// Weight of each leg on the cheapest route. Empty when the route has no
    /// legs (source equals target).
    pub fn travel_times_on_path(&self, source: &G::Label, target: &G::Label) -> Result<Vec<f64>> {
        let path = self.find_shortest_path(source, target)?;
        self.leg_weights(&path)
    }

    /// Stops, legs and total cost of the cheapest route.
    pub fn route(&self, source: &G::Label, target: &G::Label) -> Result<Route<G::Label>> {
        let stops = self.find_shortest_path(source, target)?;
        let legs = self.leg_weights(&stops)?;
        let total = legs.iter().sum();
        Ok(Route { stops, legs, total })
    }

    /// The location with the greatest route cost from `from`.
    ///
    /// The running maximum starts at zero and only a strictly greater cost
    /// replaces it, so unreachable locations (`NaN`) are never picked and a
    /// location from which nothing is reachable yields `NodeNotFound`.
    /// Ties keep the location listed first.
    pub fn most_distant_location(&self, from: &G::Label) -> Result<G::Label> {
        let mut farthest: Option<G::Label> = None;
        let mut max_cost = 0.0;

        for candidate in self.graph.node_labels() {
            if &candidate == from {
                continue;
            }
            let cost = self.graph.shortest_path_cost(from, &candidate)?;
            if cost > max_cost {
                max_cost = cost;
                farthest = Some(candidate);
            }
        }

        match farthest {
            Some(label) => {
                debug!(%from, farthest = %label, cost = max_cost, "most distant location");
                Ok(label)
            }
            None => Err(GraphError::node_not_found(from)),
        }
    }

    /// Locations reachable from `from`, cheapest first, optionally bounded
    /// by `max_cost`.
    pub fn reachable(&self, from: &G::Label, max_cost: Option<f64>) -> Result<Vec<Reached<G::Label>>> {
        self.graph.reachable_from(from, max_cost)
    }

    fn leg_weights(&self, path: &[G::Label]) -> Result<Vec<f64>> {
        path.windows(2)
            .map(|pair| self.graph.edge_weight(&pair[0], &pair[1]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn campus() -> Navigator<Graph<String>> {
        let mut g = Graph::new();
        for (from, to, w) in [
            ("Union South", "Computer Sciences and Statistics", 176.0),
            ("Computer Sciences and Statistics", "Atmospheric, Oceanic and Space Sciences", 127.2),
            ("Computer Sciences and Statistics", "Union South", 176.0),
        ] {
            g.insert_node(from.to_string());
            g.insert_node(to.to_string());
            g.insert_edge(&from.to_string(), &to.to_string(), w).unwrap();
        }
        Navigator::new(g)
    }

    fn s(label: &str) -> String {
        label.to_string()
    }

    /// Fixed three-stop line that counts how often costs are asked for.
    struct LineFixture {
        cost_calls: Cell<usize>,
        /// Answer `U -> C` with a path that lost its source.
        truncated: bool,
    }

    impl PathGraph for LineFixture {
        type Label = &'static str;

        fn insert_node(&mut self, _label: &'static str) -> bool {
            false
        }
        fn insert_edge(&mut self, _from: &&'static str, _to: &&'static str, _w: f64) -> Result<Option<f64>> {
            Ok(None)
        }
        fn contains_node(&self, label: &&'static str) -> bool {
            ["U", "C", "S"].contains(label)
        }
        fn contains_edge(&self, from: &&'static str, to: &&'static str) -> bool {
            matches!((*from, *to), ("U", "C") | ("C", "S"))
        }
        fn edge_weight(&self, from: &&'static str, to: &&'static str) -> Result<f64> {
            match (*from, *to) {
                ("U", "C") => Ok(2.0),
                ("C", "S") => Ok(3.0),
                _ => Err(GraphError::edge_not_found(from, to)),
            }
        }
        fn node_labels(&self) -> Vec<&'static str> {
            vec!["U", "C", "S"]
        }
        fn shortest_path_nodes(&self, source: &&'static str, target: &&'static str) -> Result<Vec<&'static str>> {
            match (*source, *target) {
                ("U", "S") => Ok(vec!["U", "C", "S"]),
                ("U", "C") if self.truncated => Ok(vec!["C"]),
                ("U", "C") => Ok(vec!["U", "C"]),
                ("C", "S") => Ok(vec!["C", "S"]),
                (a, b) if a == b => Ok(vec![a]),
                _ => Err(GraphError::path_not_found(source, target)),
            }
        }
        fn shortest_path_cost(&self, source: &&'static str, target: &&'static str) -> Result<f64> {
            self.cost_calls.set(self.cost_calls.get() + 1);
            if !self.contains_node(source) {
                return Err(GraphError::node_not_found(source));
            }
            match (*source, *target) {
                ("U", "C") => Ok(2.0),
                ("U", "S") => Ok(5.0),
                ("C", "S") => Ok(3.0),
                _ => Ok(f64::NAN),
            }
        }
    }

    fn line() -> Navigator<LineFixture> {
        Navigator::new(LineFixture {
            cost_calls: Cell::new(0),
            truncated: false,
        })
    }

    #[test]
    fn test_locations_in_load_order() {
        let nav = campus();
        assert_eq!(
            nav.locations(),
            vec![
                s("Union South"),
                s("Computer Sciences and Statistics"),
                s("Atmospheric, Oceanic and Space Sciences"),
            ]
        );
    }

    #[test]
    fn test_find_shortest_path() {
        let nav = campus();
        let path = nav
            .find_shortest_path(&s("Union South"), &s("Atmospheric, Oceanic and Space Sciences"))
            .unwrap();
        assert_eq!(
            path,
            vec![
                s("Union South"),
                s("Computer Sciences and Statistics"),
                s("Atmospheric, Oceanic and Space Sciences"),
            ]
        );
    }

    #[test]
    fn test_travel_times_on_path() {
        let nav = campus();
        let times = nav
            .travel_times_on_path(&s("Union South"), &s("Atmospheric, Oceanic and Space Sciences"))
            .unwrap();
        assert_eq!(times, vec![176.0, 127.2]);
    }

    #[test]
    fn test_travel_times_single_stop_is_empty() {
        let nav = campus();
        assert!(nav
            .travel_times_on_path(&s("Union South"), &s("Union South"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_travel_times_propagate_failures() {
        let nav = campus();
        assert!(matches!(
            nav.travel_times_on_path(&s("Atmospheric, Oceanic and Space Sciences"), &s("Union South")),
            Err(GraphError::PathNotFound { .. })
        ));
        assert_eq!(
            nav.travel_times_on_path(&s("Bascom Hall"), &s("Union South")).unwrap_err(),
            GraphError::NodeNotFound(s("Bascom Hall"))
        );
    }

    #[test]
    fn test_most_distant_location() {
        let nav = campus();
        assert_eq!(
            nav.most_distant_location(&s("Union South")).unwrap(),
            s("Atmospheric, Oceanic and Space Sciences")
        );
    }

    #[test]
    fn test_most_distant_skips_unreachable() {
        // Bascom Hall is isolated: it never wins, and a start that reaches
        // nothing has no answer.
        let mut nav = campus();
        nav.graph_mut().insert_node(s("Bascom Hall"));
        assert_eq!(
            nav.most_distant_location(&s("Union South")).unwrap(),
            s("Atmospheric, Oceanic and Space Sciences")
        );
        assert_eq!(
            nav.most_distant_location(&s("Bascom Hall")).unwrap_err(),
            GraphError::NodeNotFound(s("Bascom Hall"))
        );
    }

    #[test]
    fn test_most_distant_unknown_location() {
        let nav = campus();
        assert_eq!(
            nav.most_distant_location(&s("Nowhere")).unwrap_err(),
            GraphError::NodeNotFound(s("Nowhere"))
        );
    }

    #[test]
    fn test_most_distant_zero_cost_is_not_distant() {
        let mut g: Graph<&str> = Graph::new();
        g.insert_node("A");
        g.insert_node("B");
        g.insert_edge(&"A", &"B", 0.0).unwrap();
        let nav = Navigator::new(g);
        assert!(nav.most_distant_location(&"A").is_err());
    }

    #[test]
    fn test_most_distant_tie_keeps_first_listed() {
        let mut g: Graph<&str> = Graph::new();
        for n in ["A", "B", "C"] {
            g.insert_node(n);
        }
        g.insert_edge(&"A", &"C", 4.0).unwrap();
        g.insert_edge(&"A", &"B", 4.0).unwrap();
        let nav = Navigator::new(g);
        assert_eq!(nav.most_distant_location(&"A").unwrap(), "B");
    }

    #[test]
    fn test_route_totals_legs() {
        let nav = campus();
        let route = nav
            .route(&s("Union South"), &s("Atmospheric, Oceanic and Space Sciences"))
            .unwrap();
        assert_eq!(route.stops.len(), 3);
        assert_eq!(route.legs, vec![176.0, 127.2]);
        assert!((route.total - 303.2).abs() < 1e-9);
    }

    #[test]
    fn test_navigator_over_fixture() {
        let nav = line();
        assert_eq!(nav.most_distant_location(&"U").unwrap(), "S");
        assert_eq!(nav.travel_times_on_path(&"U", &"S").unwrap(), vec![2.0, 3.0]);
        // One cost query per other location.
        assert_eq!(nav.graph().cost_calls.get(), 2);
    }

    #[test]
    fn test_fixture_errors_pass_through() {
        let nav = line();
        assert_eq!(
            nav.most_distant_location(&"X").unwrap_err(),
            GraphError::NodeNotFound("X".into())
        );
        assert!(matches!(
            nav.find_shortest_path(&"S", &"U"),
            Err(GraphError::PathNotFound { .. })
        ));
    }

    #[test]
    fn test_default_reachable_from() {
        let nav = line();
        let reached = nav.reachable(&"U", None).unwrap();
        assert_eq!(
            reached,
            vec![
                Reached {
                    label: "C",
                    cost: 2.0,
                    hops: 1,
                    predecessor: "U"
                },
                Reached {
                    label: "S",
                    cost: 5.0,
                    hops: 2,
                    predecessor: "C"
                },
            ]
        );
        assert_eq!(nav.reachable(&"U", Some(3.0)).unwrap().len(), 1);
        assert!(nav.reachable(&"S", None).unwrap().is_empty());
        assert!(nav.reachable(&"X", None).is_err());
    }

    #[test]
    fn test_default_reachable_from_skips_paths_without_predecessor() {
        let nav = Navigator::new(LineFixture {
            cost_calls: Cell::new(0),
            truncated: true,
        });
        let reached = nav.reachable(&"U", None).unwrap();
        let labels: Vec<&str> = reached.iter().map(|r| r.label).collect();
        assert_eq!(labels, vec!["S"]);
        assert_eq!(reached[0].predecessor, "C");
    }

    #[test]
    fn test_reachable_matches_default_strategy() {
        let nav = campus();
        let fast = nav.reachable(&s("Union South"), None).unwrap();
        let labels: Vec<&str> = fast.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Computer Sciences and Statistics", "Atmospheric, Oceanic and Space Sciences"]
        );
        assert_eq!(fast[1].hops, 2);
    }

    #[test]
    fn test_into_graph_returns_store() {
        let nav = campus();
        let g = nav.into_graph();
        assert_eq!(g.edge_count(), 3);
    }
}
