use route_graph_core::{EdgeRecord, Graph, Navigator};
use std::time::Instant;

/// Above this size the all-pairs farthest-location scan is skipped.
const FARTHEST_MAX_NODES: usize = 2_000;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(200_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: route-graph-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        Branching tree, weights grow with depth (deep paths)");
        println!("  smallworld  Ring lattice + weighted shortcuts");
        println!("  random      Uniform random edges with random weights");
        println!("  barbell     Two dense clusters joined by a slow bridge");
        println!();
        println!("Default node_count: 200000");
        return;
    }

    if node_count < 2 {
        eprintln!("node_count must be at least 2");
        return;
    }

    println!("route-graph-bench");
    println!("=================");
    println!();

    let generators: Vec<(&str, fn(u64) -> Graph<u64>)> = match mode {
        "tree" => vec![("Branching tree", gen_tree)],
        "smallworld" => vec![("Small-world (weighted shortcuts)", gen_small_world)],
        "random" => vec![("Random weighted", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "all" => vec![
            ("Branching tree", gen_tree as fn(u64) -> Graph<u64>),
            ("Small-world (weighted shortcuts)", gen_small_world),
            ("Random weighted", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> Graph<u64>, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count);
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s, {} nodes, {} edges, ~{:.1}MB",
        gen_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    // Cheapest route from node 0 to the highest-numbered node
    let far_node = graph.node_count() as u64 - 1;
    println!();
    let t = Instant::now();
    let path = route_graph_core::shortest_path_nodes(&graph, &0, &far_node);
    let elapsed = t.elapsed();
    match path {
        Ok(p) => {
            let cost = route_graph_core::shortest_path_cost(&graph, &0, &far_node).unwrap_or(f64::NAN);
            println!(
                "Shortest path 0 -> {}: {} hops, cost {:.1}, in {:.1}ms",
                far_node,
                p.len() - 1,
                cost,
                elapsed.as_secs_f64() * 1000.0
            );
        }
        Err(e) => println!("Shortest path 0 -> {}: {} ({:.1}ms)", far_node, e, elapsed.as_secs_f64() * 1000.0),
    }

    // Single-source expansion at increasing cost bounds
    println!();
    println!("{:>10} {:>12} {:>10} {:>10}", "max_cost", "reached", "max_hops", "time");
    println!("{:->10} {:->12} {:->10} {:->10}", "", "", "", "");

    for bound in [Some(10.0), Some(50.0), Some(100.0), Some(500.0), None] {
        let t = Instant::now();
        let reached = match route_graph_core::reachable_from(&graph, &0, bound) {
            Ok(r) => r,
            Err(e) => {
                println!("reachable_from failed: {}", e);
                break;
            }
        };
        let elapsed = t.elapsed();
        let max_hops = reached.iter().map(|r| r.hops).max().unwrap_or(0);
        let label = bound.map_or_else(|| "none".to_string(), |b| format!("{:.0}", b));
        println!(
            "{:>10} {:>12} {:>10} {:>8.1}ms",
            label,
            reached.len(),
            max_hops,
            elapsed.as_secs_f64() * 1000.0
        );
        if reached.len() + 1 >= graph.node_count() {
            println!("{:>10} (entire graph reached)", "");
            break;
        }
    }

    // Farthest location runs one search per node, so only on small graphs
    println!();
    if graph.node_count() <= FARTHEST_MAX_NODES {
        let nav = Navigator::new(graph);
        let t = Instant::now();
        let farthest = nav.most_distant_location(&0);
        let elapsed = t.elapsed();
        match farthest {
            Ok(node) => println!("Most distant from 0: {} in {:.1}ms", node, elapsed.as_secs_f64() * 1000.0),
            Err(e) => println!("Most distant from 0: {} ({:.1}ms)", e, elapsed.as_secs_f64() * 1000.0),
        }
    } else {
        println!(
            "Most distant from 0: skipped (more than {} nodes)",
            FARTHEST_MAX_NODES
        );
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, O(n + edges)
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    /// Edge weight in `[lo, hi)`, rounded to tenths like walking times.
    fn weight(&mut self, lo: f64, hi: f64) -> f64 {
        ((lo + self.next_f64() * (hi - lo)) * 10.0).round() / 10.0
    }
}

fn with_nodes(node_count: u64) -> Graph<u64> {
    let mut graph = Graph::with_capacity(node_count as usize);
    for i in 0..node_count {
        graph.insert_node(i);
    }
    graph
}

/// Branching tree: every node gets 3 children. Edges point away from the
/// root, so the last node is reachable only along one deep path.
fn gen_tree(node_count: u64) -> Graph<u64> {
    let mut graph = with_nodes(node_count);
    let mut rng = FastRng::new(42);
    let branching = 3u64;

    let edges = (1..node_count).map(|child| {
        let parent = (child - 1) / branching;
        EdgeRecord::new(parent, child, rng.weight(1.0, 30.0))
    });
    graph.load_edges(edges);
    graph
}

/// Ring lattice where each node reaches its K successors, plus a few long
/// shortcuts that are expensive enough to only sometimes pay off.
fn gen_small_world(node_count: u64) -> Graph<u64> {
    let k = 6u64;
    let p = 0.05f64;
    let mut graph = with_nodes(node_count);
    let mut rng = FastRng::new(67890);

    let mut edges = Vec::with_capacity((node_count * (k + 1)) as usize);
    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            if neighbor != i {
                edges.push(EdgeRecord::new(i, neighbor, rng.weight(1.0, 10.0) * j as f64));
            }
        }
        if rng.next_f64() < p {
            let shortcut = rng.next(node_count);
            if shortcut != i {
                edges.push(EdgeRecord::new(i, shortcut, rng.weight(50.0, 200.0)));
            }
        }
    }
    graph.load_edges(edges);
    graph
}

/// Uniform random edges, ~8 per node, with uniform weights. Baseline with
/// no structure.
fn gen_random(node_count: u64) -> Graph<u64> {
    let target_edges = node_count * 8;
    let mut graph = with_nodes(node_count);
    let mut rng = FastRng::new(54321);

    let mut edges = Vec::with_capacity(target_edges as usize);
    for _ in 0..target_edges {
        let from = rng.next(node_count);
        let to = rng.next(node_count);
        if from != to {
            edges.push(EdgeRecord::new(from, to, rng.weight(1.0, 100.0)));
        }
    }
    graph.load_edges(edges);
    graph
}

/// Two dense clusters joined by a chain of slow bridge edges, traversable
/// in both directions. Every cross-cluster route pays the bridge cost.
fn gen_barbell(node_count: u64) -> Graph<u64> {
    let bridge_len = 10u64.min(node_count / 2);
    let cluster_size = (node_count - bridge_len) / 2;
    let mut graph = with_nodes(node_count);
    let mut rng = FastRng::new(99999);
    let mut edges = Vec::new();

    let cluster = |start: u64, edges: &mut Vec<EdgeRecord<u64>>, rng: &mut FastRng| {
        if cluster_size < 2 {
            return;
        }
        for i in 0..cluster_size {
            for _ in 0..12u64.min(cluster_size - 1) {
                let target = rng.next(cluster_size);
                if target != i {
                    edges.push(EdgeRecord::new(start + i, start + target, rng.weight(1.0, 20.0)));
                }
            }
        }
    };

    // Cluster A: 0..cluster_size
    cluster(0, &mut edges, &mut rng);

    // Bridge: chain from the last node of A through to the first node of B
    let bridge_start = cluster_size;
    let b_start = bridge_start + bridge_len;
    let mut prev = cluster_size.saturating_sub(1);
    for id in bridge_start..=b_start.min(node_count - 1) {
        if id != prev {
            let w = rng.weight(100.0, 300.0);
            edges.push(EdgeRecord::new(prev, id, w));
            edges.push(EdgeRecord::new(id, prev, w));
        }
        prev = id;
    }

    // Cluster B: the rest, minus any remainder node at the very end
    cluster(b_start, &mut edges, &mut rng);
    let last = node_count - 1;
    if b_start + cluster_size < node_count && last != b_start {
        edges.push(EdgeRecord::new(b_start, last, rng.weight(1.0, 20.0)));
    }

    graph.load_edges(edges);
    graph
}
