//! Random graph producers.
//!
//! Every generator takes the random source explicitly, so a seeded
//! `StdRng` reproduces the same graph.

use rand::{Rng, seq::index};

use crate::{
    errors::GraphError,
    graph::{Graph, GraphLabel, NodeId},
};

/// Undirected G(n, M) graph with exactly `round(density · n(n-1)/2)` edges,
/// drawn as distinct pair indices without replacement.
pub fn erdos_renyi<R: Rng + ?Sized>(n: u32, density: f64, rng: &mut R) -> Result<Graph, GraphError> {
    check_probability("density", density)?;
    let mut graph = Graph::undirected(n);
    let total_pairs = pair_count(n);
    let num_edges = ((density * total_pairs as f64).round() as u64).min(total_pairs);
    let mut picks = index::sample(rng, total_pairs as usize, num_edges as usize).into_vec();
    picks.sort_unstable();
    for idx in picks {
        let (u, v) = pair_from_index(idx as u64, u64::from(n));
        graph.add_edge(u as NodeId, v as NodeId, 1.0)?;
    }
    graph.log_add(format!("erdos-renyi: {n} nodes, density {density}"));
    Ok(graph)
}

/// Barabási–Albert preferential attachment. Starts from a clique of `m + 1`
/// nodes; every later node attaches to `m` distinct existing nodes chosen
/// with probability proportional to degree.
pub fn scale_free<R: Rng + ?Sized>(n: u32, m: u32, rng: &mut R) -> Result<Graph, GraphError> {
    if m == 0 {
        return Err(GraphError::invalid_input("scale-free attachment count must be positive"));
    }
    if n <= m + 1 {
        return Err(GraphError::invalid_input(format!(
            "scale-free graph needs more than {} nodes, got {n}",
            m + 1
        )));
    }
    let mut graph = Graph::undirected(n);
    let mut degrees = vec![0u64; n as usize];
    let seed_nodes = m + 1;
    for u in 0..seed_nodes {
        for v in (u + 1)..seed_nodes {
            graph.add_edge(u, v, 1.0)?;
            degrees[u as usize] += 1;
            degrees[v as usize] += 1;
        }
    }
    let mut total_degree: u64 = degrees.iter().sum();
    for new_node in seed_nodes..n {
        let mut targets = Vec::with_capacity(m as usize);
        while targets.len() < m as usize {
            let pick = rng.gen_range(0..total_degree);
            let mut cumulative = 0u64;
            for candidate in 0..new_node {
                cumulative += degrees[candidate as usize];
                if pick < cumulative {
                    if !targets.contains(&candidate) {
                        targets.push(candidate);
                    }
                    break;
                }
            }
        }
        for target in targets {
            graph.add_edge(target, new_node, 1.0)?;
            degrees[target as usize] += 1;
            degrees[new_node as usize] += 1;
            total_degree += 2;
        }
    }
    graph.log_add(format!("scale-free: {n} nodes, m = {m}"));
    Ok(graph)
}

/// Watts–Strogatz small world: a ring where each node links to its `k / 2`
/// nearest neighbours on either side, after which every lattice edge is
/// rewired with probability `beta` to a uniformly chosen new endpoint.
pub fn small_world<R: Rng + ?Sized>(n: u32, k: u32, beta: f64, rng: &mut R) -> Result<Graph, GraphError> {
    check_probability("rewiring probability", beta)?;
    if k % 2 != 0 || k == 0 || k >= n {
        return Err(GraphError::invalid_input(format!(
            "small-world degree must be even, positive and below {n}, got {k}"
        )));
    }
    let mut graph = Graph::undirected(n);
    for u in 0..n {
        for step in 1..=k / 2 {
            graph.add_edge(u, (u + step) % n, 1.0)?;
        }
    }
    for step in 1..=k / 2 {
        for u in 0..n {
            let v = (u + step) % n;
            if !rng.gen_bool(beta) || graph.degree(u) >= n - 1 {
                continue;
            }
            let w = loop {
                let w = rng.gen_range(0..n);
                if w != u && !graph.are_neighbours(u, w) {
                    break w;
                }
            };
            graph.remove_edge(u, v)?;
            graph.add_edge(u, w, 1.0)?;
        }
    }
    graph.log_add(format!("small-world: {n} nodes, k = {k}, beta = {beta}"));
    Ok(graph)
}

/// Planted-partition graph: nodes are split into `ncommunities` contiguous
/// blocks, and each pair is linked with probability `p_in` inside a block
/// and `p_out` across blocks. Each node's label value is its block.
pub fn clustered<R: Rng + ?Sized>(
    n: u32,
    ncommunities: u32,
    p_in: f64,
    p_out: f64,
    rng: &mut R,
) -> Result<Graph, GraphError> {
    check_probability("p_in", p_in)?;
    check_probability("p_out", p_out)?;
    if ncommunities == 0 || ncommunities > n {
        return Err(GraphError::invalid_input(format!(
            "cannot split {n} nodes into {ncommunities} communities"
        )));
    }
    let mut graph = Graph::undirected(n);
    let block = |node: NodeId| (u64::from(node) * u64::from(ncommunities) / u64::from(n)) as u32;
    for node in 0..n {
        graph.set_node_label(
            node,
            GraphLabel {
                label_value: block(node),
                ..GraphLabel::default()
            },
        )?;
    }
    for u in 0..n {
        for v in (u + 1)..n {
            let p = if block(u) == block(v) { p_in } else { p_out };
            if rng.gen_bool(p) {
                graph.add_edge(u, v, 1.0)?;
            }
        }
    }
    graph.log_add(format!(
        "clustered: {n} nodes, {ncommunities} communities, p_in = {p_in}, p_out = {p_out}"
    ));
    Ok(graph)
}

fn check_probability(what: &str, p: f64) -> Result<(), GraphError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(GraphError::invalid_input(format!(
            "{what} must be within [0, 1], got {p}"
        )));
    }
    Ok(())
}

fn pair_count(nodes: u32) -> u64 {
    let n = u64::from(nodes);
    n * n.saturating_sub(1) / 2
}

/// Maps a pair index in `0..n(n-1)/2` to `(u, v)` with `u < v`, row-major.
fn pair_from_index(idx: u64, nodes: u64) -> (u64, u64) {
    let mut left = 0;
    let mut start = 0u64;
    while left < nodes - 1 {
        let remaining = nodes - left - 1;
        if idx < start + remaining {
            return (left, left + 1 + (idx - start));
        }
        start += remaining;
        left += 1;
    }
    (nodes - 2, nodes - 1)
}
