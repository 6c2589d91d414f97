use crate::{
    errors::GraphError,
    graph::{Graph, NodeId},
};

use super::{Target, cached_node_values, fields, path};

/// Betweenness centrality.
///
/// For every pair `s < t` with `s, t != v`, `v` lies on a shortest `s`-`t`
/// path exactly when `d(s,t) = d(s,v) + d(v,t)`; such pairs contribute
/// `σ(s,v)·σ(v,t)/σ(s,t)`. The sum is scaled by `2 / ((n-1)(n-2))`.
pub fn betweenness(graph: &Graph, target: Target) -> Result<Vec<f64>, GraphError> {
    cached_node_values(graph, fields::BETWEENNESS, target, node_betweenness)
}

/// Closeness centrality: reachable nodes divided by the sum of their
/// distances. Isolated nodes score 0.
pub fn closeness(graph: &Graph, target: Target) -> Result<Vec<f64>, GraphError> {
    cached_node_values(graph, fields::CLOSENESS, target, |graph, node| {
        let lengths = path::pathlength(graph, node)?;
        let (reachable, total) = lengths
            .iter()
            .filter(|&&d| d > 0)
            .fold((0u64, 0u64), |(count, sum), &d| (count + 1, sum + u64::from(d)));
        if total == 0 {
            return Ok(0.0);
        }
        Ok(reachable as f64 / total as f64)
    })
}

fn node_betweenness(graph: &Graph, v: NodeId) -> Result<f64, GraphError> {
    let n = graph.num_nodes();
    if n < 3 {
        return Ok(0.0);
    }
    let (from_v, paths_v) = path::shortest_paths(graph, v)?;
    let vi = v as usize;
    let mut total = 0.0;
    for s in 0..n {
        if s == v {
            continue;
        }
        let (from_s, paths_s) = path::shortest_paths(graph, s)?;
        let d_sv = from_s[vi];
        if d_sv == 0 {
            continue;
        }
        for t in (s + 1)..n {
            if t == v {
                continue;
            }
            let ti = t as usize;
            let d_st = from_s[ti];
            let d_vt = from_v[ti];
            if d_st == 0 || d_vt == 0 {
                continue;
            }
            if d_st == d_sv + d_vt {
                total += paths_s[vi] * paths_v[ti] / paths_s[ti];
            }
        }
    }
    let norm = 2.0 / f64::from((n - 1) * (n - 2));
    Ok(total * norm)
}
