//! Normalised mutual information between two partitions (Danon et al. 2005).

use ahash::AHashMap;

use crate::{errors::GraphError, graph::Graph};

/// NMI of two partitions given as one community per element.
///
/// 1 for identical partitions (up to renaming) and for the degenerate case
/// where both partitions are a single community.
pub fn normalized_mutual_information(a: &[u32], b: &[u32]) -> Result<f64, GraphError> {
    if a.len() != b.len() {
        return Err(GraphError::invalid_input(format!(
            "partitions cover {} and {} elements",
            a.len(),
            b.len()
        )));
    }
    let n = a.len() as f64;
    let mut joint: AHashMap<(u32, u32), f64> = AHashMap::new();
    let mut rows: AHashMap<u32, f64> = AHashMap::new();
    let mut cols: AHashMap<u32, f64> = AHashMap::new();
    for (&ca, &cb) in a.iter().zip(b) {
        *joint.entry((ca, cb)).or_insert(0.0) += 1.0;
        *rows.entry(ca).or_insert(0.0) += 1.0;
        *cols.entry(cb).or_insert(0.0) += 1.0;
    }

    let numerator: f64 = joint
        .iter()
        .filter_map(|(&(ca, cb), &nij)| {
            let (ni, nj) = (rows.get(&ca)?, cols.get(&cb)?);
            Some(nij * (nij * n / (ni * nj)).ln())
        })
        .sum::<f64>()
        * -2.0;
    let entropy = |counts: &AHashMap<u32, f64>| -> f64 {
        counts.values().map(|&c| c * (c / n).ln()).sum()
    };
    let denominator = entropy(&rows) + entropy(&cols);
    if denominator.abs() < f64::EPSILON {
        return Ok(1.0);
    }
    Ok(numerator / denominator)
}

/// NMI between the label partitions of two graphs over the same node set.
pub fn label_mutual_information(g1: &Graph, g2: &Graph) -> Result<f64, GraphError> {
    if g1.num_nodes() != g2.num_nodes() {
        return Err(GraphError::invalid_input(format!(
            "graphs have {} and {} nodes",
            g1.num_nodes(),
            g2.num_nodes()
        )));
    }
    let a: Vec<u32> = g1.labels().iter().map(|l| l.label_value).collect();
    let b: Vec<u32> = g2.labels().iter().map(|l| l.label_value).collect();
    normalized_mutual_information(&a, &b)
}
