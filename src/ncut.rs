//! Voxel-affinity graphs for normalised-cut segmentation.
//!
//! The image itself is supplied by the caller through [`VoxelSource`]; no
//! image format is read here.

use crate::{
    errors::GraphError,
    graph::{Graph, GraphLabel, NodeId},
};

/// Read-only access to a 3D scalar image.
pub trait VoxelSource {
    /// Extent along x, y and z.
    fn dims(&self) -> [u32; 3];

    fn value(&self, voxel: [u32; 3]) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NcutParams {
    /// Neighbourhood radius in voxels.
    pub radius: f64,
    pub sigma_intensity: f64,
    pub sigma_distance: f64,
    /// Voxels with a value at or below this are left out of the graph.
    pub threshold: f64,
}

impl Default for NcutParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            sigma_intensity: 1.0,
            sigma_distance: 1.0,
            threshold: 0.0,
        }
    }
}

/// Builds an undirected graph with one node per voxel above the threshold.
///
/// Nodes are numbered in x-fastest scan order and labelled with their voxel
/// coordinates. Voxels within `radius` of each other are joined by an edge
/// weighted `exp(-Δv²/σi²) · exp(-d²/σx²)`.
pub fn create_ncut_graph<S>(image: &S, params: &NcutParams) -> Result<Graph, GraphError>
where
    S: VoxelSource + ?Sized,
{
    if params.radius <= 0.0 || params.sigma_intensity <= 0.0 || params.sigma_distance <= 0.0 {
        return Err(GraphError::invalid_input(format!(
            "ncut radius and sigmas must be positive: {params:?}"
        )));
    }
    let [dx, dy, dz] = image.dims();
    let volume = u64::from(dx) * u64::from(dy) * u64::from(dz);
    let linear = |[x, y, z]: [u32; 3]| {
        (u64::from(z) * u64::from(dy) + u64::from(y)) * u64::from(dx) + u64::from(x)
    };

    let mut voxels = Vec::new();
    let mut node_of = vec![None; volume as usize];
    for z in 0..dz {
        for y in 0..dy {
            for x in 0..dx {
                let voxel = [x, y, z];
                if image.value(voxel) > params.threshold {
                    node_of[linear(voxel) as usize] = Some(voxels.len() as NodeId);
                    voxels.push(voxel);
                }
            }
        }
    }

    let mut graph = Graph::undirected(voxels.len() as u32);
    let reach = params.radius.floor() as i64;
    let radius_sq = params.radius * params.radius;
    let sigma_i_sq = params.sigma_intensity * params.sigma_intensity;
    let sigma_x_sq = params.sigma_distance * params.sigma_distance;
    for (node, &voxel) in voxels.iter().enumerate() {
        let node = node as NodeId;
        let [x, y, z] = voxel;
        graph.set_node_label(node, GraphLabel::new(0, x as f32, y as f32, z as f32))?;
        let value = image.value(voxel);
        for oz in -reach..=reach {
            for oy in -reach..=reach {
                for ox in -reach..=reach {
                    let dist_sq = (ox * ox + oy * oy + oz * oz) as f64;
                    if dist_sq == 0.0 || dist_sq > radius_sq {
                        continue;
                    }
                    let Some(other) = offset(voxel, [ox, oy, oz], [dx, dy, dz]) else {
                        continue;
                    };
                    let Some(other_node) = node_of[linear(other) as usize] else {
                        continue;
                    };
                    if other_node <= node {
                        continue;
                    }
                    let dv = value - image.value(other);
                    let weight = (-(dv * dv) / sigma_i_sq).exp() * (-dist_sq / sigma_x_sq).exp();
                    graph.add_edge(node, other_node, weight as f32)?;
                }
            }
        }
    }
    graph.log_add(format!(
        "ncut: {} voxels above {}, {} edges",
        voxels.len(),
        params.threshold,
        graph.num_edges()
    ));
    Ok(graph)
}

/// Sets every node's label value from `reader`, sampled at the node's label
/// coordinates. Readers must return non-negative integral-valued numbers;
/// fractions are truncated.
pub fn assign_labels<F>(graph: &mut Graph, reader: F) -> Result<(), GraphError>
where
    F: Fn([f32; 3]) -> f64,
{
    for node in 0..graph.num_nodes() {
        let label = *graph.label(node);
        let value = reader([label.x, label.y, label.z]);
        if !value.is_finite() || value < 0.0 || value > f64::from(u32::MAX) {
            return Err(GraphError::invalid_input(format!(
                "label value {value} for node {node} is not a valid label"
            )));
        }
        graph.set_node_label(
            node,
            GraphLabel {
                label_value: value as u32,
                ..label
            },
        )?;
    }
    Ok(())
}

fn offset(voxel: [u32; 3], by: [i64; 3], dims: [u32; 3]) -> Option<[u32; 3]> {
    let mut out = [0u32; 3];
    for axis in 0..3 {
        let coord = i64::from(voxel[axis]) + by[axis];
        if coord < 0 || coord >= i64::from(dims[axis]) {
            return None;
        }
        out[axis] = coord as u32;
    }
    Some(out)
}
