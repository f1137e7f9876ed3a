//! Dense graph topology shared by the algorithms
//!
//! Algorithms never see string ids or relation names. Callers intern them into
//! [`NodeId`]s and [`TypeCode`]s and hand over a [`GraphView`].

use std::collections::HashMap;

/// Node identifier as seen by the algorithms
pub type NodeId = u64;

/// Interned relation type
pub type TypeCode = u32;

/// Outgoing adjacency of a weighted, typed, directed graph in Compressed Sparse Row form.
///
/// Each row keeps the order in which its edges were supplied, so traversals over
/// the view are deterministic for a fixed input.
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    pub node_count: usize,
    /// Dense index (0..N) to NodeId
    pub index_to_node: Vec<NodeId>,
    pub node_to_index: HashMap<NodeId, usize>,

    /// Row offsets into `targets`; `node_count + 1` entries
    pub offsets: Vec<usize>,
    /// Target index of every edge, grouped by source
    pub targets: Vec<usize>,
    /// Edge weights, aligned with `targets`
    pub weights: Vec<f64>,
    /// Edge type codes, aligned with `targets`
    pub edge_types: Vec<TypeCode>,
}

impl GraphView {
    /// Build a view over nodes `0..node_count`, where a node's id equals its index.
    ///
    /// Edges are `(source, target, weight, type)`. Edges naming an index outside
    /// the node range are skipped.
    pub fn from_edges(node_count: usize, edges: &[(usize, usize, f64, TypeCode)]) -> Self {
        let in_range = |&&(u, v, _, _): &&(usize, usize, f64, TypeCode)| u < node_count && v < node_count;

        // Counting pass, then a stable fill that keeps per-row edge order
        let mut offsets = vec![0; node_count + 1];
        for &(u, ..) in edges.iter().filter(in_range) {
            offsets[u + 1] += 1;
        }
        for i in 0..node_count {
            offsets[i + 1] += offsets[i];
        }

        let edge_count = offsets[node_count];
        let mut targets = vec![0; edge_count];
        let mut weights = vec![0.0; edge_count];
        let mut edge_types = vec![0; edge_count];
        let mut cursor = offsets.clone();
        for &(u, v, w, t) in edges.iter().filter(in_range) {
            let slot = cursor[u];
            targets[slot] = v;
            weights[slot] = w;
            edge_types[slot] = t;
            cursor[u] += 1;
        }

        let index_to_node: Vec<NodeId> = (0..node_count as NodeId).collect();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            offsets,
            targets,
            weights,
            edge_types,
        }
    }

    fn row(&self, idx: usize) -> std::ops::Range<usize> {
        self.offsets[idx]..self.offsets[idx + 1]
    }

    pub fn out_degree(&self, idx: usize) -> usize {
        self.row(idx).len()
    }

    /// Outgoing neighbors of a node, in edge order
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.targets[self.row(idx)]
    }

    /// Weights of the outgoing edges of a node
    pub fn weights(&self, idx: usize) -> &[f64] {
        &self.weights[self.row(idx)]
    }

    pub fn edge_types(&self, idx: usize) -> &[TypeCode] {
        &self.edge_types[self.row(idx)]
    }

    /// Weight of the `i`-th outgoing edge of `idx`
    pub fn edge_weight(&self, idx: usize, i: usize) -> f64 {
        self.weights(idx)[i]
    }

    /// Type of the `i`-th outgoing edge of `idx`
    pub fn edge_type(&self, idx: usize, i: usize) -> TypeCode {
        self.edge_types(idx)[i]
    }

    pub fn edge_count(&self) -> usize {
        self.targets.len()
    }
}
