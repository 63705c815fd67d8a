//! Complete weighted distance graph over a set of waypoints.
//!
//! Weights are kept in a condensed upper-triangular vector holding one slot per
//! unordered pair, so the graph is symmetric by construction and has no self
//! edges. Building it costs C(N,2) distance evaluations, which dominates the
//! planning time for large inputs; past a size threshold the rows are computed
//! in parallel.

use crate::error::{Error, Result};
use crate::geo::{DistanceModel, GeoPoint};
use crate::waypoint::Waypoint;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default node count from which the graph is built in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Symmetric pairwise distances (km) keyed by waypoint id.
#[derive(Debug, Clone)]
pub struct DistanceGraph {
    /// Waypoint id of each node, in input order
    ids: Vec<usize>,
    /// Waypoint id -> node index
    index: HashMap<usize, usize>,
    /// Condensed upper triangle, row-major
    weights: Vec<f64>,
    model: DistanceModel,
}

impl DistanceGraph {
    /// Build the graph, going parallel for large inputs.
    pub fn build<P>(waypoints: &[Waypoint<P>], model: DistanceModel) -> Result<Self> {
        Self::build_with_threshold(waypoints, model, DEFAULT_PARALLEL_THRESHOLD)
    }

    pub fn build_with_threshold<P>(
        waypoints: &[Waypoint<P>],
        model: DistanceModel,
        parallel_threshold: usize,
    ) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(Error::EmptyInput);
        }

        let n = waypoints.len();
        let mut ids = Vec::with_capacity(n);
        let mut index = HashMap::with_capacity(n);
        for (i, w) in waypoints.iter().enumerate() {
            if index.insert(w.id, i).is_some() {
                return Err(Error::DuplicateWaypoint(w.id));
            }
            ids.push(w.id);
        }

        let points: Vec<GeoPoint> = waypoints.iter().map(|w| w.point()).collect();
        let points = points.as_slice();
        let parallel = n >= parallel_threshold;
        log::debug!(
            "Building distance graph: {} nodes, {} edges, model={}, parallel={}",
            n,
            n * (n - 1) / 2,
            model.name(),
            parallel
        );

        let weights: Vec<f64> = if parallel {
            // Each row owns the disjoint key range (i, i+1..n)
            (0..n)
                .into_par_iter()
                .flat_map_iter(move |i| row_distances(points, model, i))
                .collect()
        } else {
            (0..n).flat_map(|i| row_distances(points, model, i)).collect()
        };

        Ok(DistanceGraph { ids, index, weights, model })
    }

    #[inline]
    fn slot(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        let n = self.ids.len();
        i * n - i * (i + 1) / 2 + (j - i - 1)
    }

    /// Distance between two node indices. Zero on the diagonal.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        if i == j {
            0.0
        } else {
            self.weights[self.slot(i, j)]
        }
    }

    /// Edge weight between two waypoint ids. `None` for unknown ids and for
    /// the (absent) self edge.
    pub fn weight(&self, a: usize, b: usize) -> Option<f64> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        if i == j {
            return None;
        }
        Some(self.weights[self.slot(i, j)])
    }

    pub fn index_of(&self, id: usize) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[inline]
    pub fn id_at(&self, index: usize) -> usize {
        self.ids[index]
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn contains(&self, id: usize) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.weights.len()
    }

    pub fn model(&self) -> DistanceModel {
        self.model
    }

    /// Iterate over every unordered pair as `(id_a, id_b, km)` with `id_a`
    /// preceding `id_b` in input order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.ids.len();
        (0..n)
            .flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
            .zip(self.weights.iter())
            .map(move |((i, j), &w)| (self.ids[i], self.ids[j], w))
    }

    /// Length of a node-index sequence; `closed` adds the leg back to the first node.
    pub fn path_length(&self, order: &[usize], closed: bool) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }

        let mut length: f64 = order.windows(2).map(|w| self.distance(w[0], w[1])).sum();
        if closed {
            length += self.distance(order[order.len() - 1], order[0]);
        }
        length
    }

    pub fn statistics(&self) -> GraphStatistics {
        let edges = self.weights.len();
        let (min_km, max_km, mean_km) = if edges == 0 {
            (0.0, 0.0, 0.0)
        } else {
            let min = self.weights.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = self.weights.iter().cloned().fold(0.0, f64::max);
            let mean = self.weights.iter().sum::<f64>() / edges as f64;
            (min, max, mean)
        };

        GraphStatistics {
            model: self.model,
            nodes: self.ids.len(),
            edges,
            min_km,
            max_km,
            mean_km,
        }
    }
}

fn row_distances(
    points: &[GeoPoint],
    model: DistanceModel,
    i: usize,
) -> impl Iterator<Item = f64> + '_ {
    (i + 1..points.len()).map(move |j| model.distance_km(&points[i], &points[j]))
}

/// Summary numbers about a distance graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub model: DistanceModel,
    pub nodes: usize,
    pub edges: usize,
    pub min_km: f64,
    pub max_km: f64,
    pub mean_km: f64,
}

impl std::fmt::Display for GraphStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Distance graph ({})", self.model.name())?;
        writeln!(f, "  Waypoints: {}", self.nodes)?;
        writeln!(f, "  Edges: {}", self.edges)?;
        writeln!(f, "  Min distance: {:.3} km", self.min_km)?;
        writeln!(f, "  Avg distance: {:.3} km", self.mean_km)?;
        writeln!(f, "  Max distance: {:.3} km", self.max_km)
    }
}
