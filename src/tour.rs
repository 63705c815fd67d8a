//! Tour and route representations.
//!
//! A [`Tour`] is the solver's working state: an order of graph node indices
//! with its cached length. A [`Route`] is the finished product handed to the
//! summary: the same order expressed in waypoint ids.

use crate::graph::DistanceGraph;
use serde::{Deserialize, Serialize};

/// Whether a route ends at its last stop or returns to the start
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteShape {
    /// Hamiltonian path starting at the start waypoint
    #[default]
    Open,
    /// Hamiltonian cycle; the leg back to the start is counted
    Closed,
}

impl RouteShape {
    #[inline]
    pub fn is_closed(&self) -> bool {
        matches!(self, RouteShape::Closed)
    }
}

/// Working tour over graph node indices. Position 0 holds the start node.
#[derive(Debug, Clone)]
pub struct Tour {
    pub order: Vec<usize>,
    pub shape: RouteShape,
    /// Total length in kilometers
    pub length: f64,
    /// Heuristic that produced the tour
    pub algorithm: String,
}

impl Tour {
    pub fn from_order(graph: &DistanceGraph, order: Vec<usize>, shape: RouteShape, algorithm: &str) -> Self {
        let length = graph.path_length(&order, shape.is_closed());
        Tour {
            order,
            shape,
            length,
            algorithm: algorithm.to_string(),
        }
    }

    /// Recompute the cached length from scratch.
    pub fn validate(&mut self, graph: &DistanceGraph) {
        self.length = graph.path_length(&self.order, self.shape.is_closed());
    }

    /// Every node in `0..node_count` appears exactly once.
    pub fn is_complete(&self, node_count: usize) -> bool {
        if self.order.len() != node_count {
            return false;
        }
        let mut seen = vec![false; node_count];
        for &node in &self.order {
            if node >= node_count || seen[node] {
                return false;
            }
            seen[node] = true;
        }
        true
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Node following position `pos`, wrapping to the start on closed tours.
    #[inline]
    pub fn after(&self, pos: usize) -> Option<usize> {
        let n = self.order.len();
        if pos + 1 < n {
            Some(self.order[pos + 1])
        } else if self.shape.is_closed() && n > 1 {
            Some(self.order[0])
        } else {
            None
        }
    }

    /// Length change from reversing `order[i+1..=j]`.
    pub fn two_opt_delta(&self, graph: &DistanceGraph, i: usize, j: usize) -> f64 {
        if i + 1 >= j || j >= self.order.len() {
            return 0.0;
        }

        let a = self.order[i];
        let b = self.order[i + 1];
        let c = self.order[j];

        let mut delta = graph.distance(a, c) - graph.distance(a, b);
        if let Some(d) = self.after(j) {
            delta += graph.distance(b, d) - graph.distance(c, d);
        }
        delta
    }

    /// Apply a 2-opt move (reverse segment between i+1 and j)
    pub fn apply_two_opt(&mut self, i: usize, j: usize) {
        self.order[i + 1..=j].reverse();
    }

    /// Length change from moving `order[start..start+len]` to just after
    /// position `pos`. Zero for moves that would touch the start node or leave
    /// the tour unchanged.
    pub fn or_opt_delta(&self, graph: &DistanceGraph, start: usize, len: usize, pos: usize) -> f64 {
        let n = self.order.len();
        if start == 0 || len == 0 {
            return 0.0;
        }
        let end = start + len - 1;
        if end >= n || pos >= n || (pos + 1 >= start && pos <= end) {
            return 0.0;
        }

        let prev = self.order[start - 1];
        let first = self.order[start];
        let last = self.order[end];

        let removal = graph.distance(prev, first)
            + self
                .after(end)
                .map_or(0.0, |next| graph.distance(last, next) - graph.distance(prev, next));

        let u = self.order[pos];
        let insertion = graph.distance(u, first)
            + self
                .after(pos)
                .map_or(0.0, |v| graph.distance(last, v) - graph.distance(u, v));

        insertion - removal
    }

    /// Apply an Or-opt move (relocate segment start..start+len after pos)
    pub fn apply_or_opt(&mut self, start: usize, len: usize, pos: usize) {
        let segment: Vec<usize> = self.order.drain(start..start + len).collect();
        let insert_at = if pos < start { pos + 1 } else { pos + 1 - len };
        self.order.splice(insert_at..insert_at, segment);
    }

    /// Translate node indices into waypoint ids.
    pub fn into_route(self, graph: &DistanceGraph) -> Route {
        Route {
            ids: self.order.iter().map(|&node| graph.id_at(node)).collect(),
            shape: self.shape,
        }
    }
}

/// Visiting order over waypoint ids, starting with the start waypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    ids: Vec<usize>,
    shape: RouteShape,
}

impl Route {
    pub fn new(ids: Vec<usize>, shape: RouteShape) -> Self {
        Route { ids, shape }
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn shape(&self) -> RouteShape {
        self.shape
    }

    pub fn start(&self) -> Option<usize> {
        self.ids.first().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Consecutive id pairs in visiting order, including the return leg on
    /// closed routes with more than one stop.
    pub fn legs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let closing = match (self.shape, self.ids.first(), self.ids.last()) {
            (RouteShape::Closed, Some(&first), Some(&last)) if self.ids.len() > 1 => Some((last, first)),
            _ => None,
        };
        self.ids.windows(2).map(|w| (w[0], w[1])).chain(closing)
    }
}
