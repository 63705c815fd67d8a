//! Exhaustive search for small inputs.
//!
//! Enumerates every order of the non-start nodes in lexicographic order and
//! keeps the first one with strictly smallest length. (N-1)! orders are
//! evaluated, so this is only used below a small node count.

use crate::graph::DistanceGraph;
use crate::heuristics::construction::ConstructionHeuristic;
use crate::tour::{RouteShape, Tour};

/// Default node count up to which routes are solved exactly
pub const DEFAULT_EXACT_THRESHOLD: usize = 8;

/// Largest accepted exact threshold; 9! orders at N = 10
pub const MAX_EXACT_THRESHOLD: usize = 10;

pub struct ExhaustiveSearch;

impl ExhaustiveSearch {
    pub fn new() -> Self {
        ExhaustiveSearch
    }
}

impl Default for ExhaustiveSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionHeuristic for ExhaustiveSearch {
    fn construct(&self, graph: &DistanceGraph, start: usize, shape: RouteShape) -> Tour {
        let n = graph.node_count();
        let mut rest: Vec<usize> = (0..n).filter(|&v| v != start).collect();
        let mut order = Vec::with_capacity(n);

        let mut best_order: Vec<usize> = Vec::new();
        let mut best_length = f64::INFINITY;
        let mut evaluated = 0usize;

        loop {
            order.clear();
            order.push(start);
            order.extend_from_slice(&rest);

            let length = graph.path_length(&order, shape.is_closed());
            evaluated += 1;
            if length < best_length {
                best_length = length;
                best_order.clone_from(&order);
            }

            if !next_permutation(&mut rest) {
                break;
            }
        }

        log::debug!("Exhaustive search evaluated {} orders", evaluated);
        Tour::from_order(graph, best_order, shape, self.name())
    }

    fn name(&self) -> &str {
        "Exhaustive"
    }
}

/// Advance to the next lexicographic permutation. Returns false (leaving the
/// slice untouched) once the last permutation has been reached.
fn next_permutation(v: &mut [usize]) -> bool {
    if v.len() < 2 {
        return false;
    }

    let mut i = v.len() - 1;
    while i > 0 && v[i - 1] >= v[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    let mut j = v.len() - 1;
    while v[j] <= v[i - 1] {
        j -= 1;
    }
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::DistanceModel;
    use crate::heuristics::construction::NearestNeighborHeuristic;
    use crate::input::{random_waypoints, GeoBounds};
    use crate::waypoint::Waypoint;

    #[test]
    fn test_next_permutation_enumerates_all() {
        let mut v = vec![0, 1, 2, 3];
        let mut count = 1;
        while next_permutation(&mut v) {
            count += 1;
        }
        assert_eq!(count, 24);
        assert_eq!(v, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_single_node() {
        let waypoints = vec![Waypoint::new(0, 10.0, 10.0, ())];
        let graph = DistanceGraph::build(&waypoints, DistanceModel::Haversine).unwrap();
        let tour = ExhaustiveSearch::new().construct(&graph, 0, RouteShape::Open);

        assert_eq!(tour.order, vec![0]);
        assert_eq!(tour.length, 0.0);
    }

    #[test]
    fn test_never_worse_than_nearest_neighbor() {
        for seed in 0..5 {
            let waypoints = random_waypoints(7, seed, &GeoBounds::default());
            let graph = DistanceGraph::build(&waypoints, DistanceModel::Haversine).unwrap();

            for shape in [RouteShape::Open, RouteShape::Closed] {
                let exact = ExhaustiveSearch::new().construct(&graph, 2, shape);
                let nn = NearestNeighborHeuristic::new().construct(&graph, 2, shape);

                assert!(exact.is_complete(7));
                assert_eq!(exact.order[0], 2);
                assert!(exact.length <= nn.length + 1e-9);
            }
        }
    }
}
