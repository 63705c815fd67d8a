use crate::graph::DistanceGraph;
use crate::tour::{RouteShape, Tour};
use ordered_float::OrderedFloat;

pub trait ConstructionHeuristic {
    /// Build a complete tour over every graph node, beginning at node index `start`.
    fn construct(&self, graph: &DistanceGraph, start: usize, shape: RouteShape) -> Tour;
    fn name(&self) -> &str;
}

/// Nearest Neighbor Heuristic
///
/// Builds a tour by repeatedly visiting the nearest unvisited node.
/// Ties go to the lowest node index.
pub struct NearestNeighborHeuristic;

impl NearestNeighborHeuristic {
    pub fn new() -> Self {
        NearestNeighborHeuristic
    }

    fn find_nearest(&self, graph: &DistanceGraph, current: usize, visited: &[bool]) -> Option<usize> {
        (0..graph.node_count())
            .filter(|&n| !visited[n])
            .min_by_key(|&n| (OrderedFloat(graph.distance(current, n)), n))
    }
}

impl Default for NearestNeighborHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionHeuristic for NearestNeighborHeuristic {
    fn construct(&self, graph: &DistanceGraph, start: usize, shape: RouteShape) -> Tour {
        let n = graph.node_count();
        let mut tour = Vec::with_capacity(n);
        let mut visited = vec![false; n];

        tour.push(start);
        visited[start] = true;
        let mut current = start;

        while let Some(next) = self.find_nearest(graph, current, &visited) {
            tour.push(next);
            visited[next] = true;
            current = next;
        }

        Tour::from_order(graph, tour, shape, self.name())
    }

    fn name(&self) -> &str {
        "NearestNeighbor"
    }
}

/// Cheapest Insertion Heuristic
///
/// Starts from the start node alone and repeatedly inserts the node/position
/// pair that adds the least length. Ties go to the lowest node index, then to
/// the earliest position. O(N^3) overall.
pub struct CheapestInsertionHeuristic;

impl CheapestInsertionHeuristic {
    pub fn new() -> Self {
        CheapestInsertionHeuristic
    }

    /// Added length when inserting `node` right after position `pos`
    fn insertion_cost(&self, graph: &DistanceGraph, tour: &[usize], shape: RouteShape, node: usize, pos: usize) -> f64 {
        let prev = tour[pos];
        let next = if pos + 1 < tour.len() {
            Some(tour[pos + 1])
        } else if shape.is_closed() {
            Some(tour[0])
        } else {
            None
        };

        match next {
            Some(next) => graph.distance(prev, node) + graph.distance(node, next) - graph.distance(prev, next),
            None => graph.distance(prev, node),
        }
    }
}

impl Default for CheapestInsertionHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl ConstructionHeuristic for CheapestInsertionHeuristic {
    fn construct(&self, graph: &DistanceGraph, start: usize, shape: RouteShape) -> Tour {
        let n = graph.node_count();
        let mut tour = Vec::with_capacity(n);
        let mut inserted = vec![false; n];

        tour.push(start);
        inserted[start] = true;

        while tour.len() < n {
            let mut best: Option<(f64, usize, usize)> = None;

            for node in (0..n).filter(|&v| !inserted[v]) {
                for pos in 0..tour.len() {
                    let cost = self.insertion_cost(graph, &tour, shape, node, pos);
                    if best.map_or(true, |(c, _, _)| cost < c) {
                        best = Some((cost, node, pos));
                    }
                }
            }

            match best {
                Some((_, node, pos)) => {
                    tour.insert(pos + 1, node);
                    inserted[node] = true;
                }
                None => break,
            }
        }

        Tour::from_order(graph, tour, shape, self.name())
    }

    fn name(&self) -> &str {
        "CheapestInsertion"
    }
}

/// Multi-Start Construction
///
/// Runs several construction heuristics and keeps the shortest tour. On equal
/// lengths the earlier heuristic wins.
pub struct MultiStartConstruction {
    heuristics: Vec<Box<dyn ConstructionHeuristic + Send + Sync>>,
}

impl MultiStartConstruction {
    pub fn with_all_heuristics() -> Self {
        let heuristics: Vec<Box<dyn ConstructionHeuristic + Send + Sync>> = vec![
            Box::new(NearestNeighborHeuristic::new()),
            Box::new(CheapestInsertionHeuristic::new()),
        ];
        MultiStartConstruction { heuristics }
    }
}

impl Default for MultiStartConstruction {
    fn default() -> Self {
        Self::with_all_heuristics()
    }
}

impl ConstructionHeuristic for MultiStartConstruction {
    fn construct(&self, graph: &DistanceGraph, start: usize, shape: RouteShape) -> Tour {
        let mut best: Option<Tour> = None;

        for heuristic in &self.heuristics {
            let tour = heuristic.construct(graph, start, shape);
            log::debug!("{} built a tour of {:.3} km", tour.algorithm, tour.length);
            if best.as_ref().map_or(true, |b| tour.length < b.length) {
                best = Some(tour);
            }
        }

        best.unwrap_or_else(|| Tour::from_order(graph, vec![start], shape, self.name()))
    }

    fn name(&self) -> &str {
        "MultiStart"
    }
}
