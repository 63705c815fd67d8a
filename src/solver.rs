//! Route solver: picks a visiting order over the distance graph.
//!
//! Small inputs (up to `exact_threshold` nodes) are solved by exhaustive
//! enumeration. Larger inputs get a construction heuristic followed, unless
//! disabled, by variable neighborhood descent over 2-opt and Or-opt moves.
//! Every step breaks ties by node index, so the same graph and start always
//! produce the same route.

use crate::error::{Error, Result};
use crate::exact::{ExhaustiveSearch, DEFAULT_EXACT_THRESHOLD, MAX_EXACT_THRESHOLD};
use crate::graph::DistanceGraph;
use crate::heuristics::construction::{
    CheapestInsertionHeuristic, ConstructionHeuristic, MultiStartConstruction, NearestNeighborHeuristic,
};
use crate::heuristics::local_search::{LocalSearch, DEFAULT_MAX_PASSES, VND};
use crate::tour::{Route, RouteShape, Tour};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Construction heuristic choices
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Construction {
    #[default]
    NearestNeighbor,
    CheapestInsertion,
    /// Run every construction and keep the shortest
    Best,
}

/// Solver settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub construction: Construction,
    /// Improve the constructed tour with 2-opt / Or-opt descent
    pub local_search: bool,
    /// Node count up to which all orders are enumerated, at most
    /// [`MAX_EXACT_THRESHOLD`]
    pub exact_threshold: usize,
    /// Sweep cap per local search operator
    pub max_passes: usize,
    pub shape: RouteShape,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            construction: Construction::NearestNeighbor,
            local_search: true,
            exact_threshold: DEFAULT_EXACT_THRESHOLD,
            max_passes: DEFAULT_MAX_PASSES,
            shape: RouteShape::Open,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        if self.exact_threshold > MAX_EXACT_THRESHOLD {
            return Err(Error::invalid_config(format!(
                "exact threshold must be at most {}, got {}",
                MAX_EXACT_THRESHOLD, self.exact_threshold
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteSolver {
    config: SolverConfig,
}

impl RouteSolver {
    /// Build a solver. An exact threshold above [`MAX_EXACT_THRESHOLD`] is
    /// clamped to it.
    pub fn new(mut config: SolverConfig) -> Self {
        if config.exact_threshold > MAX_EXACT_THRESHOLD {
            log::warn!(
                "Exact threshold {} clamped to {}",
                config.exact_threshold,
                MAX_EXACT_THRESHOLD
            );
            config.exact_threshold = MAX_EXACT_THRESHOLD;
        }
        RouteSolver { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve for a route beginning at waypoint `start_id`.
    pub fn solve(&self, graph: &DistanceGraph, start_id: usize) -> Result<Route> {
        let start = graph.index_of(start_id).ok_or(Error::InvalidStartNode(start_id))?;
        let tour = self.solve_tour(graph, start);

        if !tour.is_complete(graph.node_count()) {
            // Every heuristic visits all nodes; anything else is a defect
            let missing = (0..graph.node_count())
                .find(|node| !tour.order.contains(node))
                .map_or(start_id, |node| graph.id_at(node));
            return Err(Error::MissingWaypoint(missing));
        }

        Ok(tour.into_route(graph))
    }

    /// Solve over node indices, returning the working tour.
    pub fn solve_tour(&self, graph: &DistanceGraph, start: usize) -> Tour {
        let timer = Instant::now();
        let n = graph.node_count();
        let shape = self.config.shape;

        let tour = if n <= self.config.exact_threshold {
            ExhaustiveSearch::new().construct(graph, start, shape)
        } else {
            let mut tour = self.construction().construct(graph, start, shape);
            log::debug!("{} tour: {:.3} km", tour.algorithm, tour.length);

            if self.config.local_search {
                let vnd = VND::with_standard_operators(self.config.max_passes);
                let before = tour.length;
                if vnd.improve(graph, &mut tour) {
                    tour.algorithm = format!("{} + {}", tour.algorithm, vnd.name());
                }
                log::debug!("Local search: {:.3} -> {:.3} km", before, tour.length);
            }
            tour
        };

        log::info!(
            "Solved {} waypoints with {} in {:.3}s: {:.3} km",
            n,
            tour.algorithm,
            timer.elapsed().as_secs_f64(),
            tour.length
        );
        tour
    }

    fn construction(&self) -> Box<dyn ConstructionHeuristic> {
        match self.config.construction {
            Construction::NearestNeighbor => Box::new(NearestNeighborHeuristic::new()),
            Construction::CheapestInsertion => Box::new(CheapestInsertionHeuristic::new()),
            Construction::Best => Box::new(MultiStartConstruction::with_all_heuristics()),
        }
    }
}
