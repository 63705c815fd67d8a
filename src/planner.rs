//! Entry point tying the pipeline together:
//! waypoints -> distance graph -> route -> summary.

use crate::config::PlannerConfig;
use crate::error::{Error, Result};
use crate::graph::DistanceGraph;
use crate::input::check_coordinates;
use crate::solver::RouteSolver;
use crate::summary::RouteSummary;
use crate::waypoint::Waypoint;

/// Plan a route with the default configuration.
pub fn compute_route<P: Clone>(waypoints: &[Waypoint<P>], start_id: usize) -> Result<RouteSummary<P>> {
    RoutePlanner::default().plan(waypoints, start_id)
}

#[derive(Debug, Clone, Default)]
pub struct RoutePlanner {
    config: PlannerConfig,
}

impl RoutePlanner {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(RoutePlanner { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Compute a visiting order over `waypoints` beginning at `start_id`.
    ///
    /// Input checks run before any distance is computed: empty input, then
    /// the start id, then coordinates (when enabled).
    pub fn plan<P: Clone>(&self, waypoints: &[Waypoint<P>], start_id: usize) -> Result<RouteSummary<P>> {
        if waypoints.is_empty() {
            return Err(Error::EmptyInput);
        }
        if !waypoints.iter().any(|w| w.id == start_id) {
            return Err(Error::InvalidStartNode(start_id));
        }
        if self.config.validate_coordinates {
            waypoints.iter().try_for_each(check_coordinates)?;
        }

        let graph = DistanceGraph::build_with_threshold(
            waypoints,
            self.config.distance_model,
            self.config.parallel_threshold,
        )?;
        let route = RouteSolver::new(self.config.solver.clone()).solve(&graph, start_id)?;
        let summary = RouteSummary::from_route(&route, &graph, waypoints, self.config.average_speed_kmh)?;

        log::info!(
            "Planned {} stops: {:.2} km, {:.2} h",
            summary.route.len(),
            summary.total_distance_km,
            summary.total_time_hours
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{distance_km, DistanceModel, GeoPoint};
    use crate::input::{random_waypoints, GeoBounds};
    use crate::solver::SolverConfig;
    use crate::tour::RouteShape;
    use crate::waypoint::CustomerRecord;
    use std::collections::HashMap;

    fn recompute_distance<P>(waypoints: &[Waypoint<P>], route: &[usize], closed: bool) -> f64 {
        let points: HashMap<usize, GeoPoint> = waypoints.iter().map(|w| (w.id, w.point())).collect();
        let mut total: f64 = route.windows(2).map(|w| distance_km(&points[&w[0]], &points[&w[1]])).sum();
        if closed && route.len() > 1 {
            total += distance_km(&points[&route[route.len() - 1]], &points[&route[0]]);
        }
        total
    }

    #[test]
    fn test_three_waypoint_example() {
        let waypoints = vec![
            Waypoint::new(0, 0.0, 0.0, "origin"),
            Waypoint::new(1, 0.0, 1.0, "east"),
            Waypoint::new(2, 1.0, 0.0, "north"),
        ];
        let summary = compute_route(&waypoints, 0).unwrap();

        assert_eq!(summary.route.len(), 3);
        assert_eq!(summary.route[0], 0);
        let mut visited = summary.route.clone();
        visited.sort();
        assert_eq!(visited, vec![0, 1, 2]);

        let legs: f64 = summary
            .route
            .windows(2)
            .map(|w| distance_km(&waypoints[w[0]].point(), &waypoints[w[1]].point()))
            .sum();
        assert!((summary.total_distance_km - legs).abs() < 1e-9);
        assert_eq!(summary.ordered_records.len(), 3);
        assert_eq!(summary.ordered_records[0], "origin");
    }

    #[test]
    fn test_single_waypoint() {
        let waypoints = vec![Waypoint::new(0, 12.97, 77.59, "only")];
        let summary = compute_route(&waypoints, 0).unwrap();

        assert_eq!(summary.route, vec![0]);
        assert_eq!(summary.total_distance_km, 0.0);
        assert_eq!(summary.total_time_hours, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let waypoints: Vec<Waypoint<()>> = Vec::new();
        assert!(matches!(compute_route(&waypoints, 0), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_invalid_start() {
        let waypoints = random_waypoints(4, 1, &GeoBounds::default());
        assert!(matches!(compute_route(&waypoints, 4), Err(Error::InvalidStartNode(4))));
    }

    #[test]
    fn test_invalid_coordinates_rejected_unless_disabled() {
        let waypoints = vec![Waypoint::new(0, 0.0, 0.0, ()), Waypoint::new(1, 0.0, 200.0, ())];
        assert!(matches!(
            compute_route(&waypoints, 0),
            Err(Error::InvalidCoordinate { id: 1, .. })
        ));

        let planner = RoutePlanner::new(PlannerConfig {
            validate_coordinates: false,
            ..Default::default()
        })
        .unwrap();
        assert!(planner.plan(&waypoints, 0).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let waypoints = vec![Waypoint::new(3, 0.0, 0.0, ()), Waypoint::new(3, 0.0, 1.0, ())];
        assert!(matches!(compute_route(&waypoints, 3), Err(Error::DuplicateWaypoint(3))));
    }

    #[test]
    fn test_deterministic_summaries() {
        let waypoints = random_waypoints(80, 17, &GeoBounds::default());
        let a = compute_route(&waypoints, 10).unwrap();
        let b = compute_route(&waypoints, 10).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.total_distance_km.to_bits(), b.total_distance_km.to_bits());
    }

    #[test]
    fn test_totals_match_independent_recomputation() {
        let waypoints = random_waypoints(40, 23, &GeoBounds::default());

        for shape in [RouteShape::Open, RouteShape::Closed] {
            let planner = RoutePlanner::new(PlannerConfig {
                average_speed_kmh: 25.0,
                solver: SolverConfig {
                    shape,
                    ..Default::default()
                },
                ..Default::default()
            })
            .unwrap();
            let summary = planner.plan(&waypoints, 0).unwrap();

            let expected = recompute_distance(&waypoints, &summary.route, shape.is_closed());
            assert!((summary.total_distance_km - expected).abs() < 1e-6);
            assert!((summary.total_time_hours - summary.total_distance_km / 25.0).abs() < 1e-12);

            let by_id: HashMap<usize, &CustomerRecord> = waypoints.iter().map(|w| (w.id, &w.payload)).collect();
            for (id, record) in summary.route.iter().zip(&summary.ordered_records) {
                assert_eq!(by_id[id], record);
            }
        }
    }

    #[test]
    fn test_parallel_and_geodesic_configuration() {
        let waypoints = random_waypoints(30, 4, &GeoBounds::default());
        let sequential = RoutePlanner::new(PlannerConfig {
            distance_model: DistanceModel::Geodesic,
            ..Default::default()
        })
        .unwrap();
        let parallel = RoutePlanner::new(PlannerConfig {
            distance_model: DistanceModel::Geodesic,
            parallel_threshold: 1,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(sequential.plan(&waypoints, 2).unwrap(), parallel.plan(&waypoints, 2).unwrap());
    }

    #[test]
    fn test_bad_speed_is_rejected() {
        let err = RoutePlanner::new(PlannerConfig {
            average_speed_kmh: 0.0,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
