//! Route Planner Library
//!
//! Plans a short visiting order over geographic customer waypoints.
//!
//! # Features
//!
//! - Great-circle (haversine) and ellipsoidal (WGS-84 geodesic) distances
//! - Complete distance graph, built in parallel for large inputs
//! - Deterministic TSP heuristics: exhaustive search for small inputs,
//!   Nearest Neighbor / Cheapest Insertion construction, 2-opt and Or-opt descent
//! - Route summary with total distance, travel time and records in visiting order
//! - CSV ingestion and seeded random fixtures
//!
//! # Example
//!
//! ```
//! use route_planner::{compute_route, Waypoint};
//!
//! let waypoints = vec![
//!     Waypoint::new(0, 12.9716, 77.5946, "Warehouse"),
//!     Waypoint::new(1, 12.9784, 77.6408, "Indiranagar"),
//!     Waypoint::new(2, 12.9308, 77.5838, "Jayanagar"),
//! ];
//!
//! let summary = compute_route(&waypoints, 0).unwrap();
//! assert_eq!(summary.route[0], 0);
//! println!("{:.2} km, {:.2} h", summary.total_distance_km, summary.total_time_hours);
//! ```

pub mod config;
pub mod error;
pub mod exact;
pub mod geo;
pub mod graph;
pub mod heuristics;
pub mod input;
pub mod planner;
pub mod solver;
pub mod summary;
pub mod tour;
pub mod waypoint;

pub use config::PlannerConfig;
pub use error::{Error, Result};
pub use geo::{DistanceModel, GeoPoint};
pub use graph::DistanceGraph;
pub use planner::{compute_route, RoutePlanner};
pub use solver::{Construction, RouteSolver, SolverConfig};
pub use summary::RouteSummary;
pub use tour::{Route, RouteShape};
pub use waypoint::{CustomerRecord, Waypoint};
