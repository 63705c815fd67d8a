//! Route summary: distance, travel time and the records in visiting order.

use crate::error::{Error, Result};
use crate::graph::DistanceGraph;
use crate::tour::{Route, RouteShape};
use crate::waypoint::Waypoint;
use serde::Serialize;
use std::collections::HashMap;

/// Default average travel speed in km/h
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSummary<P> {
    /// Waypoint ids in visiting order
    pub route: Vec<usize>,
    pub shape: RouteShape,
    /// Distance of each leg, in route order
    pub legs_km: Vec<f64>,
    pub total_distance_km: f64,
    pub total_time_hours: f64,
    pub average_speed_kmh: f64,
    /// Payloads in visiting order
    pub ordered_records: Vec<P>,
}

impl<P: Clone> RouteSummary<P> {
    /// Walk `route` over the graph weights and collect the matching records.
    pub fn from_route(
        route: &Route,
        graph: &DistanceGraph,
        waypoints: &[Waypoint<P>],
        average_speed_kmh: f64,
    ) -> Result<Self> {
        let records: HashMap<usize, &Waypoint<P>> = waypoints.iter().map(|w| (w.id, w)).collect();

        let ordered_records = route
            .ids()
            .iter()
            .map(|id| {
                records
                    .get(id)
                    .map(|w| w.payload.clone())
                    .ok_or(Error::MissingWaypoint(*id))
            })
            .collect::<Result<Vec<P>>>()?;

        let legs_km = route
            .legs()
            .map(|(a, b)| leg_km(graph, a, b))
            .collect::<Result<Vec<f64>>>()?;

        let total_distance_km: f64 = legs_km.iter().sum();
        let total_time_hours = total_distance_km / average_speed_kmh;

        Ok(RouteSummary {
            route: route.ids().to_vec(),
            shape: route.shape(),
            legs_km,
            total_distance_km,
            total_time_hours,
            average_speed_kmh,
            ordered_records,
        })
    }
}

fn leg_km(graph: &DistanceGraph, a: usize, b: usize) -> Result<f64> {
    if a == b {
        return Err(Error::RepeatedWaypoint(a));
    }
    graph
        .weight(a, b)
        .ok_or(Error::MissingWaypoint(if graph.contains(a) { b } else { a }))
}

impl<P> RouteSummary<P> {
    /// Travel time split into whole hours and minutes
    pub fn hours_minutes(&self) -> (u64, u64) {
        let total_minutes = (self.total_time_hours * 60.0).round() as u64;
        (total_minutes / 60, total_minutes % 60)
    }
}

impl<P: std::fmt::Display> std::fmt::Display for RouteSummary<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (hours, minutes) = self.hours_minutes();
        writeln!(f, "Route ({} stops, {:?})", self.route.len(), self.shape)?;
        writeln!(f, "  Total distance: {:.2} km", self.total_distance_km)?;
        writeln!(
            f,
            "  Estimated time: {:.2} h ({}h {:02}m at {} km/h)",
            self.total_time_hours, hours, minutes, self.average_speed_kmh
        )?;
        for (i, (id, record)) in self.route.iter().zip(&self.ordered_records).enumerate() {
            writeln!(f, "  {:>3}. [{}] {}", i + 1, id, record)?;
        }
        Ok(())
    }
}
