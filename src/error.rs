//! Error taxonomy for route planning.

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    /// No waypoints were supplied.
    #[error("no waypoints supplied")]
    EmptyInput,
    /// The requested start id is not among the supplied waypoints.
    #[error("start waypoint {0} is not among the supplied waypoints")]
    InvalidStartNode(usize),
    /// A route id has no matching record. Indicates a solver defect.
    #[error("route references waypoint {0} which has no record")]
    MissingWaypoint(usize),
    #[error("waypoint id {0} appears more than once")]
    DuplicateWaypoint(usize),
    /// A route visits the same waypoint on two consecutive stops.
    #[error("route visits waypoint {0} twice in a row")]
    RepeatedWaypoint(usize),
    #[error("waypoint {id} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinate {
        id: usize,
        latitude: f64,
        longitude: f64,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("no waypoint has place name {0:?}")]
    UnknownPlace(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
