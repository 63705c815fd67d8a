//! Planner configuration.
//!
//! Every field has a default, so a JSON file only needs the values it changes:
//!
//! ```json
//! { "average_speed_kmh": 30, "solver": { "shape": "closed" } }
//! ```

use crate::error::{Error, Result};
use crate::geo::DistanceModel;
use crate::graph::DEFAULT_PARALLEL_THRESHOLD;
use crate::solver::SolverConfig;
use crate::summary::DEFAULT_AVERAGE_SPEED_KMH;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Speed used to turn distance into travel time
    pub average_speed_kmh: f64,
    pub distance_model: DistanceModel,
    /// Node count from which the distance graph is built in parallel
    pub parallel_threshold: usize,
    /// Reject out-of-range coordinates before solving
    pub validate_coordinates: bool,
    pub solver: SolverConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            distance_model: DistanceModel::Haversine,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            validate_coordinates: true,
            solver: SolverConfig::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path)?;
        let config: PlannerConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        log::debug!("Loaded planner config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.average_speed_kmh.is_finite() || self.average_speed_kmh <= 0.0 {
            return Err(Error::invalid_config(format!(
                "average speed must be a positive number, got {}",
                self.average_speed_kmh
            )));
        }
        self.solver.validate()
    }
}
