//! CSV ingestion and fixture generation.
//!
//! Rows use the column names `Latitude`, `Longitude`, `Place Name`,
//! `Customer Name` and `Mobile Number`; the last three may be absent. Waypoint
//! ids are assigned by row order.

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::waypoint::{CustomerRecord, Waypoint};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Place Name", default)]
    place_name: String,
    #[serde(rename = "Customer Name", default)]
    customer_name: String,
    #[serde(rename = "Mobile Number", default)]
    mobile_number: String,
}

/// Parse waypoints from CSV data, rejecting out-of-range coordinates
pub fn read_waypoints<R: Read>(reader: R) -> Result<Vec<Waypoint<CustomerRecord>>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut waypoints = Vec::new();

    for (id, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let waypoint = Waypoint::new(
            id,
            row.latitude,
            row.longitude,
            CustomerRecord {
                place_name: row.place_name,
                customer_name: row.customer_name,
                mobile_number: row.mobile_number,
            },
        );
        check_coordinates(&waypoint)?;
        waypoints.push(waypoint);
    }

    log::info!("Read {} waypoints", waypoints.len());
    Ok(waypoints)
}

pub fn load_waypoints<P: AsRef<Path>>(path: P) -> Result<Vec<Waypoint<CustomerRecord>>> {
    log::debug!("Loading waypoints from {:?}", path.as_ref());
    let file = File::open(&path)?;
    read_waypoints(file)
}

/// Write waypoints in the same CSV layout `read_waypoints` accepts
pub fn write_waypoints<W: Write>(writer: W, waypoints: &[Waypoint<CustomerRecord>]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for w in waypoints {
        csv_writer.serialize(CsvRow {
            latitude: w.latitude,
            longitude: w.longitude,
            place_name: w.payload.place_name.clone(),
            customer_name: w.payload.customer_name.clone(),
            mobile_number: w.payload.mobile_number.clone(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Range-check a waypoint's coordinates.
pub fn check_coordinates<P>(waypoint: &Waypoint<P>) -> Result<()> {
    if waypoint.point().is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidCoordinate {
            id: waypoint.id,
            latitude: waypoint.latitude,
            longitude: waypoint.longitude,
        })
    }
}

/// Resolve a start selector to a waypoint id.
///
/// A numeric selector is taken as an id; anything else is matched against
/// place names, ignoring case and surrounding whitespace.
pub fn resolve_start(waypoints: &[Waypoint<CustomerRecord>], selector: &str) -> Result<usize> {
    let selector = selector.trim();
    if let Ok(id) = selector.parse::<usize>() {
        return if waypoints.iter().any(|w| w.id == id) {
            Ok(id)
        } else {
            Err(Error::InvalidStartNode(id))
        };
    }

    waypoints
        .iter()
        .find(|w| w.payload.place_name.trim().eq_ignore_ascii_case(selector))
        .map(|w| w.id)
        .ok_or_else(|| Error::UnknownPlace(selector.to_string()))
}

/// Rectangle that random fixtures are drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl Default for GeoBounds {
    /// Roughly a 50 km square around Bengaluru
    fn default() -> Self {
        GeoBounds {
            min_latitude: 12.75,
            max_latitude: 13.20,
            min_longitude: 77.35,
            max_longitude: 77.80,
        }
    }
}

impl GeoBounds {
    /// Both corners are valid coordinates and each minimum is at most its maximum.
    pub fn validate(&self) -> Result<()> {
        let corners = [
            GeoPoint::new(self.min_latitude, self.min_longitude),
            GeoPoint::new(self.max_latitude, self.max_longitude),
        ];
        if let Some(corner) = corners.iter().find(|p| !p.is_valid()) {
            return Err(Error::invalid_config(format!("bounding box corner {} is out of range", corner)));
        }
        if self.min_latitude > self.max_latitude || self.min_longitude > self.max_longitude {
            return Err(Error::invalid_config("bounding box minimum exceeds maximum"));
        }
        Ok(())
    }
}

/// Generate `count` random waypoints inside `bounds`. Deterministic via seed.
pub fn random_waypoints(count: usize, seed: u64, bounds: &GeoBounds) -> Vec<Waypoint<CustomerRecord>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    (0..count)
        .map(|id| {
            let latitude = rng.gen_range(bounds.min_latitude..=bounds.max_latitude);
            let longitude = rng.gen_range(bounds.min_longitude..=bounds.max_longitude);
            let mobile = rng.gen_range(6_000_000_000u64..=9_999_999_999);
            Waypoint::new(
                id,
                latitude,
                longitude,
                CustomerRecord {
                    place_name: format!("Stop {}", id + 1),
                    customer_name: format!("Customer {}", id + 1),
                    mobile_number: mobile.to_string(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Place Name,Customer Name,Mobile Number,Latitude,Longitude
Warehouse,Ravi,9876500001,12.9716,77.5946
Indiranagar,Meera,9876500002,12.9784,77.6408
Jayanagar,Arjun,9876500003,12.9308,77.5838
";

    #[test]
    fn test_read_waypoints() {
        let waypoints = read_waypoints(SAMPLE.as_bytes()).unwrap();

        assert_eq!(waypoints.len(), 3);
        assert_eq!(waypoints[0].id, 0);
        assert_eq!(waypoints[2].id, 2);
        assert_eq!(waypoints[1].payload, CustomerRecord::new("Indiranagar", "Meera", "9876500002"));
        assert_eq!(waypoints[2].latitude, 12.9308);
    }

    #[test]
    fn test_optional_columns() {
        let data = "Latitude,Longitude\n1.5,2.5\n";
        let waypoints = read_waypoints(data.as_bytes()).unwrap();

        assert_eq!(waypoints.len(), 1);
        assert_eq!(waypoints[0].payload, CustomerRecord::default());
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let data = "Latitude,Longitude\n10.0,20.0\n95.0,20.0\n";
        let err = read_waypoints(data.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::InvalidCoordinate { id: 1, .. }));
    }

    #[test]
    fn test_missing_latitude_column_is_csv_error() {
        let data = "Lat,Longitude\n10.0,20.0\n";
        let err = read_waypoints(data.as_bytes()).unwrap_err();

        assert!(matches!(err, Error::Csv(_)));
    }

    #[test]
    fn test_write_then_read() {
        let original = random_waypoints(5, 99, &GeoBounds::default());
        let mut buffer = Vec::new();
        write_waypoints(&mut buffer, &original).unwrap();

        let parsed = read_waypoints(buffer.as_slice()).unwrap();
        assert_eq!(parsed.len(), 5);
        assert_eq!(parsed[3].payload, original[3].payload);
        assert!((parsed[3].latitude - original[3].latitude).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_start() {
        let waypoints = read_waypoints(SAMPLE.as_bytes()).unwrap();

        assert_eq!(resolve_start(&waypoints, "2").unwrap(), 2);
        assert_eq!(resolve_start(&waypoints, " indiranagar ").unwrap(), 1);
        assert!(matches!(resolve_start(&waypoints, "7"), Err(Error::InvalidStartNode(7))));
        assert!(matches!(resolve_start(&waypoints, "Koramangala"), Err(Error::UnknownPlace(_))));
    }

    #[test]
    fn test_random_waypoints_are_seeded_and_bounded() {
        let bounds = GeoBounds::default();
        let a = random_waypoints(50, 5, &bounds);
        let b = random_waypoints(50, 5, &bounds);

        assert_eq!(a, b);
        for w in &a {
            assert!(w.latitude >= bounds.min_latitude && w.latitude <= bounds.max_latitude);
            assert!(w.longitude >= bounds.min_longitude && w.longitude <= bounds.max_longitude);
        }
    }

    #[test]
    fn test_bounds_validation() {
        assert!(GeoBounds::default().validate().is_ok());

        let bad = [
            GeoBounds { min_latitude: f64::NAN, ..GeoBounds::default() },
            GeoBounds { max_latitude: 95.0, ..GeoBounds::default() },
            GeoBounds { min_longitude: -181.0, ..GeoBounds::default() },
            GeoBounds { max_longitude: f64::INFINITY, ..GeoBounds::default() },
            GeoBounds { min_latitude: 13.5, ..GeoBounds::default() },
        ];
        for bounds in &bad {
            assert!(matches!(bounds.validate(), Err(Error::InvalidConfig(_))), "{:?}", bounds);
        }
    }
}
