//! Waypoint records handed to the planner.

use crate::geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// A geographic stop with its associated payload.
///
/// `id` is a stable index assigned by input order and must be unique within a
/// planning call. The payload is carried through to the route summary unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint<P> {
    pub id: usize,
    pub latitude: f64,
    pub longitude: f64,
    pub payload: P,
}

impl<P> Waypoint<P> {
    pub fn new(id: usize, latitude: f64, longitude: f64, payload: P) -> Self {
        Waypoint { id, latitude, longitude, payload }
    }

    #[inline]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Customer details attached to a delivery stop
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub place_name: String,
    pub customer_name: String,
    pub mobile_number: String,
}

impl CustomerRecord {
    pub fn new(place_name: &str, customer_name: &str, mobile_number: &str) -> Self {
        CustomerRecord {
            place_name: place_name.to_string(),
            customer_name: customer_name.to_string(),
            mobile_number: mobile_number.to_string(),
        }
    }
}

impl std::fmt::Display for CustomerRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.place_name)?;
        if !self.customer_name.is_empty() {
            write!(f, " - {}", self.customer_name)?;
        }
        if !self.mobile_number.is_empty() {
            write!(f, " ({})", self.mobile_number)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_display() {
        let full = CustomerRecord::new("Depot", "Asha", "9876543210");
        assert_eq!(full.to_string(), "Depot - Asha (9876543210)");

        let bare = CustomerRecord::new("Depot", "", "");
        assert_eq!(bare.to_string(), "Depot");
    }

    #[test]
    fn test_point_uses_coordinates() {
        let w = Waypoint::new(3, 12.5, 77.25, ());
        assert_eq!(w.point(), GeoPoint::new(12.5, 77.25));
    }
}
