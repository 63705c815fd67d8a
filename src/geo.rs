//! Geodesic distances between latitude/longitude points.
//!
//! Two fixed models are available, both from the `geo` crate: a haversine great
//! circle on the mean Earth sphere and Karney's geodesic on the WGS-84
//! ellipsoid. Every pair is evaluated in a canonical point order so
//! `distance(a, b)` and `distance(b, a)` are bit-identical.

use ::geo::{Distance, Geodesic, Haversine, Point};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Mean Earth radius (IUGG) in kilometers, as used by the haversine model.
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0088;

/// A position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        GeoPoint { latitude, longitude }
    }

    /// Finite, latitude in [-90, 90] and longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    #[inline]
    fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    fn canonical_cmp(&self, other: &Self) -> Ordering {
        self.latitude
            .total_cmp(&other.latitude)
            .then(self.longitude.total_cmp(&other.longitude))
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// Earth model used to measure distances
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceModel {
    /// Great circle on a sphere of mean Earth radius
    #[default]
    Haversine,
    /// Karney geodesic on the WGS-84 ellipsoid
    Geodesic,
}

impl DistanceModel {
    /// Distance in kilometers between `a` and `b`.
    pub fn distance_km(&self, a: &GeoPoint, b: &GeoPoint) -> f64 {
        let (p, q) = match a.canonical_cmp(b) {
            Ordering::Equal => return 0.0,
            Ordering::Less => (a, b),
            Ordering::Greater => (b, a),
        };

        let (p, q) = (p.to_point(), q.to_point());
        let meters = match self {
            DistanceModel::Haversine => Haversine::distance(p, q),
            DistanceModel::Geodesic => Geodesic::distance(p, q),
        };
        meters / 1000.0
    }

    pub fn name(&self) -> &str {
        match self {
            DistanceModel::Haversine => "haversine",
            DistanceModel::Geodesic => "geodesic",
        }
    }
}

/// Haversine distance with the default model
pub fn distance_km(a: &GeoPoint, b: &GeoPoint) -> f64 {
    DistanceModel::Haversine.distance_km(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_zero() {
        let p = GeoPoint::new(48.8566, 2.3522);
        assert_eq!(DistanceModel::Haversine.distance_km(&p, &p), 0.0);
        assert_eq!(DistanceModel::Geodesic.distance_km(&p, &p), 0.0);
    }

    #[test]
    fn test_symmetry_is_exact() {
        let points = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(12.9716, 77.5946),
            GeoPoint::new(-33.8688, 151.2093),
            GeoPoint::new(51.5074, -0.1278),
            GeoPoint::new(89.9, -179.9),
        ];
        for model in [DistanceModel::Haversine, DistanceModel::Geodesic] {
            for a in &points {
                for b in &points {
                    assert_eq!(model.distance_km(a, b), model.distance_km(b, a));
                }
            }
        }
    }

    #[test]
    fn test_one_degree_on_equator() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);

        let sphere = distance_km(&a, &b);
        assert!((sphere - 111.1951).abs() < 1e-3, "got {}", sphere);
        assert!((sphere - MEAN_EARTH_RADIUS_KM * 1f64.to_radians()).abs() < 1e-6);

        let ellipsoid = DistanceModel::Geodesic.distance_km(&a, &b);
        assert!((ellipsoid - 111.3195).abs() < 1e-3, "got {}", ellipsoid);
    }

    #[test]
    fn test_known_city_pair() {
        // Paris to London
        let paris = GeoPoint::new(48.8566, 2.3522);
        let london = GeoPoint::new(51.5074, -0.1278);

        let d = distance_km(&paris, &london);
        assert!((d - 343.5).abs() < 1.0, "got {}", d);

        let v = DistanceModel::Geodesic.distance_km(&paris, &london);
        assert!((v - d).abs() < 2.0, "got {}", v);
    }

    #[test]
    fn test_nearly_antipodal_points_stay_ellipsoidal() {
        let a = GeoPoint::new(0.0, 0.0);

        // Below (1 - f) * 180 degrees the geodesic follows the equator.
        let equator = DistanceModel::Geodesic.distance_km(&a, &GeoPoint::new(0.0, 179.0));
        assert!((equator - 19_926.19).abs() < 0.1, "got {}", equator);

        // Antipodes on the equator are joined over the pole.
        let antipode = DistanceModel::Geodesic.distance_km(&a, &GeoPoint::new(0.0, 180.0));
        assert!((antipode - 20_003.93).abs() < 0.01, "got {}", antipode);

        let near = DistanceModel::Geodesic.distance_km(&a, &GeoPoint::new(0.5, 179.7));
        assert!(near.is_finite());
        assert!(near > 19_800.0 && near <= 20_003.94, "got {}", near);
    }

    #[test]
    fn test_point_validity() {
        assert!(GeoPoint::new(90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 0.0).is_valid());
    }
}
