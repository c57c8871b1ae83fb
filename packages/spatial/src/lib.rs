#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Spherical geometry for the radius search endpoint.
//!
//! Converts a linear search distance in miles into an angular radius
//! (distance divided by Earth's mean radius) and provides the matching
//! containment predicate: a point is inside a [`RadiusFilter`] when the
//! central angle between it and the filter center is at most the angular
//! radius. The same predicate is pushed into SQL by the database crate;
//! the in-process version exists for tests and for filtering rows that
//! already live in memory.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earth's mean radius in miles. The divisor for converting a linear
/// search distance into an angular radius.
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

/// A point on the WGS84 sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

impl GeoPoint {
    /// Creates a new point from the given coordinates.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Error returned when a radius filter is constructed from an invalid
/// distance.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid search distance {distance}: must be a positive number of miles")]
pub struct InvalidDistanceError {
    /// The rejected distance value.
    pub distance: f64,
}

/// A spherical containment filter: all points within `angular_radius`
/// (radians of central angle) of `center`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadiusFilter {
    /// Center of the search circle.
    pub center: GeoPoint,
    /// Radius expressed as a central angle in radians.
    pub angular_radius: f64,
}

impl RadiusFilter {
    /// Builds a filter from a center point and a distance in miles.
    ///
    /// The angular radius is exactly `miles / EARTH_RADIUS_MILES`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidDistanceError`] when `miles` is not a finite
    /// positive number.
    pub fn from_miles(center: GeoPoint, miles: f64) -> Result<Self, InvalidDistanceError> {
        if !miles.is_finite() || miles <= 0.0 {
            return Err(InvalidDistanceError { distance: miles });
        }

        Ok(Self {
            center,
            angular_radius: miles / EARTH_RADIUS_MILES,
        })
    }

    /// Returns `true` when `point` lies within the filter circle.
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        central_angle(self.center, point) <= self.angular_radius
    }
}

/// Central angle in radians between two points on the sphere.
///
/// Uses the spherical law of cosines, clamped into `[-1, 1]` before the
/// `acos` so floating-point drift near identical points cannot produce
/// `NaN`.
#[must_use]
pub fn central_angle(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let cos_angle = lat_a.sin() * lat_b.sin() + lat_a.cos() * lat_b.cos() * delta_lng.cos();

    cos_angle.clamp(-1.0, 1.0).acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOSTON: GeoPoint = GeoPoint::new(-71.0589, 42.3601);
    const PROVIDENCE: GeoPoint = GeoPoint::new(-71.4128, 41.8240);
    const SAN_FRANCISCO: GeoPoint = GeoPoint::new(-122.4194, 37.7749);

    #[test]
    fn angular_radius_is_exact_division() {
        let filter = RadiusFilter::from_miles(BOSTON, 20.0).unwrap();
        assert_eq!(filter.angular_radius, 20.0 / EARTH_RADIUS_MILES);

        let filter = RadiusFilter::from_miles(BOSTON, 0.5).unwrap();
        assert_eq!(filter.angular_radius, 0.5 / EARTH_RADIUS_MILES);
    }

    #[test]
    fn non_positive_distances_are_rejected() {
        assert!(RadiusFilter::from_miles(BOSTON, 0.0).is_err());
        assert!(RadiusFilter::from_miles(BOSTON, -5.0).is_err());
        assert!(RadiusFilter::from_miles(BOSTON, f64::NAN).is_err());
        assert!(RadiusFilter::from_miles(BOSTON, f64::INFINITY).is_err());
    }

    #[test]
    fn containment_matches_great_circle_distance() {
        // Boston -> Providence is roughly 41 miles.
        let angle = central_angle(BOSTON, PROVIDENCE);
        let miles = angle * EARTH_RADIUS_MILES;
        assert!((35.0..50.0).contains(&miles), "got {miles}");

        let tight = RadiusFilter::from_miles(BOSTON, 30.0).unwrap();
        assert!(!tight.contains(PROVIDENCE));

        let wide = RadiusFilter::from_miles(BOSTON, 50.0).unwrap();
        assert!(wide.contains(PROVIDENCE));
    }

    #[test]
    fn containment_boundary_is_inclusive() {
        let angle = central_angle(BOSTON, PROVIDENCE);
        let exact = RadiusFilter {
            center: BOSTON,
            angular_radius: angle,
        };
        assert!(exact.contains(PROVIDENCE));
    }

    #[test]
    fn center_is_always_contained() {
        let filter = RadiusFilter::from_miles(SAN_FRANCISCO, 0.001).unwrap();
        assert!(filter.contains(SAN_FRANCISCO));
    }

    #[test]
    fn far_points_are_excluded() {
        let filter = RadiusFilter::from_miles(BOSTON, 100.0).unwrap();
        assert!(!filter.contains(SAN_FRANCISCO));
    }

    #[test]
    fn central_angle_is_symmetric() {
        let ab = central_angle(BOSTON, SAN_FRANCISCO);
        let ba = central_angle(SAN_FRANCISCO, BOSTON);
        assert!((ab - ba).abs() < 1e-12);
    }

    #[test]
    fn antipodal_angle_is_pi() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(180.0, 0.0);
        assert!((central_angle(a, b) - std::f64::consts::PI).abs() < 1e-9);
    }
}
