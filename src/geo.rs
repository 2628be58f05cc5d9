//! Geographic coordinates and great-circle distance
//!
//! [`haversine_distance`] is the straight-line distance over the Earth's
//! surface and can serve as an A* estimator for graphs keyed by
//! [`Coordinate`] (or by anything that carries one). It is rounded to the
//! nearest 0.1 km, so it may exceed the exact great-circle distance by up to
//! 0.05 km. It stays admissible only while every path between two stations is
//! at least that much longer than the great-circle distance; otherwise A* may
//! return a path slightly longer than the shortest.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Mean Earth radius in kilometres
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in degrees
///
/// Equality, hashing and ordering work on the exact bit patterns of both
/// fields, so coordinates can be used as hash table and graph keys.
#[derive(Clone, Copy, Debug)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Coordinate {
            latitude,
            longitude,
        }
    }

    /// Distance to `other` in kilometres; see [`haversine_distance`]
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self, other)
    }
}

/// Great-circle distance between two coordinates in kilometres, rounded to
/// one decimal (hectometres)
///
/// # Example
///
/// ```rust
/// use rust_classic_collections::geo::{haversine_distance, Coordinate};
///
/// let utrecht = Coordinate::new(52.0894, 5.1100);
/// assert_eq!(haversine_distance(&utrecht, &utrecht), 0.0);
/// ```
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();
    let c = 2.0 * a.sqrt().asin();
    (EARTH_RADIUS_KM * c * 10.0).round() / 10.0
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Latitude first, then longitude
impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.latitude
            .total_cmp(&other.latitude)
            .then_with(|| self.longitude.total_cmp(&other.longitude))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}:{:?})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_distance() {
        // Amsterdam Centraal to Utrecht Centraal
        let amsterdam = Coordinate::new(52.3789, 4.9004);
        let utrecht = Coordinate::new(52.0894, 5.1100);
        let distance = haversine_distance(&amsterdam, &utrecht);
        assert!((34.0..36.0).contains(&distance), "got {distance}");
        assert_eq!(distance, haversine_distance(&utrecht, &amsterdam));
    }

    #[test]
    fn test_rounded_to_hectometres() {
        let a = Coordinate::new(52.0, 5.0);
        let b = Coordinate::new(52.0, 5.01);
        let distance = a.distance_to(&b);
        assert_eq!(distance, (distance * 10.0).round() / 10.0);
    }

    #[test]
    fn test_rounding_stays_within_half_a_hectometre() {
        let origin = Coordinate::new(52.0, 5.0);
        for step in 1..50 {
            let other = Coordinate::new(52.0, 5.0 + f64::from(step) * 0.0013);
            // same latitude: only the longitude term of the haversine remains
            let half = (other.longitude - origin.longitude).to_radians() / 2.0;
            let latitude = origin.latitude.to_radians();
            let exact = 2.0 * EARTH_RADIUS_KM * (half.sin() * latitude.cos()).asin();
            let rounded = haversine_distance(&origin, &other);
            assert!((rounded - exact).abs() <= 0.05 + 1e-9, "{rounded} vs {exact}");
        }
    }

    #[test]
    fn test_equality_and_order() {
        let a = Coordinate::new(1.0, 2.0);
        assert_eq!(a, Coordinate::new(1.0, 2.0));
        assert!(a < Coordinate::new(1.0, 3.0));
        assert!(a > Coordinate::new(0.5, 9.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinate::new(52.0, 4.5).to_string(), "(52.0:4.5)");
    }
}
