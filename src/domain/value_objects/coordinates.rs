use serde::{Deserialize, Serialize};
use std::fmt;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Latitude(f64);

impl Latitude {
    pub fn new(value: f64) -> Result<Self, String> {
        if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
            return Err(format!("Latitude must be within [-90, 90], got {}", value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Longitude(f64);

impl Longitude {
    pub fn new(value: f64) -> Result<Self, String> {
        if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
            return Err(format!("Longitude must be within [-180, 180], got {}", value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

/// A validated geographic position. Both components are range-checked at
/// construction, so distance math never sees out-of-range input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: Latitude,
    longitude: Longitude,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        Ok(Self {
            latitude: Latitude::new(latitude)?,
            longitude: Longitude::new(longitude)?,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude.value()
    }

    pub fn longitude(&self) -> f64 {
        self.longitude.value()
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn distance_meters(&self, other: &Coordinates) -> f64 {
        let phi1 = self.latitude().to_radians();
        let phi2 = other.latitude().to_radians();
        let delta_phi = (other.latitude() - self.latitude()).to_radians();
        let delta_lambda = (other.longitude() - self.longitude()).to_radians();

        let a = (delta_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_METERS * c
    }

    pub fn within_radius(&self, other: &Coordinates, radius_meters: f64) -> bool {
        self.distance_meters(other) <= radius_meters
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude(), self.longitude())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_range() {
        assert!(Latitude::new(-90.0).is_ok());
        assert!(Latitude::new(90.0).is_ok());
        assert!(Latitude::new(90.01).is_err());
        assert!(Latitude::new(f64::NAN).is_err());
    }

    #[test]
    fn test_longitude_range() {
        assert!(Longitude::new(-180.0).is_ok());
        assert!(Longitude::new(180.0).is_ok());
        assert!(Longitude::new(-180.5).is_err());
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let a = Coordinates::new(-21.547429, -45.439200).unwrap();
        assert_eq!(a.distance_meters(&a), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinates::new(-21.547429, -45.439200).unwrap();
        let b = Coordinates::new(-21.538429, -45.439200).unwrap();
        assert_eq!(a.distance_meters(&b), b.distance_meters(&a));
    }

    #[test]
    fn test_latitude_degree_offset_distance() {
        // 0.009 degrees of latitude is close to 1 km on the ground.
        let a = Coordinates::new(-21.547429, -45.439200).unwrap();
        let b = Coordinates::new(-21.547429 + 0.009, -45.439200).unwrap();
        let d = a.distance_meters(&b);
        assert!((d - 1000.0).abs() < 10.0, "expected ~1000m, got {}", d);
    }

    #[test]
    fn test_within_radius_matches_distance() {
        let a = Coordinates::new(10.0, 10.0).unwrap();
        let b = Coordinates::new(10.001, 10.0).unwrap();
        let d = a.distance_meters(&b);
        assert!(a.within_radius(&b, d));
        assert!(a.within_radius(&b, d + 0.001));
        assert!(!a.within_radius(&b, d - 0.001));
    }
}
