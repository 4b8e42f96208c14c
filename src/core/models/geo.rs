//! Geographic primitives
//!
//! GPS points, great-circle distance and the circular approved-origin
//! regions (geofences) that harvest locations are validated against.
//!
//! # Examples
//!
//! ```
//! use herbtrace::core::models::{GeoPoint, haversine_distance};
//!
//! let munnar = GeoPoint::new(10.8505, 76.2711);
//! assert!(haversine_distance(munnar, munnar).abs() < f64::EPSILON);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::LedgerError;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, `-90..=90`
    pub latitude: f64,
    /// Longitude in degrees, `-180..=180`
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point without validation
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Create a point, rejecting non-finite or out-of-range coordinates
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, LedgerError> {
        let point = Self::new(latitude, longitude);
        point.validate()?;
        Ok(point)
    }

    /// Ensure both coordinates are finite and within range
    pub fn validate(&self) -> Result<(), LedgerError> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lng_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(LedgerError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Great-circle distance to another point, in meters
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        haversine_distance(self, other)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Haversine great-circle distance between two points, in meters
#[must_use]
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    // Rounding can push `h` a hair outside [0, 1] for antipodal points
    let h = ((d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// A circular approved-origin region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovedZone {
    /// Display name of the zone
    pub name: String,
    /// Center latitude in degrees
    pub lat: f64,
    /// Center longitude in degrees
    pub lng: f64,
    /// Radius in meters
    pub radius: f64,
}

impl ApprovedZone {
    /// Create a zone from a center and radius in meters
    pub fn new(name: impl Into<String>, lat: f64, lng: f64, radius: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lng,
            radius,
        }
    }

    /// Center of the zone
    #[must_use]
    pub const fn center(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }

    /// Distance from the zone center to a point, in meters
    #[must_use]
    pub fn distance_from_center(&self, point: GeoPoint) -> f64 {
        point.distance_to(self.center())
    }

    /// Whether a point lies inside the zone (boundary inclusive)
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.distance_from_center(point) <= self.radius
    }
}

/// Built-in approved zones used when none are configured
#[must_use]
pub fn default_zones() -> Vec<ApprovedZone> {
    vec![
        ApprovedZone::new("Kerala Approved Zone", 10.8505, 76.2711, 200_000.0),
        ApprovedZone::new("Karnataka Approved Zone", 15.3173, 75.7139, 150_000.0),
    ]
}
