//! Geographic point model

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// `(0.0, 0.0)` is the sentinel for "no location resolved" — the weather
/// client falls back to it when the provider returns no coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The sentinel point used when geocoding resolved nothing
    #[must_use]
    pub fn unresolved() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Whether this point is the unresolved sentinel
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }

    /// Build a point from a provider `[longitude, latitude]` pair.
    ///
    /// GeoJSON orders coordinates (lon, lat); everything downstream of the
    /// route client works in (lat, lon), so the swap happens here.
    #[must_use]
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    /// Format as a "lat, lon" coordinate string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
