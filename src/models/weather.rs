//! Weather observation model

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Default temperature substituted for a missing provider field, in °C
pub const DEFAULT_TEMPERATURE: f64 = 25.0;
/// Default wind speed substituted for a missing provider field, in m/s
pub const DEFAULT_WIND_SPEED: f64 = 5.0;
/// Default rain volume substituted for a missing provider field, in mm
pub const DEFAULT_RAIN_VOLUME: f64 = 0.0;

/// Current conditions at a place, always fully populated.
///
/// Missing provider fields never propagate as absence: each one is
/// replaced by its fixed default at construction time. Constructed fresh
/// per request, never cached, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherObservation {
    /// Temperature in °C
    pub temperature: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Rain volume over the last hour in mm
    pub rain_volume_1h: f64,
    /// Resolved coordinates, `(0, 0)` when geocoding failed
    pub location: GeoPoint,
}

impl WeatherObservation {
    /// Observation with every field at its default, used when the
    /// provider call failed entirely.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            wind_speed: DEFAULT_WIND_SPEED,
            rain_volume_1h: DEFAULT_RAIN_VOLUME,
            location: GeoPoint::unresolved(),
        }
    }

    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed)
    }
}
