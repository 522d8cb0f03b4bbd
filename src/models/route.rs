//! Normalized route representation

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// Driving maneuver for a turn-by-turn step, decoded from the provider's
/// numeric instruction type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ManeuverType {
    TurnLeft,
    TurnRight,
    SharpLeft,
    SharpRight,
    SlightLeft,
    SlightRight,
    Straight,
    EnterRoundabout,
    ExitRoundabout,
    UTurn,
    Arrive,
    Depart,
    KeepLeft,
    KeepRight,
    Other,
}

impl ManeuverType {
    /// Decode an openrouteservice instruction type code
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::TurnLeft,
            1 => Self::TurnRight,
            2 => Self::SharpLeft,
            3 => Self::SharpRight,
            4 => Self::SlightLeft,
            5 => Self::SlightRight,
            6 => Self::Straight,
            7 => Self::EnterRoundabout,
            8 => Self::ExitRoundabout,
            9 => Self::UTurn,
            10 => Self::Arrive,
            11 => Self::Depart,
            12 => Self::KeepLeft,
            13 => Self::KeepRight,
            _ => Self::Other,
        }
    }
}

/// One turn-by-turn instruction, in provider order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteStep {
    /// Human-readable instruction text
    pub instruction: String,
    /// Step length in meters
    pub distance_meters: f64,
    /// Step duration in seconds
    pub duration_seconds: f64,
    /// Maneuver, absent when the provider omits the type code
    pub maneuver_type: Option<ManeuverType>,
}

/// Normalized summary of a provider-computed driving route.
///
/// Steps preserve provider order (start to destination); an empty step
/// list is valid and means no turn-by-turn data was returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSummary {
    /// Total distance in kilometers, rounded to 2 decimals
    pub distance_km: f64,
    /// Total duration in minutes, rounded to 2 decimals
    pub duration_minutes: f64,
    /// Turn-by-turn steps, possibly empty
    pub steps: Vec<RouteStep>,
    /// Route geometry as (lat, lon) points, ready for a map layer
    pub polyline: Vec<GeoPoint>,
}
