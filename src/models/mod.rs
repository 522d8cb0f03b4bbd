//! Core value types shared across the pipeline

pub mod geo;
pub mod route;
pub mod weather;

pub use geo::GeoPoint;
pub use route::{ManeuverType, RouteStep, RouteSummary};
pub use weather::WeatherObservation;
