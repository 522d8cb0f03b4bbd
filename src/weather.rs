//! Fail-soft OpenWeather client.
//!
//! `fetch` never fails: network errors, non-2xx responses, and missing
//! JSON fields all degrade to the documented default observation. The
//! route and map layers always need a point, so a best-effort advisory
//! lookup substitutes defaults instead of cascading a failure. The cost
//! is that a degraded lookup carries the `(0, 0)` sentinel location,
//! which downstream routing cannot distinguish from a real coordinate.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::WeatherConfig;
use crate::models::WeatherObservation;

/// Client for the OpenWeather current-conditions endpoint
pub struct WeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl WeatherClient {
    /// Create a new client from configuration
    #[must_use]
    pub fn new(config: &WeatherConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(concat!("riskroute/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Fetch current conditions for a free-text place name.
    ///
    /// One outbound GET, no retry. Never fails: any provider problem is
    /// logged at warning level and replaced by default field values, with
    /// the unresolved `(0, 0)` location signaling that geocoding failed.
    pub async fn fetch(&self, place: &str) -> WeatherObservation {
        match self.fetch_inner(place).await {
            Ok(observation) => {
                debug!(
                    "Weather for {}: {} wind {} rain {:.1}mm at {}",
                    place,
                    observation.format_temperature(),
                    observation.format_wind(),
                    observation.rain_volume_1h,
                    observation.location.format_coordinates()
                );
                observation
            }
            Err(e) => {
                warn!("Weather lookup for '{place}' degraded to defaults: {e:#}");
                WeatherObservation::fallback()
            }
        }
    }

    async fn fetch_inner(&self, place: &str) -> Result<WeatherObservation> {
        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            self.base_url,
            urlencoding::encode(place),
            self.api_key.as_deref().unwrap_or_default()
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Weather request for '{place}' failed"))?
            .error_for_status()
            .with_context(|| format!("Weather provider rejected lookup for '{place}'"))?;

        let payload: openweather::CurrentResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenWeather response")?;

        Ok(WeatherObservation::from_openweather(&payload))
    }
}

/// `OpenWeather` API response structures and conversion utilities
mod openweather {
    use serde::Deserialize;

    use crate::models::weather::{DEFAULT_RAIN_VOLUME, DEFAULT_TEMPERATURE, DEFAULT_WIND_SPEED};
    use crate::models::{GeoPoint, WeatherObservation};

    /// Current conditions response from `OpenWeather`. Every field the
    /// pipeline consumes is optional on the wire.
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub main: Option<Main>,
        pub wind: Option<Wind>,
        pub rain: Option<Rain>,
        pub coord: Option<Coord>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Main {
        pub temp: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Wind {
        pub speed: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Rain {
        #[serde(rename = "1h")]
        pub one_hour: Option<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Coord {
        pub lat: Option<f64>,
        pub lon: Option<f64>,
    }

    impl WeatherObservation {
        /// Build an observation from an `OpenWeather` payload, replacing
        /// each missing field by its fixed default.
        #[must_use]
        pub fn from_openweather(response: &CurrentResponse) -> Self {
            let temperature = response
                .main
                .as_ref()
                .and_then(|main| main.temp)
                .unwrap_or(DEFAULT_TEMPERATURE);

            let wind_speed = response
                .wind
                .as_ref()
                .and_then(|wind| wind.speed)
                .unwrap_or(DEFAULT_WIND_SPEED);

            let rain_volume_1h = response
                .rain
                .as_ref()
                .and_then(|rain| rain.one_hour)
                .unwrap_or(DEFAULT_RAIN_VOLUME);

            let location = response
                .coord
                .as_ref()
                .and_then(|coord| Some(GeoPoint::new(coord.lat?, coord.lon?)))
                .unwrap_or_else(GeoPoint::unresolved);

            Self {
                temperature,
                wind_speed,
                rain_volume_1h,
                location,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::openweather::CurrentResponse;
    use crate::models::{GeoPoint, WeatherObservation};

    fn observe(json: &str) -> WeatherObservation {
        let payload: CurrentResponse = serde_json::from_str(json).unwrap();
        WeatherObservation::from_openweather(&payload)
    }

    #[test]
    fn test_full_payload() {
        let obs = observe(
            r#"{
                "coord": {"lon": 2.3488, "lat": 48.8534},
                "main": {"temp": 18.3},
                "wind": {"speed": 7.2},
                "rain": {"1h": 0.5}
            }"#,
        );
        assert_eq!(obs.temperature, 18.3);
        assert_eq!(obs.wind_speed, 7.2);
        assert_eq!(obs.rain_volume_1h, 0.5);
        assert_eq!(obs.location, GeoPoint::new(48.8534, 2.3488));
    }

    // Every subset of missing provider fields degrades per-field, never
    // propagating absence downstream.
    #[rstest]
    #[case::empty_object("{}")]
    #[case::missing_main(r#"{"wind": {"speed": 7.2}, "coord": {"lat": 1.0, "lon": 2.0}}"#)]
    #[case::missing_wind(r#"{"main": {"temp": 18.3}, "coord": {"lat": 1.0, "lon": 2.0}}"#)]
    #[case::missing_coord(r#"{"main": {"temp": 18.3}, "wind": {"speed": 7.2}}"#)]
    #[case::empty_nested(r#"{"main": {}, "wind": {}, "rain": {}, "coord": {}}"#)]
    fn test_partial_payloads_use_defaults(#[case] json: &str) {
        let obs = observe(json);

        if !json.contains("temp") {
            assert_eq!(obs.temperature, 25.0);
        }
        if !json.contains("speed") {
            assert_eq!(obs.wind_speed, 5.0);
        }
        if !json.contains("1h") {
            assert_eq!(obs.rain_volume_1h, 0.0);
        }
        if !json.contains("lat\": 1.0") {
            assert!(obs.location.is_unresolved());
        }
    }

    #[test]
    fn test_rain_defaults_to_zero_when_section_absent() {
        let obs = observe(
            r#"{
                "coord": {"lon": 2.0, "lat": 1.0},
                "main": {"temp": 30.0},
                "wind": {"speed": 3.0}
            }"#,
        );
        assert_eq!(obs.rain_volume_1h, 0.0);
        assert_eq!(obs.temperature, 30.0);
    }

    #[test]
    fn test_partial_coord_is_unresolved() {
        let obs = observe(r#"{"coord": {"lat": 48.85}}"#);
        assert!(obs.location.is_unresolved());
    }
}
