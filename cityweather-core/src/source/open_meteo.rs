//! Live data source backed by the Open-Meteo forecast API.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;

use super::{FetchError, WeatherSource};
use crate::model::{Coordinates, RawReading};

const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Clone, Default)]
pub struct OpenMeteoSource {
    http: Client,
}

impl OpenMeteoSource {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }

    pub fn with_client(http: Client) -> Self {
        Self { http }
    }
}

#[derive(Debug, Deserialize)]
struct OmResponse {
    current_weather: OmCurrentWeather,
}

#[derive(Debug, Deserialize)]
struct OmCurrentWeather {
    temperature: f64,
    windspeed: f64,
    weathercode: u8,
    time: Option<String>,
}

#[async_trait]
impl WeatherSource for OpenMeteoSource {
    async fn fetch(&self, coords: Coordinates) -> Result<RawReading, FetchError> {
        tracing::trace!(lat = coords.lat, lon = coords.lon, "GET {FORECAST_URL}");

        let res = self
            .http
            .get(FORECAST_URL)
            .query(&[
                ("latitude", coords.lat.to_string()),
                ("longitude", coords.lon.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                code: status,
                body: truncate_body(&body),
            });
        }

        let parsed: OmResponse = serde_json::from_str(&body)?;
        let current = parsed.current_weather;

        // ISO8601 without seconds or timezone, e.g. 2024-06-01T14:30.
        let observed_at = current
            .time
            .as_deref()
            .and_then(|t| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M").ok());

        Ok(RawReading {
            temperature_c: current.temperature,
            wind_speed: current.windspeed,
            weather_code: current.weathercode,
            humidity_pct: None,
            observed_at,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
