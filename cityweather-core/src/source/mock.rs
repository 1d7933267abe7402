//! In-memory data source for running without network access.

use std::collections::HashMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use super::{FetchError, WeatherSource};
use crate::directory::CityDirectory;
use crate::model::{Coordinates, RawReading};

/// Fixed artificial latency applied to every mock fetch.
const LATENCY: Duration = Duration::from_millis(300);

/// Outside the WMO table, so synthesized readings render as "Unknown".
const SYNTHETIC_CODE: u8 = 255;

/// Canned readings keyed by the coordinate bit pattern of the seeding city.
///
/// Exact bit equality is sound here because lookups always go through the
/// same directory records the table was seeded from.
#[derive(Debug, Default)]
pub struct MockSource {
    readings: HashMap<(u64, u64), RawReading>,
    names: Vec<String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a canned reading for one city. `coords` must be the exact
    /// values the directory resolves for that city.
    pub fn insert(&mut self, city: &str, coords: Coordinates, reading: RawReading) {
        self.readings.insert(key(coords), reading);
        self.names.push(title_case(city));
    }

    /// Seed canned readings for a fixed set of well-known cities, skipping
    /// any the directory does not know.
    pub fn seeded_from(directory: &CityDirectory) -> Self {
        // (city, °C, humidity %, km/h, weather code)
        const CANNED: &[(&str, f64, f64, f64, u8)] = &[
            ("london", 16.0, 72.0, 18.0, 3),
            ("paris", 21.0, 55.0, 12.0, 1),
            ("berlin", 14.0, 60.0, 22.0, 61),
            ("madrid", 28.0, 35.0, 9.0, 0),
            ("zurich", 18.0, 58.0, 11.0, 2),
            ("oslo", 9.0, 80.0, 15.0, 71),
        ];

        let mut source = Self::new();
        for &(city, temperature_c, humidity, wind_speed, weather_code) in CANNED {
            let Some(coords) = directory.resolve(city) else {
                continue;
            };
            source.insert(
                city,
                coords,
                RawReading {
                    temperature_c,
                    wind_speed,
                    weather_code,
                    humidity_pct: Some(humidity),
                    observed_at: None,
                },
            );
        }
        source
    }

    /// Display-formatted (title-cased) names of the seeded cities.
    pub fn city_names(&self) -> &[String] {
        &self.names
    }
}

#[async_trait]
impl WeatherSource for MockSource {
    async fn fetch(&self, coords: Coordinates) -> Result<RawReading, FetchError> {
        // Simulated latency, applied to hits and misses alike.
        tokio::time::sleep(LATENCY).await;

        Ok(self
            .readings
            .get(&key(coords))
            .cloned()
            .unwrap_or_else(synthesize))
    }
}

fn key(coords: Coordinates) -> (u64, u64) {
    (coords.lat.to_bits(), coords.lon.to_bits())
}

fn title_case(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Clock-seeded bounded reading for cities with no canned entry:
/// 10-40 °C, 40-80 % humidity, 5-25 km/h wind.
fn synthesize() -> RawReading {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    RawReading {
        temperature_c: 10.0 + (seed % 31) as f64,
        wind_speed: 5.0 + (seed % 21) as f64,
        weather_code: SYNTHETIC_CODE,
        humidity_pct: Some(40.0 + (seed % 41) as f64),
        observed_at: None,
    }
}
