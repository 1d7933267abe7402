use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the city dataset. The `city` field is lowercased and trimmed
/// at parse time; it is the lookup key.
#[derive(Debug, Clone)]
pub struct CityRecord {
    pub id: String,
    pub country: String,
    pub city: String,
    pub lat: f64,
    pub lon: f64,
    pub altitude: f64,
}

/// Geographic position of a resolved city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Rows with unparseable numerics carry NaN; such coordinates must be
    /// treated as absent.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// Current-conditions reading as delivered by a data source, before
/// normalization.
#[derive(Debug, Clone)]
pub struct RawReading {
    pub temperature_c: f64,
    pub wind_speed: f64,
    pub weather_code: u8,
    /// Not every source reports humidity; the live Open-Meteo
    /// `current_weather` payload does not.
    pub humidity_pct: Option<f64>,
    pub observed_at: Option<NaiveDateTime>,
}

/// Normalized current-conditions result for one city.
///
/// `condition` is never empty: unmapped weather codes resolve to "Unknown".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// The city name as originally typed by the caller (trimmed, not
    /// normalized).
    pub city: String,
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: f64,
    pub wind_speed: f64,
    pub icon: String,
    pub observed_at: Option<NaiveDateTime>,
}
