//! The weather resolver: orchestrates one end-to-end "search weather for
//! city X" operation against the directory and a data source, and owns the
//! published record.

use std::sync::Arc;

use crate::codes;
use crate::directory::CityDirectory;
use crate::model::{RawReading, WeatherRecord};
use crate::source::WeatherSource;

/// Terminal outcome of one search invocation.
#[derive(Debug)]
pub enum SearchOutcome {
    /// A record was produced and published.
    Success(WeatherRecord),
    /// Input was empty after trimming; nothing happened.
    InputEmpty,
    /// The city did not resolve to finite coordinates.
    NotFound,
    /// The data source failed; previously published data is untouched.
    TransportFailure,
}

/// Per-search state machine: Idle → Loading → Success | NotFound |
/// TransportFailure. The busy indicator is cleared on every exit path.
///
/// `search` takes `&mut self`, so searches on one resolver are serialized
/// by construction; a stale in-flight response can never overwrite a newer
/// result.
#[derive(Debug)]
pub struct WeatherResolver {
    directory: Arc<CityDirectory>,
    source: Box<dyn WeatherSource>,
    city_name: String,
    busy: bool,
    record: Option<WeatherRecord>,
}

impl WeatherResolver {
    pub fn new(directory: Arc<CityDirectory>, source: Box<dyn WeatherSource>) -> Self {
        Self {
            directory,
            source,
            city_name: String::new(),
            busy: false,
            record: None,
        }
    }

    /// True only while a fetch is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Last published record, if any search has succeeded. A transport
    /// failure does not clear it: latest-success-wins display semantics.
    pub fn record(&self) -> Option<&WeatherRecord> {
        self.record.as_ref()
    }

    pub fn city_name(&self) -> &str {
        &self.city_name
    }

    pub fn set_city_name(&mut self, text: &str) {
        self.city_name = text.to_string();
    }

    /// Set the city name, then search for it.
    pub async fn select_city(&mut self, city_name: &str) -> SearchOutcome {
        self.set_city_name(city_name);
        let name = self.city_name.clone();
        self.search(&name).await
    }

    /// One search invocation for `city_name`.
    ///
    /// The published record displays the originally typed (trimmed) name;
    /// normalization is internal to resolution. Humidity defaults to 0 when
    /// the source supplies none.
    pub async fn search(&mut self, city_name: &str) -> SearchOutcome {
        let typed = city_name.trim();
        if typed.is_empty() {
            return SearchOutcome::InputEmpty;
        }

        let Some(coords) = self.directory.resolve(typed).filter(|c| c.is_finite()) else {
            return SearchOutcome::NotFound;
        };

        self.busy = true;
        let fetched = self.source.fetch(coords).await;
        self.busy = false;

        match fetched {
            Ok(reading) => {
                let record = normalize(typed, reading);
                self.record = Some(record.clone());
                SearchOutcome::Success(record)
            }
            Err(err) => {
                tracing::warn!(city = typed, error = %err, "weather fetch failed");
                SearchOutcome::TransportFailure
            }
        }
    }

    /// Rounded Fahrenheit projection of the published temperature,
    /// recomputed on read.
    pub fn fahrenheit(&self) -> Option<i32> {
        self.record.as_ref().map(|r| fahrenheit(r.temperature_c))
    }

    /// CSS-class-safe slug of the published condition; empty without a
    /// record.
    pub fn condition_slug(&self) -> String {
        self.record
            .as_ref()
            .map(|r| codes::slugify(&r.condition))
            .unwrap_or_default()
    }
}

/// round(C × 9/5 + 32)
pub fn fahrenheit(celsius: f64) -> i32 {
    (celsius * 9.0 / 5.0 + 32.0).round() as i32
}

fn normalize(typed_city: &str, reading: RawReading) -> WeatherRecord {
    let condition = codes::condition_for(reading.weather_code);

    WeatherRecord {
        city: typed_city.to_string(),
        temperature_c: reading.temperature_c,
        condition: condition.label.to_string(),
        humidity_pct: reading.humidity_pct.unwrap_or(0.0),
        wind_speed: reading.wind_speed,
        icon: condition.icon.to_string(),
        observed_at: reading.observed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;
    use crate::source::FetchError;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct ScriptedSource(RawReading);

    #[async_trait]
    impl WeatherSource for ScriptedSource {
        async fn fetch(&self, _coords: Coordinates) -> Result<RawReading, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct FailingSource;

    #[async_trait]
    impl WeatherSource for FailingSource {
        async fn fetch(&self, _coords: Coordinates) -> Result<RawReading, FetchError> {
            let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
            Err(FetchError::Json(err))
        }
    }

    fn london_directory() -> Arc<CityDirectory> {
        let directory = CityDirectory::new();
        directory.load("id;country;city;lat;lon;altitude\n1;UK;london;51.5;-0.12;35\n");
        Arc::new(directory)
    }

    fn reading(temperature_c: f64, wind_speed: f64, weather_code: u8) -> RawReading {
        RawReading {
            temperature_c,
            wind_speed,
            weather_code,
            humidity_pct: None,
            observed_at: None,
        }
    }

    #[test]
    fn fahrenheit_is_rounded() {
        assert_eq!(fahrenheit(15.0), 59);
        assert_eq!(fahrenheit(0.0), 32);
        assert_eq!(fahrenheit(100.0), 212);
        assert_eq!(fahrenheit(-40.0), -40);
        assert_eq!(fahrenheit(15.3), 60);
    }

    #[tokio::test]
    async fn london_end_to_end() {
        let mut resolver = WeatherResolver::new(
            london_directory(),
            Box::new(ScriptedSource(reading(15.0, 20.0, 3))),
        );

        let outcome = resolver.search("London").await;
        let SearchOutcome::Success(record) = outcome else {
            panic!("expected success, got {outcome:?}");
        };

        assert_eq!(record.city, "London");
        assert_eq!(record.temperature_c, 15.0);
        assert_eq!(record.condition, "Cloudy");
        assert_eq!(record.wind_speed, 20.0);
        assert_eq!(record.humidity_pct, 0.0);

        assert!(!resolver.is_busy());
        assert_eq!(resolver.fahrenheit(), Some(59));
        assert_eq!(resolver.condition_slug(), "cloudy");
    }

    #[tokio::test]
    async fn empty_input_is_a_no_op() {
        let mut resolver = WeatherResolver::new(
            london_directory(),
            Box::new(ScriptedSource(reading(15.0, 20.0, 3))),
        );

        assert!(matches!(resolver.search("").await, SearchOutcome::InputEmpty));
        assert!(matches!(resolver.search("   ").await, SearchOutcome::InputEmpty));
        assert!(!resolver.is_busy());
        assert!(resolver.record().is_none());
        assert_eq!(resolver.fahrenheit(), None);
        assert_eq!(resolver.condition_slug(), "");
    }

    #[tokio::test]
    async fn unresolvable_city_terminates_in_not_found() {
        let mut resolver = WeatherResolver::new(
            london_directory(),
            Box::new(ScriptedSource(reading(15.0, 20.0, 3))),
        );

        assert!(matches!(resolver.search("Nowhere").await, SearchOutcome::NotFound));
        assert!(!resolver.is_busy());
        assert!(resolver.record().is_none());
    }

    #[tokio::test]
    async fn non_finite_coordinates_terminate_in_not_found() {
        let directory = CityDirectory::new();
        directory.load("id;country;city;lat;lon;altitude\n1;XX;nanville;north;9.9;0\n");

        let mut resolver = WeatherResolver::new(
            Arc::new(directory),
            Box::new(ScriptedSource(reading(15.0, 20.0, 3))),
        );

        assert!(matches!(resolver.search("Nanville").await, SearchOutcome::NotFound));
        assert!(resolver.record().is_none());
    }

    #[tokio::test]
    async fn transport_failure_keeps_prior_record() {
        let directory = london_directory();

        let mut resolver = WeatherResolver::new(
            Arc::clone(&directory),
            Box::new(ScriptedSource(reading(15.0, 20.0, 3))),
        );
        assert!(matches!(resolver.search("London").await, SearchOutcome::Success(_)));

        // Swap in a failing source behind the same published state.
        resolver.source = Box::new(FailingSource);

        assert!(matches!(resolver.search("London").await, SearchOutcome::TransportFailure));
        assert!(!resolver.is_busy());

        let record = resolver.record().expect("prior record must survive");
        assert_eq!(record.condition, "Cloudy");
        assert_eq!(resolver.fahrenheit(), Some(59));
    }

    #[tokio::test]
    async fn transport_failure_without_prior_record_publishes_nothing() {
        let mut resolver = WeatherResolver::new(london_directory(), Box::new(FailingSource));

        assert!(matches!(resolver.search("London").await, SearchOutcome::TransportFailure));
        assert!(!resolver.is_busy());
        assert!(resolver.record().is_none());
    }

    #[tokio::test]
    async fn typed_name_is_displayed_not_the_normalized_key() {
        let mut resolver = WeatherResolver::new(
            london_directory(),
            Box::new(ScriptedSource(reading(8.0, 5.0, 0))),
        );

        let SearchOutcome::Success(record) = resolver.search("  LoNdOn  ").await else {
            panic!("expected success");
        };
        assert_eq!(record.city, "LoNdOn");
    }

    #[tokio::test]
    async fn select_city_sets_name_then_searches() {
        let mut resolver = WeatherResolver::new(
            london_directory(),
            Box::new(ScriptedSource(reading(15.0, 20.0, 2))),
        );

        let outcome = resolver.select_city("London").await;
        assert!(matches!(outcome, SearchOutcome::Success(_)));
        assert_eq!(resolver.city_name(), "London");
        assert_eq!(resolver.condition_slug(), "partly-cloudy");
    }

    #[tokio::test]
    async fn unmapped_code_yields_unknown_condition() {
        let mut resolver = WeatherResolver::new(
            london_directory(),
            Box::new(ScriptedSource(reading(22.0, 7.0, 42))),
        );

        let SearchOutcome::Success(record) = resolver.search("London").await else {
            panic!("expected success");
        };
        assert_eq!(record.condition, "Unknown");
        assert!(!record.condition.is_empty());
        assert_eq!(resolver.condition_slug(), "unknown");
    }
}
