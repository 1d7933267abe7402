//! Core library for the `cityweather` lookup tool.
//!
//! This crate defines:
//! - The city directory (dataset parsing and coordinate lookup)
//! - Abstraction over weather data sources (live Open-Meteo, in-memory mock)
//! - The weather resolver and its published record
//! - Configuration handling
//!
//! It is used by `cityweather-cli`, but can also be reused by other front
//! ends or services.

pub mod codes;
pub mod config;
pub mod directory;
pub mod model;
pub mod resolver;
pub mod source;

pub use codes::{Condition, condition_for, slugify};
pub use config::{Config, SourceId};
pub use directory::CityDirectory;
pub use model::{CityRecord, Coordinates, RawReading, WeatherRecord};
pub use resolver::{SearchOutcome, WeatherResolver, fahrenheit};
pub use source::{FetchError, MockSource, OpenMeteoSource, WeatherSource};
