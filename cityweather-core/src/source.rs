use std::fmt::Debug;

use async_trait::async_trait;

use crate::model::{Coordinates, RawReading};

pub mod mock;
pub mod open_meteo;

pub use mock::MockSource;
pub use open_meteo::OpenMeteoSource;

/// Errors crossing the data-source seam.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("error while performing request")]
    Request(#[from] reqwest::Error),
    #[error("response status unsuccessful, code: {code}, body: {body}")]
    Status {
        code: reqwest::StatusCode,
        body: String,
    },
    #[error("error while parsing response json")]
    Json(#[from] serde_json::Error),
}

/// A swappable source of current weather conditions.
///
/// Selected at construction time by the resolver's owner; the resolver never
/// branches on which implementation it holds.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch(&self, coords: Coordinates) -> Result<RawReading, FetchError>;
}
