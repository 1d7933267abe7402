use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use cityweather_core::{
    CityDirectory, Config, MockSource, OpenMeteoSource, SearchOutcome, SourceId, WeatherResolver,
    WeatherSource,
};

/// City dataset bundled with the binary.
const BUNDLED_DATASET: &str = include_str!("../data/cities.txt");

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name, e.g. "london".
        city: String,

        /// Use the in-memory mock source instead of the live API.
        #[arg(long)]
        mock: bool,

        /// Dataset file overriding the bundled one.
        #[arg(long)]
        dataset: Option<PathBuf>,
    },

    /// List the cities known to the mock source.
    Cities,

    /// Choose the default data source and dataset interactively.
    Configure,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Show { city, mock, dataset } => show(&city, mock, dataset).await,
            Command::Cities => cities(),
            Command::Configure => configure(),
        }
    }
}

fn load_directory(dataset: Option<PathBuf>, config: &Config) -> Result<Arc<CityDirectory>> {
    let directory = CityDirectory::new();

    match dataset.or_else(|| config.dataset_path.clone()) {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
            directory.load(&text);
        }
        None => directory.load(BUNDLED_DATASET),
    }

    tracing::debug!(cities = directory.len(), "city directory loaded");
    Ok(Arc::new(directory))
}

async fn show(city: &str, mock: bool, dataset: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let directory = load_directory(dataset, &config)?;

    let source_id = if mock { SourceId::Mock } else { config.source_id()? };
    let source: Box<dyn WeatherSource> = match source_id {
        SourceId::OpenMeteo => Box::new(OpenMeteoSource::new()),
        SourceId::Mock => Box::new(MockSource::seeded_from(&directory)),
    };

    let mut resolver = WeatherResolver::new(directory, source);

    match resolver.select_city(city).await {
        SearchOutcome::Success(record) => {
            let fahrenheit = resolver.fahrenheit().unwrap_or_default();
            println!("{} {}", record.icon, record.city);
            println!("  condition:   {} ({})", record.condition, resolver.condition_slug());
            println!("  temperature: {:.1} °C / {fahrenheit} °F", record.temperature_c);
            println!("  humidity:    {:.0} %", record.humidity_pct);
            println!("  wind speed:  {:.1} km/h", record.wind_speed);
            if let Some(observed_at) = record.observed_at {
                println!("  observed at: {observed_at}");
            }
        }
        SearchOutcome::InputEmpty => println!("No city given."),
        SearchOutcome::NotFound => println!("City '{city}' is not in the dataset."),
        SearchOutcome::TransportFailure => {
            anyhow::bail!("The weather source could not be reached. Try again later.")
        }
    }

    Ok(())
}

fn cities() -> Result<()> {
    let config = Config::load()?;
    let directory = load_directory(None, &config)?;

    let source = MockSource::seeded_from(&directory);
    for name in source.city_names() {
        println!("{name}");
    }

    Ok(())
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let options: Vec<&str> = SourceId::all().iter().map(SourceId::as_str).collect();
    let picked = inquire::Select::new("Default weather source:", options).prompt()?;
    config.set_source(SourceId::try_from(picked)?);

    let dataset = inquire::Text::new("Dataset path (empty keeps the bundled dataset):").prompt()?;
    config.dataset_path = match dataset.trim() {
        "" => None,
        path => Some(PathBuf::from(path)),
    };

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());

    Ok(())
}
