use crate::{
    Config,
    model::{CitySuggestion, ForecastEntry, WeatherQuery, WeatherRecord},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of weather data. The core only consumes what comes back; transport
/// failures are reported as errors and surfaced by the caller.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for a city or coordinate pair.
    async fn current(&self, query: &WeatherQuery) -> anyhow::Result<WeatherRecord>;

    /// Multi-day forecast as a flat feed of 3-hour slots.
    async fn forecast(&self, query: &WeatherQuery) -> anyhow::Result<Vec<ForecastEntry>>;

    /// Cities whose name matches `query`. A blank query yields no suggestions.
    async fn find_cities(&self, query: &str) -> anyhow::Result<Vec<CitySuggestion>>;
}

/// Construct the OpenWeather provider from the configured API key.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned())))
}
