//! Core library for the `forecast` weather viewer.
//!
//! This crate defines:
//! - Classification of condition text into icon categories
//! - The bounded list of recently viewed cities
//! - Forecast shaping (today's slots, daily outlook, unit conversion)
//! - Abstractions over location and weather providers, with an OpenWeather client
//! - Configuration & credentials handling
//!
//! It is used by `forecast-cli`, but can also be reused by other front ends.

pub mod condition;
pub mod config;
pub mod forecast;
pub mod location;
pub mod model;
pub mod provider;
pub mod recent;
pub mod session;

pub use condition::{IconCategory, classify};
pub use config::Config;
pub use location::{FixedLocation, LocationError, LocationProvider};
pub use model::{
    CitySuggestion, Coordinates, ForecastEntry, TemperatureUnit, WeatherQuery, WeatherRecord,
};
pub use provider::{WeatherProvider, provider_from_config};
pub use recent::RecentResultsBuffer;
pub use session::{TodayReport, WeatherSession};
