use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, Coordinates, FixedLocation, TemperatureUnit, WeatherSession, provider_from_config,
};
use inquire::{Password, PasswordDisplayMode, Select};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Weather forecast viewer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and preferred units.
    Configure,

    /// Current conditions, today's hourly forecast and the daily outlook.
    Today {
        /// Latitude; defaults to the configured home location.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; defaults to the configured home location.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Look up a city by name instead of coordinates.
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        city: Option<String>,

        /// Show temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },

    /// City cards: the default cities followed by the given searches.
    Cities {
        /// Cities to search for, in order.
        cities: Vec<String>,

        /// Show temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },

    /// Suggest city names matching a partial query.
    Suggest {
        query: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Today { lat, lon, city, fahrenheit } => {
                let config = Config::load()?;
                let units = units_for(&config, fahrenheit);
                let session = WeatherSession::new(provider_from_config(&config)?);
                let today = Utc::now().date_naive();

                let report = match city {
                    Some(city) => {
                        // City names are resolved to coordinates through the search endpoint.
                        let found = session.provider().find_cities(&city).await?;
                        let first = found
                            .first()
                            .with_context(|| format!("No city found matching '{city}'"))?;
                        debug!(city = %first.label(), "resolved city");
                        session.today(first.coordinates, today).await?
                    }
                    None => {
                        let explicit = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
                        let location = FixedLocation::new(explicit.or(config.home));
                        session.locate_and_report(&location, today).await?
                    }
                };

                print!("{}", render::today(&report, units));
            }
            Command::Cities { cities, fahrenheit } => {
                let config = Config::load()?;
                let units = units_for(&config, fahrenheit);
                let mut session = WeatherSession::new(provider_from_config(&config)?);

                session.seed(&config.default_cities).await?;

                for city in &cities {
                    match session.search(city).await {
                        Ok((record, false)) => {
                            println!("{} is already on the list.", record.location_name)
                        }
                        Ok(_) => {}
                        Err(e) => eprintln!("Error fetching weather data: {e:#}"),
                    }
                }

                print!("{}", render::cards(&session.recent(), units));
            }
            Command::Suggest { query } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let suggestions = provider.find_cities(&query).await?;

                if suggestions.is_empty() {
                    println!("No matching cities.");
                }
                for s in suggestions {
                    println!("{}  ({})", s.label(), s.coordinates);
                }
            }
        }

        Ok(())
    }
}

fn units_for(config: &Config, fahrenheit: bool) -> TemperatureUnit {
    if fahrenheit { TemperatureUnit::Fahrenheit } else { config.units }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let units = Select::new("Temperature units:", TemperatureUnit::all().to_vec())
        .prompt()
        .context("Failed to read temperature units")?;
    config.units = units;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
