//! One viewing session: a provider plus the recent-cities cards built from it.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use tracing::info;

use crate::{
    forecast,
    location::LocationProvider,
    model::{Coordinates, ForecastEntry, WeatherQuery, WeatherRecord},
    provider::WeatherProvider,
    recent::RecentResultsBuffer,
};

/// Everything shown on the "today" screen for one location.
#[derive(Debug, Clone)]
pub struct TodayReport {
    pub current: WeatherRecord,
    /// Forecast slots on the requested day.
    pub hourly: Vec<ForecastEntry>,
    /// One slot per upcoming day.
    pub daily: Vec<ForecastEntry>,
}

#[derive(Debug)]
pub struct WeatherSession {
    provider: Box<dyn WeatherProvider>,
    recent: RecentResultsBuffer,
}

impl WeatherSession {
    pub fn new(provider: Box<dyn WeatherProvider>) -> Self {
        Self {
            provider,
            recent: RecentResultsBuffer::new(),
        }
    }

    pub fn provider(&self) -> &dyn WeatherProvider {
        self.provider.as_ref()
    }

    /// Replace the recent cards with the given default cities.
    ///
    /// All lookups must succeed; on any failure the existing cards are kept
    /// and the error is returned.
    pub async fn seed(&mut self, cities: &[String]) -> Result<()> {
        let mut records = Vec::with_capacity(cities.len());
        for city in cities {
            let record = self
                .provider
                .current(&WeatherQuery::City(city.clone()))
                .await
                .with_context(|| format!("Failed to fetch default city '{city}'"))?;
            records.push(record);
        }

        info!(count = records.len(), "seeding recent results");
        self.recent.reset();
        for record in records {
            self.recent.insert(record);
        }

        Ok(())
    }

    /// Look up a city and add it to the recent cards.
    ///
    /// Returns the fetched record and whether it produced a new card.
    pub async fn search(&mut self, city: &str) -> Result<(WeatherRecord, bool)> {
        let city = city.trim();
        if city.is_empty() {
            bail!("City name must not be empty");
        }

        let record = self
            .provider
            .current(&WeatherQuery::City(city.to_string()))
            .await
            .with_context(|| format!("Failed to fetch weather for '{city}'"))?;

        let inserted = self.recent.insert(record.clone());
        Ok((record, inserted))
    }

    /// Recent cards, newest first.
    pub fn recent(&self) -> Vec<WeatherRecord> {
        self.recent.snapshot_most_recent_first()
    }

    pub async fn today(&self, coords: Coordinates, date: NaiveDate) -> Result<TodayReport> {
        let query = WeatherQuery::Coordinates(coords);
        let current = self.provider.current(&query).await?;
        let entries = self.provider.forecast(&query).await?;

        Ok(TodayReport {
            current,
            hourly: forecast::hourly_for_date(&entries, date),
            daily: forecast::daily_outlook(&entries),
        })
    }

    /// Resolve the device position, then build its [`TodayReport`].
    pub async fn locate_and_report(
        &self,
        location: &dyn LocationProvider,
        date: NaiveDate,
    ) -> Result<TodayReport> {
        let coords = location
            .current_location()
            .await
            .map_err(|e| anyhow::anyhow!("{e}.\nHint: {}", e.hint()))?;

        self.today(coords, date).await
    }
}
