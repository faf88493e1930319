use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic point as reported by a location provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What to look up: a free-text city name or a coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City(String),
    Coordinates(Coordinates),
}

impl std::fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherQuery::City(name) => f.write_str(name),
            WeatherQuery::Coordinates(coords) => write!(f, "({coords})"),
        }
    }
}

/// Result of one successful current-weather lookup.
///
/// `location_name` is the identity of a record: two records describe the same
/// place when their names match case-insensitively. Everything past
/// `temperature_celsius` is carried through for display only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location_name: String,
    pub condition_text: Option<String>,
    pub temperature_celsius: Option<f64>,

    pub country: Option<String>,
    pub feels_like_celsius: Option<f64>,
    pub humidity_pct: Option<u8>,
    pub pressure_hpa: Option<f64>,
    pub wind_speed_mps: Option<f64>,
    pub visibility_m: Option<u32>,
    pub precipitation_1h_mm: Option<f64>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherRecord {
    /// Minimal record, mostly useful for seeding and tests.
    pub fn new(location_name: impl Into<String>) -> Self {
        Self {
            location_name: location_name.into(),
            ..Self::default()
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition_text = Some(condition.into());
        self
    }

    pub fn with_temperature(mut self, celsius: f64) -> Self {
        self.temperature_celsius = Some(celsius);
        self
    }

    pub fn same_location(&self, other: &WeatherRecord) -> bool {
        self.is_named(&other.location_name)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.location_name.to_lowercase() == name.to_lowercase()
    }
}

/// One slot of the provider's 3-hour forecast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    pub time: DateTime<Utc>,
    pub temperature_celsius: Option<f64>,
    pub condition_text: Option<String>,
}

/// A city returned by a free-text search, used for autocomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitySuggestion {
    pub id: u64,
    pub name: String,
    pub country: Option<String>,
    pub coordinates: Coordinates,
}

impl CitySuggestion {
    pub fn label(&self) -> String {
        match &self.country {
            Some(country) => format!("{}, {}", self.name, country),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }

    /// Render a Celsius reading in this unit. Missing readings print as `N/A`.
    pub fn format(&self, celsius: Option<f64>) -> String {
        let Some(celsius) = celsius else {
            return "N/A".to_string();
        };

        match self {
            TemperatureUnit::Celsius => format!("{celsius}°C"),
            TemperatureUnit::Fahrenheit => {
                format!("{:.1}°F", crate::forecast::celsius_to_fahrenheit(celsius))
            }
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "celsius" | "c" | "metric" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" | "imperial" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_location_ignores_case() {
        let a = WeatherRecord::new("Paris");
        let b = WeatherRecord::new("PARIS");
        let c = WeatherRecord::new("Parish");

        assert!(a.same_location(&b));
        assert!(!a.same_location(&c));
    }

    #[test]
    fn suggestion_label_includes_country_when_known() {
        let mut s = CitySuggestion {
            id: 1,
            name: "Chennai".into(),
            country: Some("IN".into()),
            coordinates: Coordinates::new(13.08, 80.27),
        };
        assert_eq!(s.label(), "Chennai, IN");

        s.country = None;
        assert_eq!(s.label(), "Chennai");
    }

    #[test]
    fn temperature_formatting() {
        assert_eq!(TemperatureUnit::Celsius.format(Some(21.5)), "21.5°C");
        assert_eq!(TemperatureUnit::Fahrenheit.format(Some(21.5)), "70.7°F");
        assert_eq!(TemperatureUnit::Fahrenheit.format(None), "N/A");
    }

    #[test]
    fn temperature_unit_parse_roundtrip() {
        for unit in TemperatureUnit::all() {
            let parsed = TemperatureUnit::try_from(unit.as_str()).expect("roundtrip should succeed");
            assert_eq!(*unit, parsed);
        }

        let err = TemperatureUnit::try_from("kelvin").unwrap_err();
        assert!(err.to_string().contains("Unknown temperature unit"));
    }
}
