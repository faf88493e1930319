use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::model::{CitySuggestion, Coordinates, ForecastEntry, WeatherQuery, WeatherRecord};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        }
    }

    /// Point the client at a different API root (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        mut params: Vec<(&'static str, String)>,
        what: &str,
    ) -> Result<T> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, what, "requesting OpenWeather");

        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));

        let res = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {} request failed with status {}: {}",
                what,
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse OpenWeather {what} JSON"))
    }
}

fn location_params(query: &WeatherQuery) -> Vec<(&'static str, String)> {
    match query {
        WeatherQuery::City(name) => vec![("q", name.clone())],
        WeatherQuery::Coordinates(c) => {
            vec![("lat", c.latitude.to_string()), ("lon", c.longitude.to_string())]
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    feels_like: Option<f64>,
    humidity: Option<u8>,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwRain {
    #[serde(rename = "1h")]
    one_hour: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    name: String,
    dt: Option<i64>,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
    rain: Option<OwRain>,
    #[serde(default)]
    sys: OwSys,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    #[serde(default)]
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    #[serde(default)]
    list: Vec<OwForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwFindEntry {
    id: u64,
    name: String,
    #[serde(default)]
    sys: OwSys,
    coord: OwCoord,
}

#[derive(Debug, Deserialize)]
struct OwFindResponse {
    #[serde(default)]
    list: Vec<OwFindEntry>,
}

fn first_description(weather: Vec<OwWeather>) -> Option<String> {
    weather.into_iter().next().and_then(|w| w.description)
}

impl From<OwCurrentResponse> for WeatherRecord {
    fn from(parsed: OwCurrentResponse) -> Self {
        WeatherRecord {
            location_name: parsed.name,
            condition_text: first_description(parsed.weather),
            temperature_celsius: parsed.main.temp,
            country: parsed.sys.country,
            feels_like_celsius: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure,
            wind_speed_mps: parsed.wind.and_then(|w| w.speed),
            visibility_m: parsed.visibility,
            precipitation_1h_mm: parsed.rain.and_then(|r| r.one_hour),
            sunrise: parsed.sys.sunrise.and_then(unix_to_utc),
            sunset: parsed.sys.sunset.and_then(unix_to_utc),
            observed_at: parsed.dt.and_then(unix_to_utc),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, query: &WeatherQuery) -> Result<WeatherRecord> {
        let parsed: OwCurrentResponse =
            self.get_json("weather", location_params(query), "current weather").await?;

        Ok(parsed.into())
    }

    async fn forecast(&self, query: &WeatherQuery) -> Result<Vec<ForecastEntry>> {
        let parsed: OwForecastResponse =
            self.get_json("forecast", location_params(query), "5-day forecast").await?;

        let entries = parsed
            .list
            .into_iter()
            .filter_map(|e| {
                Some(ForecastEntry {
                    time: unix_to_utc(e.dt)?,
                    temperature_celsius: e.main.temp,
                    condition_text: first_description(e.weather),
                })
            })
            .collect();

        Ok(entries)
    }

    async fn find_cities(&self, query: &str) -> Result<Vec<CitySuggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let parsed: OwFindResponse =
            self.get_json("find", vec![("q", query.to_string())], "city search").await?;

        Ok(parsed
            .list
            .into_iter()
            .map(|e| CitySuggestion {
                id: e.id,
                name: e.name,
                country: e.sys.country,
                coordinates: Coordinates::new(e.coord.lat, e.coord.lon),
            })
            .collect())
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut: String = body.chars().take(MAX).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn provider_for(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::new("TEST_KEY".into()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn current_by_city_maps_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Chennai"))
            .and(query_param("appid", "TEST_KEY"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Chennai",
                "dt": 1_700_000_000,
                "main": { "temp": 31.2, "feels_like": 36.0, "humidity": 70, "pressure": 1008 },
                "weather": [{ "description": "haze" }],
                "wind": { "speed": 4.1 },
                "rain": { "1h": 0.4 },
                "sys": { "country": "IN", "sunrise": 1_699_990_000, "sunset": 1_700_030_000 },
                "visibility": 4000
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let record = provider
            .current(&WeatherQuery::City("Chennai".into()))
            .await
            .expect("request should succeed");

        assert_eq!(record.location_name, "Chennai");
        assert_eq!(record.condition_text.as_deref(), Some("haze"));
        assert_eq!(record.temperature_celsius, Some(31.2));
        assert_eq!(record.humidity_pct, Some(70));
        assert_eq!(record.pressure_hpa, Some(1008.0));
        assert_eq!(record.precipitation_1h_mm, Some(0.4));
        assert_eq!(record.country.as_deref(), Some("IN"));
        assert_eq!(record.visibility_m, Some(4000));
        assert!(record.observed_at.is_some());
    }

    #[tokio::test]
    async fn current_by_coordinates_tolerates_missing_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "13.08"))
            .and(query_param("lon", "80.27"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Chennai",
                "weather": []
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let record = provider
            .current(&WeatherQuery::Coordinates(Coordinates::new(13.08, 80.27)))
            .await
            .expect("request should succeed");

        assert_eq!(record.location_name, "Chennai");
        assert_eq!(record.condition_text, None);
        assert_eq!(record.temperature_celsius, None);
    }

    #[tokio::test]
    async fn http_error_is_reported_with_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(r#"{"cod":401,"message":"Invalid API key"}"#),
            )
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider.current(&WeatherQuery::City("Paris".into())).await.unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("401"), "unexpected error: {msg}");
        assert!(msg.contains("Invalid API key"));
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let err = provider.forecast(&WeatherQuery::City("Paris".into())).await.unwrap_err();

        assert!(err.to_string().contains("Failed to parse OpenWeather"));
    }

    #[tokio::test]
    async fn forecast_maps_entries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [
                    { "dt": 1_700_000_000, "main": { "temp": 20.0 }, "weather": [{ "description": "light rain" }] },
                    { "dt": 1_700_010_800, "main": { "temp": 18.5 }, "weather": [] }
                ]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let entries = provider
            .forecast(&WeatherQuery::City("Paris".into()))
            .await
            .expect("request should succeed");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].condition_text.as_deref(), Some("light rain"));
        assert_eq!(entries[1].temperature_celsius, Some(18.5));
        assert_eq!(entries[1].condition_text, None);
    }

    #[tokio::test]
    async fn find_cities_maps_suggestions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/find"))
            .and(query_param("q", "Mum"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [{
                    "id": 1275339,
                    "name": "Mumbai",
                    "sys": { "country": "IN" },
                    "coord": { "lat": 19.0144, "lon": 72.8479 }
                }]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let suggestions = provider.find_cities("  Mum ").await.expect("request should succeed");

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label(), "Mumbai, IN");
        assert_eq!(suggestions[0].coordinates, Coordinates::new(19.0144, 72.8479));
    }

    #[tokio::test]
    async fn blank_city_search_sends_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server).await;
        let suggestions = provider.find_cities("   ").await.expect("blank query is not an error");

        assert!(suggestions.is_empty());
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(500);
        let out = truncate_body(&long);

        assert!(out.ends_with("..."));
        assert_eq!(out.len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
