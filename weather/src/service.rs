// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  config::WeatherConfig,
  constants::*,
  models::{api::ForecastResponse, weather::WeatherResult},
};
use async_trait::async_trait;
use error::Error;
use thiserror::Error as ThisError;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// The only failure a weather lookup reports to the user. Network errors,
/// unknown cities, bad status codes and malformed bodies all end up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[error("Could not fetch weather data. Try a different city.")]
pub struct QueryError;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
  /// `location` is a city name or a `"lat,lon"` pair.
  async fn fetch(&self, location: &str) -> Result<WeatherResult, QueryError>;
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
  config: WeatherConfig,
  client: reqwest::Client,
}

impl WeatherClient {
  pub fn new(config: WeatherConfig) -> Result<Self, Error> {
    let client = reqwest::Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .build()?;

    Ok(Self { config, client })
  }

  fn build_api_url(&self, location: &str) -> Result<Url, Error> {
    Url::parse_with_params(
      &format!("{}/{}", self.config.base_url, FORECAST_ENDPOINT),
      &[
        ("key", self.config.api_key.as_str()),
        ("q", location),
        ("days", FORECAST_DAYS),
        ("aqi", "no"),
        ("alerts", "no"),
      ],
    )
    .map_err(|e| Error::ConfigError(format!("Failed to build API URL: {}", e)))
  }

  async fn try_fetch(&self, location: &str) -> Result<WeatherResult, Error> {
    if location.trim().is_empty() {
      return Err(Error::InvalidLocation("Location cannot be empty".into()));
    }

    let url = self.build_api_url(location)?;
    let response = self.client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
      return Err(Error::ApiError(format!("API request failed: {}", status)));
    }

    let forecast: ForecastResponse = response
      .json()
      .await
      .map_err(|e| Error::InvalidResponse(e.to_string()))?;
    debug!(days = forecast.forecast.forecastday.len(), "Decoded forecast");

    Ok(WeatherResult::from_response(forecast))
  }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
  #[instrument(skip(self))]
  async fn fetch(&self, location: &str) -> Result<WeatherResult, QueryError> {
    match self.try_fetch(location).await {
      Ok(result) => {
        info!(
          "Fetched weather for {}, {}",
          result.location.name, result.location.country
        );
        Ok(result)
      }
      Err(e) => {
        warn!("Weather lookup for {:?} failed: {}", location, e);
        Err(QueryError)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn forecast_body(city: &str, temp_c: f64, condition: &str) -> serde_json::Value {
    let days: Vec<_> = (9..14)
      .map(|d| {
        serde_json::json!({
          "date": format!("2025-06-{:02}", d),
          "day": {
            "avgtemp_c": temp_c,
            "condition": {"text": condition, "icon": "//cdn.weatherapi.com/113.png"}
          }
        })
      })
      .collect();

    serde_json::json!({
      "location": {"name": city, "country": "United Kingdom"},
      "current": {"temp_c": temp_c, "condition": {"text": condition, "icon": "//cdn.weatherapi.com/113.png"}},
      "forecast": {"forecastday": days}
    })
  }

  fn client_for(server: &MockServer) -> WeatherClient {
    let config = WeatherConfig::new("test-key", server.uri()).unwrap();
    WeatherClient::new(config).unwrap()
  }

  #[tokio::test]
  async fn test_fetch_sends_forecast_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/forecast.json"))
      .and(query_param("key", "test-key"))
      .and(query_param("q", "London"))
      .and(query_param("days", "5"))
      .and(query_param("aqi", "no"))
      .and(query_param("alerts", "no"))
      .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("London", 15.0, "Sunny")))
      .expect(1)
      .mount(&server)
      .await;

    let result = client_for(&server).fetch("London").await.unwrap();

    assert_eq!(result.location.name, "London");
    assert_eq!(result.current.temp_c, 15.0);
    assert_eq!(result.current.condition.text, "Sunny");
    assert_eq!(result.forecast.len(), 5);
  }

  #[tokio::test]
  async fn test_fetch_accepts_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/forecast.json"))
      .and(query_param("q", "51.52,-0.11"))
      .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body("London", 12.5, "Overcast")))
      .mount(&server)
      .await;

    let result = client_for(&server).fetch("51.52,-0.11").await.unwrap();
    assert_eq!(result.current.temp_c, 12.5);
  }

  #[tokio::test]
  async fn test_unknown_city_is_query_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/forecast.json"))
      .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
        "error": {"code": 1006, "message": "No matching location found."}
      })))
      .mount(&server)
      .await;

    let err = client_for(&server).fetch("Atlantis").await.unwrap_err();
    assert_eq!(err, QueryError);
    assert_eq!(
      err.to_string(),
      "Could not fetch weather data. Try a different city."
    );
  }

  #[tokio::test]
  async fn test_malformed_body_is_query_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .and(path("/forecast.json"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "location": {"name": "London", "country": "United Kingdom"}
      })))
      .mount(&server)
      .await;

    assert_eq!(client_for(&server).fetch("London").await, Err(QueryError));
  }

  #[tokio::test]
  async fn test_unreachable_server_is_query_error() {
    let config = WeatherConfig::new("test-key", "http://127.0.0.1:9").unwrap();
    let client = WeatherClient::new(config).unwrap();

    assert_eq!(client.fetch("London").await, Err(QueryError));
  }

  #[tokio::test]
  async fn test_empty_location_skips_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
      .respond_with(ResponseTemplate::new(200))
      .expect(0)
      .mount(&server)
      .await;

    assert_eq!(client_for(&server).fetch("   ").await, Err(QueryError));
  }

  #[test]
  fn test_city_name_is_url_encoded() {
    let config = WeatherConfig::new("k", "https://api.weatherapi.com/v1").unwrap();
    let client = WeatherClient::new(config).unwrap();

    let url = client.build_api_url("New York").unwrap();
    assert_eq!(url.path(), "/v1/forecast.json");
    assert!(url.as_str().contains("q=New+York"));
  }
}
