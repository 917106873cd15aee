// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::constants::REQUEST_TIMEOUT;
use ::config::{GeolocationConfig, GeolocationMode};
use async_trait::async_trait;
use error::Error;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub latitude: f64,
  pub longitude: f64,
}

impl Coordinates {
  pub fn new(latitude: f64, longitude: f64) -> Self {
    Self {
      latitude,
      longitude,
    }
  }

  /// The `"lat,lon"` form the weather provider accepts as a location.
  pub fn as_query(&self) -> String {
    format!("{},{}", self.latitude, self.longitude)
  }
}

/// One-shot source of the user's position.
#[async_trait]
pub trait Geolocator: Send + Sync {
  async fn current_position(&self) -> Result<Coordinates, Error>;
}

/// No position source configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl Geolocator for Unavailable {
  async fn current_position(&self) -> Result<Coordinates, Error> {
    Err(Error::LocationUnavailable("geolocation is disabled".into()))
  }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl Geolocator for FixedPosition {
  async fn current_position(&self) -> Result<Coordinates, Error> {
    Ok(self.0)
  }
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
  #[serde(default)]
  status: Option<String>,
  #[serde(default)]
  message: Option<String>,
  lat: Option<f64>,
  lon: Option<f64>,
}

/// Approximate position of the caller's public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
  client: reqwest::Client,
  lookup_url: String,
}

impl IpGeolocator {
  pub fn new(lookup_url: impl Into<String>) -> Result<Self, Error> {
    let client = reqwest::Client::builder()
      .timeout(REQUEST_TIMEOUT)
      .build()?;

    Ok(Self {
      client,
      lookup_url: lookup_url.into(),
    })
  }
}

#[async_trait]
impl Geolocator for IpGeolocator {
  #[instrument(skip(self))]
  async fn current_position(&self) -> Result<Coordinates, Error> {
    let response = self.client.get(&self.lookup_url).send().await?;

    if !response.status().is_success() {
      return Err(Error::LocationUnavailable(format!(
        "lookup returned status {}",
        response.status()
      )));
    }

    let body: IpLookupResponse = response
      .json()
      .await
      .map_err(|e| Error::ParseError(format!("Failed to parse IP lookup: {}", e)))?;

    if body.status.as_deref().is_some_and(|s| s != "success") {
      return Err(Error::LocationUnavailable(
        body.message.unwrap_or_else(|| "lookup failed".into()),
      ));
    }

    match (body.lat, body.lon) {
      (Some(lat), Some(lon)) => {
        debug!("IP lookup placed us at {},{}", lat, lon);
        Ok(Coordinates::new(lat, lon))
      }
      _ => Err(Error::LocationUnavailable(
        "lookup returned no coordinates".into(),
      )),
    }
  }
}

/// Picks the position source the configuration asks for.
pub fn from_config(config: &GeolocationConfig) -> Result<Box<dyn Geolocator>, Error> {
  match config.mode {
    GeolocationMode::Off => Ok(Box::new(Unavailable)),
    GeolocationMode::Fixed => {
      let (lat, lon) = config.fixed_position().ok_or_else(|| {
        Error::ConfigError("geolocation mode \"fixed\" needs latitude and longitude".into())
      })?;
      Ok(Box::new(FixedPosition(Coordinates::new(lat, lon))))
    }
    GeolocationMode::Ip => Ok(Box::new(IpGeolocator::new(config.ip_lookup_url.clone())?)),
  }
}
