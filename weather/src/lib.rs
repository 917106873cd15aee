// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod config;
pub mod location;
pub mod models;
pub mod service;

pub use config::WeatherConfig;
pub use location::{Coordinates, FixedPosition, Geolocator, IpGeolocator, Unavailable};
pub use models::weather::{Condition, Conditions, ForecastDay, Place, WeatherResult};
pub use service::{QueryError, WeatherClient, WeatherProvider};

pub mod constants {
  use std::time::Duration;
  pub(crate) const FORECAST_ENDPOINT: &str = "forecast.json";
  pub(crate) const FORECAST_DAYS: &str = "5";
  pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
}
