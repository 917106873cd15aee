// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("API error: {0}")]
  ApiError(String),
  #[error("Configuration error: {0}")]
  ConfigError(String),
  #[error("IO error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("HTTP error: {0}")]
  HttpError(#[from] reqwest::Error),
  #[error("JSON error: {0}")]
  JsonError(#[from] serde_json::Error),
  #[error("Failed to parse response: {0}")]
  ParseError(String),
  #[error("Invalid location: {0}")]
  InvalidLocation(String),
  #[error("Invalid API key")]
  InvalidApiKey,
  #[error("Invalid response from weather API: {0}")]
  InvalidResponse(String),
  #[error("Geolocation unavailable: {0}")]
  LocationUnavailable(String),
  #[error("Storage error: {0}")]
  StorageError(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
