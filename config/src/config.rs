// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{API_KEY_VAR, CONFIG_PATH_VAR, DEFAULT_CONFIG_PATH};
use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
  pub api_base_url: String,
  pub storage_path: PathBuf,
  pub log_level: String,
  pub geolocation: GeolocationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeolocationConfig {
  pub mode: GeolocationMode,
  pub latitude: Option<f64>,
  pub longitude: Option<f64>,
  pub ip_lookup_url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeolocationMode {
  #[default]
  Off,
  Fixed,
  Ip,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_base_url: "https://api.weatherapi.com/v1".into(),
      storage_path: "skycast-storage.json".into(),
      log_level: "warn".into(),
      geolocation: GeolocationConfig::default(),
    }
  }
}

impl Default for GeolocationConfig {
  fn default() -> Self {
    Self {
      mode: GeolocationMode::Off,
      latitude: None,
      longitude: None,
      ip_lookup_url: "http://ip-api.com/json".into(),
    }
  }
}

impl Config {
  #[instrument(skip(path))]
  pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
    let content = fs::read_to_string(path)?;
    let config: Self = toml::from_str(&content)?;
    tracing::debug!("Loaded configuration successfully");
    Ok(config)
  }

  /// Reads the file named by `SKYCAST_CONFIG` (or `skycast.toml`). A missing
  /// file is not an error: defaults apply.
  pub fn load() -> anyhow::Result<Self> {
    let path = env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
      tracing::info!("No configuration file at {}, using defaults", path);
      return Ok(Self::default());
    }

    Self::from_file(&path).with_context(|| format!("Failed to load configuration from {}", path))
  }

  pub fn api_key_from_env() -> anyhow::Result<String> {
    env::var(API_KEY_VAR).with_context(|| format!("Missing {} environment variable", API_KEY_VAR))
  }
}

impl GeolocationConfig {
  /// Coordinates for `mode = "fixed"`; both halves must be present.
  pub fn fixed_position(&self) -> Option<(f64, f64)> {
    match (self.latitude, self.longitude) {
      (Some(lat), Some(lon)) => Some((lat, lon)),
      _ => None,
    }
  }
}

impl std::fmt::Display for GeolocationMode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mode = match self {
      GeolocationMode::Off => "off",
      GeolocationMode::Fixed => "fixed",
      GeolocationMode::Ip => "ip",
    };
    write!(f, "{}", mode)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn defaults_point_at_weatherapi() {
    let config = Config::default();
    assert_eq!(config.api_base_url, "https://api.weatherapi.com/v1");
    assert_eq!(config.geolocation.mode, GeolocationMode::Off);
    assert_eq!(config.log_level, "warn");
  }

  #[test]
  fn partial_file_keeps_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
      file,
      r#"
storage_path = "/tmp/favs.json"

[geolocation]
mode = "fixed"
latitude = 51.5
longitude = -0.12
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.storage_path, PathBuf::from("/tmp/favs.json"));
    assert_eq!(config.api_base_url, "https://api.weatherapi.com/v1");
    assert_eq!(config.geolocation.mode, GeolocationMode::Fixed);
    assert_eq!(config.geolocation.fixed_position(), Some((51.5, -0.12)));
    assert_eq!(config.geolocation.ip_lookup_url, "http://ip-api.com/json");
  }

  #[test]
  fn fixed_position_needs_both_coordinates() {
    let geo = GeolocationConfig {
      latitude: Some(10.0),
      ..GeolocationConfig::default()
    };
    assert_eq!(geo.fixed_position(), None);
  }

  #[test]
  fn unknown_mode_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[geolocation]\nmode = \"satellite\"").unwrap();
    assert!(Config::from_file(file.path()).is_err());
  }

  #[test]
  fn mode_display() {
    assert_eq!(GeolocationMode::Ip.to_string(), "ip");
    assert_eq!(GeolocationMode::Off.to_string(), "off");
  }
}
