// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
mod config;
pub mod dotenv;

pub use config::{Config, GeolocationConfig, GeolocationMode};

pub const API_KEY_VAR: &str = "WEATHERAPI_KEY";
pub const CONFIG_PATH_VAR: &str = "SKYCAST_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "skycast.toml";
