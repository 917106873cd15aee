// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;

#[derive(Clone)]
pub struct WeatherConfig {
  pub(crate) api_key: String,
  pub(crate) base_url: String,
}

impl WeatherConfig {
  pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, Error> {
    let api_key = api_key.into();
    if api_key.trim().is_empty() {
      return Err(Error::InvalidApiKey);
    }

    Ok(Self {
      api_key,
      base_url: base_url.into().trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }
}

impl std::fmt::Debug for WeatherConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WeatherConfig")
      .field("api_key", &"<redacted>")
      .field("base_url", &self.base_url)
      .finish()
  }
}
