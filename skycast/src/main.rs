// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use anyhow::{Context, Result};
use config::Config;
use dashboard::Dashboard;
use skycast::Session;
use std::sync::Arc;
use storage::FileStore;
use tokio::io::BufReader;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;
use weather::{Geolocator, WeatherClient, WeatherConfig, WeatherProvider};

struct Runner {
  session: Session<FileStore>,
  responses: tokio::sync::mpsc::UnboundedReceiver<skycast::Response>,
  geolocator: Arc<dyn Geolocator>,
}

#[cfg(debug_assertions)]
fn setup_logging(level: &str) {
  tracing_subscriber::fmt()
    .with_env_filter(env_filter(level))
    .with_writer(std::io::stderr)
    .with_file(true)
    .with_line_number(true)
    .with_thread_ids(true)
    .init();
}

#[cfg(not(debug_assertions))]
fn setup_logging(level: &str) {
  tracing_subscriber::fmt()
    .with_env_filter(env_filter(level))
    .with_writer(std::io::stderr)
    .init();
}

fn env_filter(level: &str) -> EnvFilter {
  EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  #[cfg(debug_assertions)]
  config::dotenv::load()?;

  let config = Config::load()?;
  setup_logging(&config.log_level);

  let runner = match Runner::new(&config) {
    Ok(runner) => runner,
    Err(e) => {
      error!("Failed to start: {:?}", e);
      std::process::exit(1);
    }
  };

  runner.run().await
}

impl Runner {
  #[instrument(skip(config))]
  fn new(config: &Config) -> Result<Self> {
    let api_key = Config::api_key_from_env()?;
    let weather_config = WeatherConfig::new(api_key, config.api_base_url.as_str())
      .context("Invalid weather API configuration")?;
    let provider: Arc<dyn WeatherProvider> =
      Arc::new(WeatherClient::new(weather_config).context("Failed to create HTTP client")?);

    let geolocator: Arc<dyn Geolocator> = weather::location::from_config(&config.geolocation)
      .context("Invalid geolocation configuration")?
      .into();

    info!(
      "Favorites in {}, geolocation {}",
      config.storage_path.display(),
      config.geolocation.mode
    );
    let dashboard = Dashboard::new(FileStore::new(&config.storage_path));
    let (session, responses) = Session::new(dashboard, provider);

    Ok(Self {
      session,
      responses,
      geolocator,
    })
  }

  async fn run(self) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();

    skycast::run(self.session, self.responses, self.geolocator, input, &mut out)
      .await
      .context("Terminal I/O failed")
  }
}
