// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{presentation::Unit, view::DashboardView};
use chrono::Datelike;
use error::Error;
use storage::{Favorites, FavoritesStore, KeyValueStore, Toggle};
use tracing::{debug, info, instrument};
use weather::{QueryError, WeatherProvider, WeatherResult};

/// Monotonic id of an issued weather query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// Handed out when a query starts and handed back with its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
  id: RequestId,
  location: String,
}

impl QueryTicket {
  pub fn id(&self) -> RequestId {
    self.id
  }

  pub fn location(&self) -> &str {
    &self.location
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
  Applied,
  /// A newer query was issued after this one; its result was dropped.
  Stale,
}

/// Session state of the weather dashboard.
///
/// The weather result holds both current conditions and the forecast, so a
/// lookup replaces them together or clears them together.
#[derive(Debug)]
pub struct Dashboard<S> {
  favorites: FavoritesStore<S>,
  weather: Option<WeatherResult>,
  error: Option<String>,
  unit: Unit,
  last_issued: u64,
}

impl<S: KeyValueStore> Dashboard<S> {
  pub fn new(store: S) -> Self {
    Self {
      favorites: FavoritesStore::load(store),
      weather: None,
      error: None,
      unit: Unit::default(),
      last_issued: 0,
    }
  }

  /// Starts a lookup. Empty input issues nothing.
  pub fn begin_query(&mut self, location: &str) -> Option<QueryTicket> {
    if location.is_empty() {
      return None;
    }

    self.last_issued += 1;
    let ticket = QueryTicket {
      id: RequestId(self.last_issued),
      location: location.to_string(),
    };
    debug!(id = self.last_issued, "Issued query for {:?}", location);
    Some(ticket)
  }

  /// Applies a finished lookup unless a newer one has been issued since.
  pub fn complete_query(
    &mut self,
    ticket: QueryTicket,
    result: Result<WeatherResult, QueryError>,
  ) -> QueryOutcome {
    if ticket.id != RequestId(self.last_issued) {
      debug!(
        id = ticket.id.0,
        latest = self.last_issued,
        "Dropping stale result for {:?}",
        ticket.location
      );
      return QueryOutcome::Stale;
    }

    match result {
      Ok(weather) => {
        self.weather = Some(weather);
        self.error = None;
      }
      Err(e) => {
        self.weather = None;
        self.error = Some(e.to_string());
      }
    }
    QueryOutcome::Applied
  }

  /// Runs a lookup to completion on the calling task.
  #[instrument(skip(self, provider))]
  pub async fn search(
    &mut self,
    provider: &dyn WeatherProvider,
    location: &str,
  ) -> Option<QueryOutcome> {
    let ticket = self.begin_query(location)?;
    let result = provider.fetch(ticket.location()).await;
    Some(self.complete_query(ticket, result))
  }

  /// Adds or removes the displayed city. Does nothing while no weather is
  /// shown.
  pub fn toggle_favorite(&mut self) -> Result<Option<Toggle>, Error> {
    let Some(weather) = &self.weather else {
      return Ok(None);
    };

    let city = weather.location.name.clone();
    let change = self.favorites.toggle(&city)?;
    Ok(Some(change))
  }

  pub fn toggle_unit(&mut self) -> Unit {
    self.unit = self.unit.toggled();
    info!("Showing temperatures in {:?}", self.unit);
    self.unit
  }

  pub fn favorites(&self) -> &Favorites {
    self.favorites.favorites()
  }

  pub fn weather(&self) -> Option<&WeatherResult> {
    self.weather.as_ref()
  }

  pub fn error(&self) -> Option<&str> {
    self.error.as_deref()
  }

  pub fn unit(&self) -> Unit {
    self.unit
  }

  /// Id of the most recently issued query, if any was issued.
  pub fn latest_request(&self) -> Option<RequestId> {
    (self.last_issued > 0).then_some(RequestId(self.last_issued))
  }

  pub fn view(&self) -> DashboardView {
    DashboardView::build(
      self.weather.as_ref(),
      self.error.as_deref(),
      self.unit,
      self.favorites(),
      chrono::Local::now().year(),
    )
  }

  pub fn into_store(self) -> S {
    self.favorites.into_store()
  }
}
