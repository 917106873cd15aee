// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::store::KeyValueStore;
use error::Error;
use serde::Serialize;
use tracing::{info, instrument, warn};

pub const FAVORITES_KEY: &str = "favorites";

/// Favorited city names in insertion order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Favorites(Vec<String>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
  Added,
  Removed,
}

impl Favorites {
  pub fn new() -> Self {
    Self::default()
  }

  /// Keeps the first occurrence of every name.
  pub fn from_cities<I, C>(cities: I) -> Self
  where
    I: IntoIterator<Item = C>,
    C: Into<String>,
  {
    let mut favorites = Self::new();
    for city in cities {
      let city = city.into();
      if !favorites.contains(&city) {
        favorites.0.push(city);
      }
    }
    favorites
  }

  pub fn contains(&self, city: &str) -> bool {
    self.0.iter().any(|c| c == city)
  }

  /// Removes `city` if present, appends it otherwise.
  pub fn toggled(&self, city: &str) -> (Self, Toggle) {
    if self.contains(city) {
      let kept = self.0.iter().filter(|c| *c != city).cloned().collect();
      (Self(kept), Toggle::Removed)
    } else {
      let mut added = self.0.clone();
      added.push(city.to_string());
      (Self(added), Toggle::Added)
    }
  }

  pub fn get(&self, index: usize) -> Option<&str> {
    self.0.get(index).map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  fn parse(raw: &str) -> Result<Self, Error> {
    let cities: Vec<String> = serde_json::from_str(raw)?;
    Ok(Self::from_cities(cities))
  }
}

/// Favorites kept in memory and mirrored under [`FAVORITES_KEY`].
///
/// A write that fails leaves the in-memory set untouched, so the two never
/// disagree.
#[derive(Debug)]
pub struct FavoritesStore<S> {
  store: S,
  favorites: Favorites,
}

impl<S: KeyValueStore> FavoritesStore<S> {
  /// Absent, unreadable or malformed data degrades to no favorites.
  #[instrument(skip(store))]
  pub fn load(store: S) -> Self {
    let favorites = match store.get(FAVORITES_KEY) {
      Ok(Some(raw)) => Favorites::parse(&raw).unwrap_or_else(|e| {
        warn!("Ignoring unparseable favorites ({}), starting empty", e);
        Favorites::new()
      }),
      Ok(None) => Favorites::new(),
      Err(e) => {
        warn!("Could not read favorites ({}), starting empty", e);
        Favorites::new()
      }
    };

    info!("Loaded {} favorite(s)", favorites.len());
    Self { store, favorites }
  }

  pub fn favorites(&self) -> &Favorites {
    &self.favorites
  }

  /// Writes `favorites` in full, then adopts it.
  pub fn persist(&mut self, favorites: Favorites) -> Result<(), Error> {
    let raw = serde_json::to_string(&favorites)?;
    self.store.set(FAVORITES_KEY, &raw)?;
    self.favorites = favorites;
    Ok(())
  }

  #[instrument(skip(self))]
  pub fn toggle(&mut self, city: &str) -> Result<Toggle, Error> {
    let (next, change) = self.favorites.toggled(city);
    self.persist(next)?;
    info!("{:?} {} in favorites", change, city);
    Ok(change)
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn into_store(self) -> S {
    self.store
  }
}
