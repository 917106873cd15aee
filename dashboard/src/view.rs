// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::presentation::{favorite_label, format_temperature, unit_toggle_label, Theme, Unit};
use std::fmt;
use storage::Favorites;
use weather::WeatherResult;

/// Everything the terminal shows, derived from the dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
  pub theme: Theme,
  pub unit_button: &'static str,
  pub error: Option<String>,
  pub current: Option<CurrentCard>,
  pub forecast: Vec<ForecastCard>,
  pub favorites: Vec<String>,
  pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentCard {
  pub title: String,
  pub summary: String,
  pub icon: String,
  pub favorite_button: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastCard {
  pub date: String,
  pub icon: String,
  pub temperature: String,
  pub condition: String,
}

impl DashboardView {
  pub fn build(
    weather: Option<&WeatherResult>,
    error: Option<&str>,
    unit: Unit,
    favorites: &Favorites,
    year: i32,
  ) -> Self {
    let current = weather.map(|w| CurrentCard {
      title: format!("{}, {}", w.location.name, w.location.country),
      summary: format!(
        "{} - {}",
        format_temperature(w.current.temp_c, unit),
        w.current.condition.text
      ),
      icon: w.current.condition.icon_url(),
      favorite_button: favorite_label(favorites, w),
    });

    let forecast = weather
      .map(|w| {
        w.forecast
          .iter()
          .map(|day| ForecastCard {
            date: day.date.clone(),
            icon: day.condition.icon_url(),
            temperature: format_temperature(day.avg_temp_c, unit),
            condition: day.condition.text.clone(),
          })
          .collect()
      })
      .unwrap_or_default();

    Self {
      theme: Theme::for_weather(weather),
      unit_button: unit_toggle_label(unit),
      error: error.map(str::to_string),
      current,
      forecast,
      favorites: favorites.iter().map(str::to_string).collect(),
      year,
    }
  }
}

impl fmt::Display for DashboardView {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
      f,
      "{} Skycast {}  ({})",
      self.theme.glyph(),
      self.theme.glyph(),
      self.theme.class_name()
    )?;
    writeln!(f, "[search <city>]  [unit: {}]", self.unit_button)?;

    if let Some(error) = &self.error {
      writeln!(f)?;
      writeln!(f, "! {}", error)?;
    }

    if let Some(card) = &self.current {
      writeln!(f)?;
      writeln!(f, "{}", card.title)?;
      writeln!(f, "  {}", card.summary)?;
      writeln!(f, "  {}", card.icon)?;
      writeln!(f, "  [fav: {}]", card.favorite_button)?;
    }

    if !self.forecast.is_empty() {
      writeln!(f)?;
      writeln!(f, "5-Day Forecast")?;
      for day in &self.forecast {
        writeln!(f, "  {:<12}{:>10}  {}", day.date, day.temperature, day.condition)?;
      }
    }

    if !self.favorites.is_empty() {
      writeln!(f)?;
      writeln!(f, "Favorite Cities")?;
      for (idx, city) in self.favorites.iter().enumerate() {
        writeln!(f, "  {}. {}  [check {}]", idx + 1, city, idx + 1)?;
      }
    }

    writeln!(f)?;
    write!(f, "© {} Skycast. All rights reserved.", self.year)
  }
}
