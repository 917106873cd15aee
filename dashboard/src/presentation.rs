// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
//! Values derived from the current state on every render. Nothing here is
//! stored.
use storage::Favorites;
use weather::WeatherResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Unit {
  #[default]
  Celsius,
  Fahrenheit,
}

impl Unit {
  pub fn toggled(self) -> Self {
    match self {
      Self::Celsius => Self::Fahrenheit,
      Self::Fahrenheit => Self::Celsius,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Sunny,
  Cloudy,
  Rainy,
  Snowy,
  Default,
}

/// Checked in order against the lowercased condition text; first hit wins.
const THEME_KEYWORDS: [(&str, Theme); 4] = [
  ("sunny", Theme::Sunny),
  ("cloudy", Theme::Cloudy),
  ("rain", Theme::Rainy),
  ("snow", Theme::Snowy),
];

impl Theme {
  pub fn for_weather(weather: Option<&WeatherResult>) -> Self {
    weather.map_or(Self::Default, |w| Self::for_condition(&w.current.condition.text))
  }

  pub fn for_condition(text: &str) -> Self {
    let text = text.to_lowercase();
    THEME_KEYWORDS
      .iter()
      .find(|(keyword, _)| text.contains(keyword))
      .map_or(Self::Default, |(_, theme)| *theme)
  }

  pub fn class_name(&self) -> &'static str {
    match self {
      Self::Sunny => "sunny-bg",
      Self::Cloudy => "cloudy-bg",
      Self::Rainy => "rainy-bg",
      Self::Snowy => "snowy-bg",
      Self::Default => "default-bg",
    }
  }

  pub fn glyph(&self) -> &'static str {
    match self {
      Self::Sunny => "☀",
      Self::Cloudy => "☁",
      Self::Rainy => "☂",
      Self::Snowy => "❄",
      Self::Default => "·",
    }
  }
}

/// Celsius is shown as received, Fahrenheit with one decimal.
pub fn format_temperature(celsius: f64, unit: Unit) -> String {
  match unit {
    Unit::Celsius => {
      // Keeps -0 from printing as "-0 °C".
      let celsius = if celsius == 0.0 { 0.0 } else { celsius };
      format!("{} °C", celsius)
    }
    Unit::Fahrenheit => format!("{:.1} °F", celsius * 9.0 / 5.0 + 32.0),
  }
}

pub fn favorite_label(favorites: &Favorites, weather: &WeatherResult) -> &'static str {
  if favorites.contains(&weather.location.name) {
    "Remove from Favorites"
  } else {
    "Add to Favorites"
  }
}

pub fn unit_toggle_label(unit: Unit) -> &'static str {
  match unit {
    Unit::Celsius => "Show °F",
    Unit::Fahrenheit => "Show °C",
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use weather::{Condition, Conditions, Place};

  fn weather_in(city: &str, condition: &str) -> WeatherResult {
    WeatherResult {
      location: Place {
        name: city.into(),
        country: "Somewhere".into(),
      },
      current: Conditions {
        temp_c: 10.0,
        condition: Condition::new(condition, "//cdn/icon.png"),
      },
      forecast: Vec::new(),
    }
  }

  #[test]
  fn fahrenheit_conversion() {
    assert_eq!(format_temperature(0.0, Unit::Fahrenheit), "32.0 °F");
    assert_eq!(format_temperature(100.0, Unit::Fahrenheit), "212.0 °F");
    assert_eq!(format_temperature(20.0, Unit::Fahrenheit), "68.0 °F");
    assert_eq!(format_temperature(-40.0, Unit::Fahrenheit), "-40.0 °F");
    assert_eq!(format_temperature(15.0, Unit::Fahrenheit), "59.0 °F");
  }

  #[test]
  fn celsius_keeps_source_precision() {
    assert_eq!(format_temperature(15.0, Unit::Celsius), "15 °C");
    assert_eq!(format_temperature(14.2, Unit::Celsius), "14.2 °C");
    assert_eq!(format_temperature(-3.5, Unit::Celsius), "-3.5 °C");
    assert_eq!(format_temperature(-0.0, Unit::Celsius), "0 °C");
  }

  #[test]
  fn theme_substring_matching() {
    assert_eq!(Theme::for_condition("Patchy rain possible"), Theme::Rainy);
    assert_eq!(Theme::for_condition("Partly cloudy"), Theme::Cloudy);
    assert_eq!(Theme::for_condition("Sunny"), Theme::Sunny);
    assert_eq!(Theme::for_condition("Light snow showers"), Theme::Snowy);
    assert_eq!(Theme::for_condition("Mist"), Theme::Default);
    assert_eq!(Theme::for_condition("HEAVY RAIN"), Theme::Rainy);
  }

  #[test]
  fn theme_priority_order() {
    assert_eq!(Theme::for_condition("Sunny but cloudy later"), Theme::Sunny);
    assert_eq!(Theme::for_condition("Cloudy with rain and snow"), Theme::Cloudy);
    assert_eq!(Theme::for_condition("Patchy rain and snow"), Theme::Rainy);
  }

  #[test]
  fn theme_without_weather_is_default() {
    assert_eq!(Theme::for_weather(None), Theme::Default);
    assert_eq!(Theme::Default.class_name(), "default-bg");

    let weather = weather_in("Oslo", "Partly cloudy");
    assert_eq!(Theme::for_weather(Some(&weather)).class_name(), "cloudy-bg");
  }

  #[test]
  fn favorite_label_follows_membership() {
    let weather = weather_in("Oslo", "Sunny");
    assert_eq!(favorite_label(&Favorites::new(), &weather), "Add to Favorites");

    let favorites = Favorites::from_cities(["Lima", "Oslo"]);
    assert_eq!(favorite_label(&favorites, &weather), "Remove from Favorites");
  }

  #[test]
  fn unit_toggle() {
    assert_eq!(Unit::default(), Unit::Celsius);
    assert_eq!(Unit::Celsius.toggled(), Unit::Fahrenheit);
    assert_eq!(Unit::Fahrenheit.toggled(), Unit::Celsius);
    assert_eq!(unit_toggle_label(Unit::Celsius), "Show °F");
    assert_eq!(unit_toggle_label(Unit::Fahrenheit), "Show °C");
  }
}
