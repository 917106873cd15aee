// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use super::api::{ApiCondition, ForecastResponse};
use serde::Serialize;

/// One successful lookup: where, what it is like now, and the next days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherResult {
  pub location: Place,
  pub current: Conditions,
  pub forecast: Vec<ForecastDay>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
  pub name: String,
  pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditions {
  pub temp_c: f64,
  pub condition: Condition,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
  pub text: String,
  pub icon: String,
}

/// A forecast entry. `date` is unique within a result and keys the card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
  pub date: String,
  pub avg_temp_c: f64,
  pub condition: Condition,
}

impl WeatherResult {
  pub(crate) fn from_response(response: ForecastResponse) -> Self {
    let forecast = response
      .forecast
      .forecastday
      .into_iter()
      .map(|day| ForecastDay {
        date: day.date,
        avg_temp_c: day.day.avgtemp_c,
        condition: day.day.condition.into(),
      })
      .collect();

    Self {
      location: Place {
        name: response.location.name,
        country: response.location.country,
      },
      current: Conditions {
        temp_c: response.current.temp_c,
        condition: response.current.condition.into(),
      },
      forecast,
    }
  }
}

impl Condition {
  pub fn new(text: impl Into<String>, icon: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      icon: icon.into(),
    }
  }

  /// The provider hands out protocol-relative icon links (`//cdn...`).
  pub fn icon_url(&self) -> String {
    if self.icon.starts_with("//") {
      format!("https:{}", self.icon)
    } else {
      self.icon.clone()
    }
  }
}

impl From<ApiCondition> for Condition {
  fn from(condition: ApiCondition) -> Self {
    Self {
      text: condition.text,
      icon: condition.icon,
    }
  }
}
