// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastResponse {
  pub location: ApiLocation,
  pub current: ApiCurrent,
  pub forecast: ApiForecast,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiLocation {
  pub name: String,
  pub country: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiCurrent {
  pub temp_c: f64,
  pub condition: ApiCondition,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiCondition {
  pub text: String,
  pub icon: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiForecast {
  pub forecastday: Vec<ApiForecastDay>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiForecastDay {
  pub date: String,
  pub day: ApiDay,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiDay {
  pub avgtemp_c: f64,
  pub condition: ApiCondition,
}
