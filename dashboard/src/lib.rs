// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod presentation;
pub mod state;
pub mod view;

pub use presentation::{favorite_label, format_temperature, unit_toggle_label, Theme, Unit};
pub use state::{Dashboard, QueryOutcome, QueryTicket, RequestId};
pub use view::{CurrentCard, DashboardView, ForecastCard};
