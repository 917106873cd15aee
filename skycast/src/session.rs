// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::commands::{Command, HELP};
use dashboard::{Dashboard, QueryOutcome, QueryTicket};
use std::io::Write;
use std::sync::Arc;
use storage::{KeyValueStore, Toggle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};
use weather::{Coordinates, Geolocator, QueryError, WeatherProvider, WeatherResult};

/// A finished lookup on its way back to the event loop.
pub type Response = (QueryTicket, Result<WeatherResult, QueryError>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
  /// Redraw the dashboard, optionally after a one-line notice.
  Render(Option<String>),
  Notice(String),
  Nothing,
  Quit,
}

/// Owns the dashboard and turns commands into state changes. Lookups run as
/// spawned tasks and report back through the response channel.
pub struct Session<S> {
  dashboard: Dashboard<S>,
  provider: Arc<dyn WeatherProvider>,
  responses: mpsc::UnboundedSender<Response>,
  pending: usize,
}

impl<S: KeyValueStore> Session<S> {
  pub fn new(
    dashboard: Dashboard<S>,
    provider: Arc<dyn WeatherProvider>,
  ) -> (Self, mpsc::UnboundedReceiver<Response>) {
    let (responses, rx) = mpsc::unbounded_channel();
    let session = Self {
      dashboard,
      provider,
      responses,
      pending: 0,
    };
    (session, rx)
  }

  pub fn dashboard(&self) -> &Dashboard<S> {
    &self.dashboard
  }

  /// Lookups spawned but not yet applied.
  pub fn pending(&self) -> usize {
    self.pending
  }

  pub fn execute(&mut self, command: Command) -> Reply {
    match command {
      Command::Search(location) => {
        self.query(&location);
        Reply::Nothing
      }
      Command::Unit => {
        self.dashboard.toggle_unit();
        Reply::Render(None)
      }
      Command::Favorite => self.toggle_favorite(),
      Command::Check(which) => match self.favorite_by_number_or_name(&which) {
        Some(city) => {
          self.query(&city);
          Reply::Nothing
        }
        None => Reply::Notice(format!("{} is not a favorite.", which)),
      },
      Command::Favorites => {
        let favorites = self.dashboard.favorites();
        if favorites.is_empty() {
          return Reply::Notice("No favorite cities yet.".into());
        }
        let list = favorites
          .iter()
          .enumerate()
          .map(|(idx, city)| format!("{}. {}", idx + 1, city))
          .collect::<Vec<_>>()
          .join("\n");
        Reply::Notice(list)
      }
      Command::Show => Reply::Render(None),
      Command::Help => Reply::Notice(HELP.into()),
      Command::Quit => Reply::Quit,
    }
  }

  /// Issues a lookup and spawns it. Returns `false` for empty input.
  pub fn query(&mut self, location: &str) -> bool {
    let Some(ticket) = self.dashboard.begin_query(location) else {
      return false;
    };

    let provider = Arc::clone(&self.provider);
    let responses = self.responses.clone();
    tokio::spawn(async move {
      let result = provider.fetch(ticket.location()).await;
      if responses.send((ticket, result)).is_err() {
        debug!("Event loop gone, dropping weather response");
      }
    });
    self.pending += 1;
    true
  }

  pub fn apply(&mut self, response: Response) -> QueryOutcome {
    let (ticket, result) = response;
    self.pending = self.pending.saturating_sub(1);
    self.dashboard.complete_query(ticket, result)
  }

  /// Startup position fix; skipped once the user has searched on their own.
  pub fn located(&mut self, position: Coordinates) -> bool {
    if self.dashboard.latest_request().is_some() {
      info!("Ignoring startup position, a lookup was already issued");
      return false;
    }
    self.query(&position.as_query())
  }

  fn favorite_by_number_or_name(&self, which: &str) -> Option<String> {
    let favorites = self.dashboard.favorites();
    let by_number = which
      .parse::<usize>()
      .ok()
      .and_then(|n| n.checked_sub(1))
      .and_then(|idx| favorites.get(idx));

    by_number
      .or_else(|| favorites.iter().find(|city| *city == which))
      .map(str::to_string)
  }

  fn toggle_favorite(&mut self) -> Reply {
    let Some(city) = self.dashboard.weather().map(|w| w.location.name.clone()) else {
      return Reply::Notice("Search for a city first.".into());
    };

    match self.dashboard.toggle_favorite() {
      Ok(Some(Toggle::Added)) => Reply::Render(Some(format!("Added {} to favorites.", city))),
      Ok(Some(Toggle::Removed)) => Reply::Render(Some(format!("Removed {} from favorites.", city))),
      Ok(None) => Reply::Nothing,
      Err(e) => {
        warn!("Could not save favorites: {}", e);
        Reply::Notice(format!("Could not save favorites: {}", e))
      }
    }
  }

  fn render(&self, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{}", self.dashboard.view())?;
    writeln!(out)
  }
}

/// The event loop: user lines and lookup results are handled one at a time
/// on the calling task. After end of input it keeps running until the startup
/// position and every spawned lookup have been handled.
#[instrument(skip_all)]
pub async fn run<S, R, W>(
  mut session: Session<S>,
  mut responses: mpsc::UnboundedReceiver<Response>,
  geolocator: Arc<dyn Geolocator>,
  input: R,
  out: &mut W,
) -> std::io::Result<()>
where
  S: KeyValueStore,
  R: AsyncBufRead + Unpin,
  W: Write,
{
  let (position_tx, mut position_rx) = mpsc::unbounded_channel();
  tokio::spawn(async move {
    match geolocator.current_position().await {
      Ok(position) => {
        let _ = position_tx.send(position);
      }
      Err(e) => warn!("Startup geolocation skipped: {}", e),
    }
  });

  let mut lines = input.lines();
  let mut reading = true;
  let mut locating = true;
  session.render(out)?;
  prompt(out)?;

  loop {
    if !reading && !locating && session.pending() == 0 {
      break;
    }

    tokio::select! {
      position = position_rx.recv(), if locating => match position {
        Some(position) => {
          info!("Located at {}", position.as_query());
          session.located(position);
        }
        None => locating = false,
      },
      Some(response) = responses.recv() => {
        if session.apply(response) == QueryOutcome::Applied {
          session.render(out)?;
          prompt(out)?;
        }
      }
      line = lines.next_line(), if reading => {
        let line = match line {
          Ok(Some(line)) => line,
          Ok(None) => {
            debug!(pending = session.pending(), "End of input");
            reading = false;
            continue;
          }
          Err(e) => {
            error!("Failed to read input: {}", e);
            reading = false;
            continue;
          }
        };

        if line.trim().is_empty() {
          prompt(out)?;
          continue;
        }

        let command = match line.parse::<Command>() {
          Ok(command) => command,
          Err(e) => {
            writeln!(out, "{}", e)?;
            prompt(out)?;
            continue;
          }
        };

        match session.execute(command) {
          Reply::Render(notice) => {
            if let Some(notice) = notice {
              writeln!(out, "{}", notice)?;
            }
            session.render(out)?;
          }
          Reply::Notice(text) => writeln!(out, "{}", text)?,
          Reply::Nothing => {}
          Reply::Quit => break,
        }
        prompt(out)?;
      }
    }
  }

  Ok(())
}

fn prompt(out: &mut impl Write) -> std::io::Result<()> {
  write!(out, "> ")?;
  out.flush()
}
