// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use std::str::FromStr;

pub const HELP: &str = "\
Commands:
  search <city>   look up a city (a bare city name works too)
  unit            switch between °C and °F
  fav             add or remove the shown city from favorites
  check <n|city>  look up a favorite by number or name
  favorites       list favorite cities
  show            redraw the dashboard
  help            this text
  quit            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  Search(String),
  Unit,
  Favorite,
  Check(String),
  Favorites,
  Show,
  Help,
  Quit,
}

impl FromStr for Command {
  type Err = &'static str;

  fn from_str(line: &str) -> Result<Self, Self::Err> {
    let line = line.trim();
    if line.is_empty() {
      return Err("empty input");
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
      Some((word, rest)) => (word, rest.trim()),
      None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
      "search" | "s" => Self::Search(rest.to_string()),
      "unit" | "u" if rest.is_empty() => Self::Unit,
      "fav" | "f" if rest.is_empty() => Self::Favorite,
      "check" | "c" if !rest.is_empty() => Self::Check(rest.to_string()),
      "check" | "c" => return Err("check needs a favorite number or name"),
      "favorites" if rest.is_empty() => Self::Favorites,
      "show" if rest.is_empty() => Self::Show,
      "help" | "?" if rest.is_empty() => Self::Help,
      "quit" | "exit" | "q" if rest.is_empty() => Self::Quit,
      _ => Self::Search(line.to_string()),
    };
    Ok(command)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse(line: &str) -> Command {
    line.parse().unwrap()
  }

  #[test]
  fn keywords() {
    assert_eq!(parse("unit"), Command::Unit);
    assert_eq!(parse("  FAV "), Command::Favorite);
    assert_eq!(parse("show"), Command::Show);
    assert_eq!(parse("favorites"), Command::Favorites);
    assert_eq!(parse("q"), Command::Quit);
    assert_eq!(parse("help"), Command::Help);
  }

  #[test]
  fn search_forms() {
    assert_eq!(parse("search New York"), Command::Search("New York".into()));
    assert_eq!(parse("London"), Command::Search("London".into()));
    assert_eq!(parse("51.5,-0.12"), Command::Search("51.5,-0.12".into()));
    assert_eq!(parse("search"), Command::Search(String::new()));
  }

  #[test]
  fn city_names_starting_with_keywords() {
    assert_eq!(parse("Show Low"), Command::Search("Show Low".into()));
    assert_eq!(parse("Unity Village"), Command::Search("Unity Village".into()));
    assert_eq!(parse("help me"), Command::Search("help me".into()));
  }

  #[test]
  fn check_needs_argument() {
    assert_eq!(parse("check 2"), Command::Check("2".into()));
    assert_eq!(parse("check Lima"), Command::Check("Lima".into()));
    assert!("check".parse::<Command>().is_err());
    assert!("   ".parse::<Command>().is_err());
  }
}
