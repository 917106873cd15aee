// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use std::collections::HashMap;
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Once;

static INIT: Once = Once::new();
static DEFAULT_FILENAME: &str = ".env";

#[derive(Debug, Default)]
pub struct Dotenv {
  vars: HashMap<String, String>,
}

impl Dotenv {
  pub fn new() -> Self {
    Self::default()
  }

  /// Loads `KEY=value` pairs from a `.env` file.
  ///
  /// Blank lines and `#` comments are skipped, surrounding quotes are stripped.
  /// Returns `Ok(false)` when the file does not exist.
  pub fn load_from_file<P: AsRef<Path>>(&mut self, filename: Option<P>) -> Result<bool, Error> {
    let path = filename.map_or_else(
      || PathBuf::from(DEFAULT_FILENAME),
      |p| p.as_ref().to_path_buf(),
    );

    if !path.exists() {
      return Ok(false);
    }

    let reader = BufReader::new(File::open(&path)?);

    for (line_num, line) in reader.lines().enumerate() {
      let line = line?;
      let trimmed = line.trim();

      if trimmed.is_empty() || trimmed.starts_with('#') {
        continue;
      }

      let (key, value) = parse_line(trimmed).map_err(|err| {
        Error::ConfigError(format!(
          "{}: error on line {}: {}",
          path.display(),
          line_num + 1,
          err
        ))
      })?;
      self.vars.insert(key, value);
    }

    Ok(true)
  }

  /// Exports the loaded pairs; variables already set in the process win.
  pub fn set_env_vars(&self) {
    for (key, value) in &self.vars {
      if env::var_os(key).is_none() {
        env::set_var(key, value);
      }
    }
  }

  pub fn get(&self, key: &str) -> Option<&String> {
    self.vars.get(key)
  }
}

fn parse_line(line: &str) -> Result<(String, String), &'static str> {
  let (key, value) = line.split_once('=').ok_or("missing '='")?;

  let key = key.trim();
  if key.is_empty() {
    return Err("empty key");
  }

  let value = value.trim().trim_matches('"').trim_matches('\'');
  Ok((key.to_string(), value.to_string()))
}

/// Loads `./.env` into the process environment once.
pub fn load() -> Result<(), Error> {
  let mut result = Ok(());
  INIT.call_once(|| {
    let mut dotenv = Dotenv::new();
    match dotenv.load_from_file::<&str>(None) {
      Ok(true) => {
        dotenv.set_env_vars();
        tracing::debug!("Loaded {}", DEFAULT_FILENAME);
      }
      Ok(false) => {}
      Err(err) => result = Err(err),
    }
  });
  result
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn parses_pairs_comments_and_quotes() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# secrets\n\nWEATHERAPI_KEY=\"abc123\"\nNAME = 'sky'").unwrap();

    let mut dotenv = Dotenv::new();
    assert!(dotenv.load_from_file(Some(file.path())).unwrap());
    assert_eq!(dotenv.get("WEATHERAPI_KEY").map(String::as_str), Some("abc123"));
    assert_eq!(dotenv.get("NAME").map(String::as_str), Some("sky"));
  }

  #[test]
  fn value_may_contain_equals() {
    assert_eq!(
      parse_line("URL=http://x?a=b").unwrap(),
      ("URL".to_string(), "http://x?a=b".to_string())
    );
  }

  #[test]
  fn malformed_line_reports_line_number() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "OK=1\nbroken").unwrap();

    let err = Dotenv::new().load_from_file(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("line 2"));
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let loaded = Dotenv::new()
      .load_from_file(Some(dir.path().join(".env")))
      .unwrap();
    assert!(!loaded);
  }
}
