// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// String-to-string persistent storage.
pub trait KeyValueStore {
  fn get(&self, key: &str) -> Result<Option<String>, Error>;
  fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  entries: HashMap<String, String>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>, Error> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
    self.entries.insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// All keys live in one JSON object file. Every `set` rewrites the file
/// through a temporary sibling and a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
  path: PathBuf,
}

impl FileStore {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Raw file content; `None` when the file is missing or blank.
  fn read_content(&self) -> Result<Option<String>, Error> {
    if !self.path.exists() {
      return Ok(None);
    }

    let content = fs::read_to_string(&self.path)?;
    Ok((!content.trim().is_empty()).then_some(content))
  }

  fn parse(&self, content: &str) -> Result<BTreeMap<String, String>, Error> {
    serde_json::from_str(content).map_err(|e| {
      Error::StorageError(format!("{} is not a storage file: {}", self.path.display(), e))
    })
  }

  fn read_all(&self) -> Result<BTreeMap<String, String>, Error> {
    match self.read_content()? {
      Some(content) => self.parse(&content),
      None => Ok(BTreeMap::new()),
    }
  }
}

impl KeyValueStore for FileStore {
  fn get(&self, key: &str) -> Result<Option<String>, Error> {
    Ok(self.read_all()?.remove(key))
  }

  #[instrument(skip(self, value), fields(path = %self.path.display()))]
  fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
    let mut entries = match self.read_content()? {
      Some(content) => self.parse(&content).unwrap_or_else(|e| {
        warn!("Overwriting unreadable storage: {}", e);
        BTreeMap::new()
      }),
      None => BTreeMap::new(),
    };
    entries.insert(key.to_string(), value.to_string());

    let content = serde_json::to_string_pretty(&entries)?;
    update_file_atomically(&self.path, &content)?;
    debug!("Stored {} bytes under {:?}", value.len(), key);
    Ok(())
  }
}

fn update_file_atomically(path: &Path, content: &str) -> Result<(), Error> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)?;
  }

  let temp_path = path.with_extension("tmp");
  fs::write(&temp_path, content)?;
  fs::rename(&temp_path, path)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn memory_store_overwrites() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("favorites").unwrap(), None);

    store.set("favorites", "[]").unwrap();
    store.set("favorites", "[\"Oslo\"]").unwrap();
    assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[\"Oslo\"]"));
  }

  #[test]
  fn file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("storage.json"));
    assert_eq!(store.get("favorites").unwrap(), None);
  }

  #[test]
  fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("storage.json");

    let mut store = FileStore::new(&path);
    store.set("favorites", "[\"Oslo\",\"Lima\"]").unwrap();
    store.set("other", "x").unwrap();

    let reopened = FileStore::new(&path);
    assert_eq!(
      reopened.get("favorites").unwrap().as_deref(),
      Some("[\"Oslo\",\"Lima\"]")
    );
    assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
    assert!(!path.with_extension("tmp").exists());
  }

  #[test]
  fn file_store_rejects_garbage_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "not json").unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(store.get("favorites"), Err(Error::StorageError(_))));
  }

  #[test]
  fn file_store_set_replaces_garbage_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    fs::write(&path, "not json").unwrap();

    let mut store = FileStore::new(&path);
    store.set("favorites", "[]").unwrap();
    assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[]"));
  }
}
