//! File-backed score store.
//!
//! The file is a JSON object mapping keys to strings, like browser local
//! storage. Other keys in the file are preserved on write.
//!
//! ```json
//! { "memoryGameBestScore": "104" }
//! ```

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::{parse_score, ScoreStore, StoreError};
use crate::core::GameConfig;

/// Best score persisted under a key in a JSON file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    key: String,
}

impl FileStore {
    /// Create a store for `key` in the file at `path`.
    ///
    /// The file is not touched until the first read or write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Create a store in the file at `path` under the configured
    /// `best_score_key`.
    #[must_use]
    pub fn for_config(path: impl Into<PathBuf>, config: &GameConfig) -> Self {
        Self::new(path, config.best_score_key.as_str())
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Sibling file written before the rename, e.g. `scores.json.tmp`.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Load the key/value map. A missing file is an empty map.
    fn load(&self) -> Result<Map<String, Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Map::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Map::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl ScoreStore for FileStore {
    fn get(&self) -> Option<u32> {
        let map = match self.load() {
            Ok(map) => map,
            Err(err) => {
                log::warn!("cannot read best score from {}: {}", self.path.display(), err);
                return None;
            }
        };

        match map.get(&self.key)? {
            Value::String(raw) => parse_score(raw),
            other => {
                log::warn!("ignoring non-string best score {} under {:?}", other, self.key);
                None
            }
        }
    }

    /// Fails rather than overwrite a file it cannot parse.
    fn set(&mut self, score: u32) -> Result<(), StoreError> {
        let mut map = self.load()?;
        map.insert(self.key.clone(), Value::String(score.to_string()));

        let contents = serde_json::to_string_pretty(&Value::Object(map))?;
        let tmp = self.temp_path();
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;

        log::debug!("persisted best score {} to {}", score, self.path.display());
        Ok(())
    }
}
