// src/store/kv.rs
//! File-backed key-value substrate shared by the note store and the theme
//! preference. One file per key under the swot data directory.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::Result;

const DATA_DIR: &str = ".swot";

/// Resolve the data directory: `$SWOT_HOME` if set, else `~/.swot`.
pub fn default_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("SWOT_HOME") {
        return PathBuf::from(dir);
    }

    env::var("HOME")
        .map(|home| Path::new(&home).join(DATA_DIR))
        .unwrap_or_else(|_| PathBuf::from(DATA_DIR))
}

/// A durable string value per key, read and written wholesale.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn open_default() -> Self {
        Self::new(default_data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the value stored under `key`, or `None` if it was never written.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.dir.join(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write `value` under `key`, creating the data directory if needed.
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.dir.join(key), value).await?;
        Ok(())
    }
}
