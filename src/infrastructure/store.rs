//! Keyed-document file storage

use crate::error::{Result, StarmarkError};
use crate::infrastructure::Config;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Abstract keyed-document storage.
///
/// Each storage key names one mapping from repository id to a record value;
/// a write replaces the whole document. This mirrors the original backing
/// store, where each key held one serialized map.
pub trait StorageBackend {
    /// Read the whole map stored under `key`; empty map if none exists.
    fn read_map<T: DeserializeOwned>(&self, key: &str) -> Result<BTreeMap<String, T>>;

    /// Replace the whole map stored under `key`.
    fn write_map<T: Serialize>(&self, key: &str, map: &BTreeMap<String, T>) -> Result<()>;
}

/// File system implementation: one TOML document per storage key under
/// `.starmark/`.
#[derive(Debug, Clone)]
pub struct FileStore {
    pub root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: PathBuf) -> Self {
        FileStore { root }
    }

    /// Discover the store root.
    /// First checks the STARMARK_ROOT environment variable, then falls back
    /// to walking up from the current directory.
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("STARMARK_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_starmark_dir(&path) {
                return Ok(FileStore::new(path));
            } else {
                return Err(StarmarkError::Config(format!(
                    "STARMARK_ROOT is set to '{}' but no .starmark directory found. \
                    Run 'starmark init' in that directory or unset STARMARK_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover the store root by walking up from a specific directory.
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_starmark_dir(&current) {
                return Ok(FileStore::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    return Err(StarmarkError::NotStarmarkDirectory(start.to_path_buf()));
                }
            }
        }
    }

    /// Check if a path contains a .starmark directory
    fn has_starmark_dir(path: &Path) -> bool {
        path.join(".starmark").is_dir()
    }

    pub fn is_initialized(&self) -> bool {
        Self::has_starmark_dir(&self.root)
    }

    /// Create the .starmark directory
    pub fn initialize(&self) -> Result<()> {
        let data_dir = self.data_dir();

        if data_dir.exists() {
            return Err(StarmarkError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&data_dir)?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn data_dir(&self) -> PathBuf {
        self.root.join(".starmark")
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.data_dir().join(format!("{}.toml", key))
    }
}

impl StorageBackend for FileStore {
    fn read_map<T: DeserializeOwned>(&self, key: &str) -> Result<BTreeMap<String, T>> {
        let path = self.document_path(key);

        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&path)?;
        Ok(toml::from_str(&contents)?)
    }

    fn write_map<T: Serialize>(&self, key: &str, map: &BTreeMap<String, T>) -> Result<()> {
        let data_dir = self.data_dir();
        if !data_dir.exists() {
            fs::create_dir(&data_dir)?;
        }

        let contents = toml::to_string_pretty(map)?;
        fs::write(self.document_path(key), contents)?;
        Ok(())
    }
}
