//! Database Module
//!
//! The root handle: one directory holding one JSON file per collection.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::collection::CollectionStore;
use crate::config::Config;
use crate::error::{DocError, Result};

/// Root directory handle
///
/// Hands out [`CollectionStore`]s bound to `<root>/<name>.json`.
#[derive(Debug, Clone)]
pub struct Database {
    config: Config,
}

impl Database {
    const EXTENSION: &'static str = "json";

    /// Open or create the root directory named in `config`
    pub fn open(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.root_dir)?;

        info!(root = %config.root_dir.display(), "Opened database root");
        Ok(Self { config })
    }

    /// Open a root directory with default settings
    pub fn named(root: impl Into<PathBuf>) -> Result<Self> {
        Self::open(Config::for_root(root))
    }

    /// Open or create the collection `name`
    ///
    /// The file `<root>/<name>.json` is initialized to `{}` if absent.
    pub fn collection(&self, name: &str) -> Result<CollectionStore> {
        validate_name(name)?;

        let path = self.collection_path(name);
        debug!(collection = name, path = %path.display(), "Opening collection");

        CollectionStore::open(path, &self.config)
    }

    /// Names of the collections currently present, sorted
    pub fn collection_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.config.root_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(name) = Self::parse_collection_name(&path) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// File path for the collection `name`
    pub fn collection_path(&self, name: &str) -> PathBuf {
        self.config
            .root_dir
            .join(format!("{}.{}", name, Self::EXTENSION))
    }

    /// Get the root directory path
    pub fn root(&self) -> &Path {
        &self.config.root_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// "users.json" → Some("users")
    fn parse_collection_name(path: &Path) -> Option<String> {
        if path.extension()? != Self::EXTENSION {
            return None;
        }
        Some(path.file_stem()?.to_string_lossy().into_owned())
    }
}

/// Reject names that would escape the root or produce no file stem
fn validate_name(name: &str) -> Result<()> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if bad {
        return Err(DocError::InvalidName(name.to_string()));
    }
    Ok(())
}
