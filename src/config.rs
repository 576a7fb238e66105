//! Configuration for docstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a docstore root
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory holding one file per collection
    /// Internal structure:
    ///   {root_dir}/
    ///     ├── users.json
    ///     └── orders.json
    pub root_dir: PathBuf,

    // -------------------------------------------------------------------------
    // File Format Configuration
    // -------------------------------------------------------------------------
    /// Spaces per indentation level in collection files
    pub indent: usize,

    /// fsync the collection file after every save
    pub sync_writes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from(Self::DEFAULT_ROOT),
            indent: 2,
            sync_writes: false,
        }
    }
}

impl Config {
    /// Root directory name used when the caller supplies none
    pub const DEFAULT_ROOT: &'static str = "Storage";

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Default config rooted at `path`
    pub fn for_root(path: impl Into<PathBuf>) -> Self {
        Self::builder().root_dir(path).build()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the root directory
    pub fn root_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.root_dir = path.into();
        self
    }

    /// Set the indentation width (in spaces)
    pub fn indent(mut self, width: usize) -> Self {
        self.config.indent = width;
        self
    }

    /// Enable or disable fsync after each save
    pub fn sync_writes(mut self, enabled: bool) -> Self {
        self.config.sync_writes = enabled;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
