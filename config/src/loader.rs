//! Configuration loading utilities
//!
//! Locates a pacman.conf-style file and parses it with the requested parser
//! settings.

use crate::parser::{Parser, DEFAULT_MAX_INCLUDE_DEPTH};
use crate::{ConfigError, PacmanConfig, Result};
use std::path::{Path, PathBuf};

/// Path of the system configuration file
pub const SYSTEM_CONFIG_PATH: &str = "/etc/pacman.conf";

/// Configuration loader
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Primary configuration file
    path: PathBuf,
    /// Whether a missing file yields the defaults
    use_defaults: bool,
    /// Include nesting limit
    max_include_depth: usize,
}

impl ConfigLoader {
    /// Create a loader for the file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            use_defaults: false,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    /// Create a loader for the system configuration
    pub fn system() -> Self {
        Self::new(SYSTEM_CONFIG_PATH)
    }

    /// Set whether a missing file yields the default configuration
    pub fn use_defaults(mut self, use_defaults: bool) -> Self {
        self.use_defaults = use_defaults;
        self
    }

    /// Set how deeply `Include` directives may nest
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Load and parse the configuration
    pub fn load(&self) -> Result<PacmanConfig> {
        if !self.path.exists() {
            if self.use_defaults {
                tracing::debug!("{} not found, using defaults", self.path.display());
                return Ok(PacmanConfig::default());
            }
            return Err(ConfigError::NotFound(self.path.clone()));
        }

        let config = Parser::new()
            .max_include_depth(self.max_include_depth)
            .parse_file(&self.path)?;

        tracing::debug!(
            "Loaded {} with {} repositories",
            self.path.display(),
            config.repos.len()
        );
        Ok(config)
    }

    /// Get the configuration file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::system()
    }
}
