//! Engine configuration
//!
//! Configuration loaded from a .sieve.toml file. The first file found wins:
//! 1. the path in `SIEVE_CONFIG`
//! 2. `.sieve.toml` in the current working directory
//! 3. `.sieve.toml` in the home directory

use serde::{Deserialize, Serialize};
use sieve_diff::{TrimOptions, DEFAULT_CONTEXT_RADIUS, DEFAULT_MERGE_GAP};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = ".sieve.toml";
const CONFIG_ENV: &str = "SIEVE_CONFIG";

/// Configuration loaded from .sieve.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SieveConfig {
    /// Unchanged lines kept on each side of an annotated line
    #[serde(default = "default_context_radius")]
    pub context_radius: usize,

    /// Windows at most this many lines apart are merged (1 joins touching windows)
    #[serde(default = "default_merge_gap")]
    pub merge_gap: usize,

    /// Annotation store, relative to the workspace root
    #[serde(default = "default_annotations_file")]
    pub annotations_file: String,
}

fn default_context_radius() -> usize {
    DEFAULT_CONTEXT_RADIUS
}

fn default_merge_gap() -> usize {
    DEFAULT_MERGE_GAP
}

fn default_annotations_file() -> String {
    ".sieve/annotations.json".to_string()
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            context_radius: default_context_radius(),
            merge_gap: default_merge_gap(),
            annotations_file: default_annotations_file(),
        }
    }
}

impl SieveConfig {
    /// Load the first config file found, or use defaults
    pub fn load() -> Self {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        for path in search_paths(explicit, dirs::home_dir()) {
            if let Some(config) = Self::load_from(&path) {
                return config;
            }
        }
        log::debug!("Using default sieve config");
        Self::default()
    }

    /// Load config from one file, or `None` when it cannot be read
    pub fn load_from(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        log::debug!("Reading config from {}", path.display());
        Some(Self::from_toml(&content))
    }

    /// Parse config file content, falling back to defaults when it is invalid
    pub fn from_toml(content: &str) -> Self {
        match toml::from_str(content) {
            Ok(config) => {
                log::info!("Loaded sieve config from file");
                config
            }
            Err(e) => {
                log::warn!("Failed to parse config file: {}", e);
                Self::default()
            }
        }
    }

    /// Trimming parameters for the diff engine
    pub fn trim_options(&self) -> TrimOptions {
        TrimOptions {
            context_radius: self.context_radius,
            merge_gap: self.merge_gap,
        }
    }
}

/// Config file locations in lookup order
fn search_paths(explicit: Option<PathBuf>, home: Option<PathBuf>) -> Vec<PathBuf> {
    explicit
        .into_iter()
        .chain(std::iter::once(PathBuf::from(CONFIG_FILE)))
        .chain(home.map(|home| home.join(CONFIG_FILE)))
        .collect()
}
