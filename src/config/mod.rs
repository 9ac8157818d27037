// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Every field is optional on disk; accessors fall back to [`defaults`] and clamp
//! out-of-range values so a hand-edited file can never produce a zero page size
//! or an unbounded probe pool.
//!
//! # Examples
//!
//! ```no_run
//! use bucket_lens::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Point it at a bucket
//! config.endpoint = Some("https://photos.example.com/bucket".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/test_settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.endpoint, config.endpoint);
//! std::fs::remove_dir_all("./temp_config_dir").unwrap();
//! ```

pub mod defaults;

use crate::error::Result;
use defaults::{
    DEFAULT_MAX_CONCURRENT_PROBES, DEFAULT_METADATA_CACHE_CAPACITY, DEFAULT_MIN_FILE_SIZE_BYTES,
    DEFAULT_PAGE_SIZE, DEFAULT_USER_AGENT, MAX_CONCURRENT_PROBES, MAX_METADATA_CACHE_CAPACITY,
    MAX_MIN_FILE_SIZE_BYTES, MAX_PAGE_SIZE, MIN_CONCURRENT_PROBES, MIN_METADATA_CACHE_CAPACITY,
    MIN_PAGE_SIZE,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "BucketLens";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Bucket endpoint, e.g. `https://s3.example.com/photos`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Objects smaller than this many bytes are left out of the gallery.
    #[serde(default)]
    pub min_file_size: Option<u64>,
    #[serde(default)]
    pub page_size: Option<usize>,
    #[serde(default)]
    pub max_concurrent_probes: Option<usize>,
    #[serde(default)]
    pub metadata_cache_capacity: Option<usize>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            min_file_size: Some(DEFAULT_MIN_FILE_SIZE_BYTES),
            page_size: Some(DEFAULT_PAGE_SIZE),
            max_concurrent_probes: Some(DEFAULT_MAX_CONCURRENT_PROBES),
            metadata_cache_capacity: Some(DEFAULT_METADATA_CACHE_CAPACITY),
            user_agent: None,
        }
    }
}

impl Config {
    #[must_use]
    pub fn min_file_size(&self) -> u64 {
        self.min_file_size
            .unwrap_or(DEFAULT_MIN_FILE_SIZE_BYTES)
            .min(MAX_MIN_FILE_SIZE_BYTES)
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn max_concurrent_probes(&self) -> usize {
        self.max_concurrent_probes
            .unwrap_or(DEFAULT_MAX_CONCURRENT_PROBES)
            .clamp(MIN_CONCURRENT_PROBES, MAX_CONCURRENT_PROBES)
    }

    #[must_use]
    pub fn metadata_cache_capacity(&self) -> usize {
        self.metadata_cache_capacity
            .unwrap_or(DEFAULT_METADATA_CACHE_CAPACITY)
            .clamp(MIN_METADATA_CACHE_CAPACITY, MAX_METADATA_CACHE_CAPACITY)
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
