// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Read from YAML at `$DOTSKETCH_CONFIG`, or `config.yaml` in the platform
//! config directory. Every key is optional.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "DOTSKETCH_CONFIG";
const APP_DIR: &str = "dotsketch";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Base URL of the contents API, or of a proxy in front of it.
    pub endpoint: String,
    /// Environment variable holding an optional bearer token.
    pub token_env: String,
    pub default_path: String,
    pub default_message: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.github.com".to_string(),
            token_env: "DOTSKETCH_UPLOAD_TOKEN".to_string(),
            default_path: "dottodot/my-art.json".to_string(),
            default_message: "feat: Add new dot-to-dot artwork".to_string(),
        }
    }
}

impl UploadConfig {
    /// Token from the configured environment variable, if set and non-empty.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where project records are stored.
    pub storage_dir: Option<PathBuf>,
    pub upload: UploadConfig,
    pub window: WindowConfig,
}

impl Config {
    /// Load configuration from an explicit file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.yaml"))
    }

    /// Load from the default location. A missing file yields defaults; an
    /// invalid one is logged and also yields defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path).unwrap_or_else(|e| {
                log::warn!("{:#}; using default configuration", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    /// Resolved project storage directory.
    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("projects")
        })
    }
}
