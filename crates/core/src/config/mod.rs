// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Emitter configuration
//!
//! ```toml
//! label = "jobs"
//! broadcast = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML syntax error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for a new [`Emitter`](crate::Emitter)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitterConfig {
    /// Shown in logs and `Debug` output
    pub label: Option<String>,
    /// Merge the process-wide broadcast listeners into every emit
    pub broadcast: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            label: None,
            broadcast: true,
        }
    }
}

impl EmitterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Never consult the broadcast registry
    pub fn standalone(mut self) -> Self {
        self.broadcast = false;
        self
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
