// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Migration configuration.
//!
//! Configuration is read from a TOML file and includes:
//! - `[gitlab]`: API endpoint and private token for the target tracker
//! - `[retry]`: how many attempts a rate-limited call gets and the cooldown
//!   between them
//!
//! The file is looked up in order: an explicit `--config` path, `FERRY_CONFIG`,
//! `./ferry.toml`, then `<config dir>/ferry/config.toml`. When none exists the
//! defaults apply. `GITLAB_API_ENDPOINT` and `GITLAB_API_PRIVATE_TOKEN`
//! override whatever the file says.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::retry::RetryPolicy;

const LOCAL_CONFIG_FILE: &str = "ferry.toml";
const CONFIG_DIR_NAME: &str = "ferry";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_ENDPOINT: &str = "https://gitlab.com/api/v4";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gitlab: GitlabConfig,
    pub retry: RetryConfig,
}

/// Target tracker connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitlabConfig {
    /// Base URL of the REST API, e.g. `https://gitlab.example.com/api/v4`.
    pub endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_token: Option<String>,
}

impl Default for GitlabConfig {
    fn default() -> Self {
        GitlabConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            private_token: None,
        }
    }
}

/// Rate-limit retry settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts per remote call, including the first (default: 3).
    pub max_attempts: u32,
    /// Seconds to wait after a rate-limited attempt (default: 60).
    pub cooldown_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: 3,
            cooldown_secs: 60,
        }
    }
}

impl Config {
    /// Loads configuration from the first file found, applies environment
    /// overrides and validates the result.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match find_config_file(explicit)? {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Config::from_file(&path)?
            }
            None => Config::default(),
        };
        config.apply_env(env::lookup);
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses one TOML file without overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Config::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("failed to parse config: {}", e)))
    }

    /// Overrides endpoint and token from the environment.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(env::vars::GITLAB_API_ENDPOINT) {
            self.gitlab.endpoint = endpoint;
        }
        if let Some(token) = lookup(env::vars::GITLAB_API_PRIVATE_TOKEN) {
            self.gitlab.private_token = Some(token);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(Error::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        let endpoint = self.gitlab.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(Error::Config(format!(
                "invalid gitlab endpoint '{}': must start with http:// or https://",
                self.gitlab.endpoint
            )));
        }
        Ok(())
    }

    /// Returns the private token, required for any remote call.
    pub fn private_token(&self) -> Result<&str> {
        self.gitlab.private_token.as_deref().ok_or_else(|| {
            Error::Config(format!(
                "no GitLab private token\n  hint: set {} or [gitlab] private_token",
                env::vars::GITLAB_API_PRIVATE_TOKEN
            ))
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_secs(self.retry.cooldown_secs),
        )
    }
}

/// Resolves the config file to read, if any.
///
/// An explicitly named file must exist; discovered locations are optional.
pub fn find_config_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit.map(Path::to_path_buf).or_else(env::config_path) {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        return Ok(Some(path));
    }

    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(user_config_file().filter(|path| path.is_file()))
}

/// `<config dir>/ferry/config.toml`, when the platform has a config dir.
pub fn user_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
