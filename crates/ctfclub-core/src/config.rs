//! Backend and classifier configuration.
//!
//! Values come from `~/.config/ctfclub/config.json` when it exists, then
//! `CTFCLUB_*` environment variables override individual fields.
//! Nothing is written back.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::classify::{ActiveWindow, DEFAULT_ACTIVE_WINDOW_HOURS, MAX_ACTIVE_WINDOW_HOURS};

/// Application name used for config/cache directory paths
pub const APP_NAME: &str = "ctfclub";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// HTTP request timeout in seconds, handed to the transport.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const ENV_URL: &str = "CTFCLUB_SUPABASE_URL";
const ENV_ANON_KEY: &str = "CTFCLUB_SUPABASE_ANON_KEY";
const ENV_ACTIVE_WINDOW: &str = "CTFCLUB_ACTIVE_WINDOW_HOURS";
const ENV_TIMEOUT: &str = "CTFCLUB_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub supabase_url: String,
    pub anon_key: String,
    pub active_window_hours: i64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            anon_key: String::new(),
            active_window_hours: DEFAULT_ACTIVE_WINDOW_HOURS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load from the config file (if any) and the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) if path.exists() => {
                let contents = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse {}", path.display()))?
            }
            _ => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from a key lookup (the environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_URL) {
            self.supabase_url = url;
        }
        if let Some(key) = lookup(ENV_ANON_KEY) {
            self.anon_key = key;
        }
        if let Some(hours) = lookup(ENV_ACTIVE_WINDOW) {
            self.active_window_hours = hours
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of hours", ENV_ACTIVE_WINDOW))?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT) {
            self.request_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", ENV_TIMEOUT))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.supabase_url.trim().is_empty() {
            return Err(anyhow!("Backend URL is not configured (set {})", ENV_URL));
        }
        if !self.supabase_url.starts_with("http://") && !self.supabase_url.starts_with("https://") {
            return Err(anyhow!("Backend URL must start with http:// or https://"));
        }
        if self.anon_key.trim().is_empty() {
            return Err(anyhow!("Anon key is not configured (set {})", ENV_ANON_KEY));
        }
        if self.active_window_hours < 0 {
            return Err(anyhow!("Active window cannot be negative"));
        }
        if self.active_window_hours > MAX_ACTIVE_WINDOW_HOURS {
            return Err(anyhow!(
                "Active window cannot exceed {} hours",
                MAX_ACTIVE_WINDOW_HOURS
            ));
        }
        Ok(())
    }

    pub fn active_window(&self) -> ActiveWindow {
        ActiveWindow::hours(self.active_window_hours)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files
    pub fn log_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join("logs"))
    }
}
