use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::duo::RetentionLimits;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Runtime settings read from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// Origins allowed by CORS; empty allows none.
    pub allowed_origins: Vec<String>,
    pub retention: RetentionLimits,
    pub default_window_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            allowed_origins: Vec::new(),
            retention: RetentionLimits::default(),
            default_window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name).map(|raw| raw.trim().to_string()) {
        None => Ok(default),
        Some(raw) if raw.is_empty() => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
    }
}

impl AppConfig {
    /// Process environment, falling back to a `.env` file in the working directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_file(".env")
    }

    /// Process variables win over the file; a missing file is ignored.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file_vars: HashMap<String, String> = match dotenvy::from_path_iter(path.as_ref()) {
            Ok(items) => items.filter_map(Result::ok).collect(),
            Err(_) => HashMap::new(),
        };
        Self::from_lookup(|name| env::var(name).ok().or_else(|| file_vars.get(name).cloned()))
    }

    /// Builds the config from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = RetentionLimits::default();
        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            port: parsed(&lookup, "PORT", DEFAULT_PORT)?,
            allowed_origins,
            retention: RetentionLimits {
                max_matches: parsed(&lookup, "DUO_MAX_MATCHES", defaults.max_matches)?,
                max_events: parsed(&lookup, "DUO_MAX_EVENTS", defaults.max_events)?,
                max_journals: parsed(&lookup, "DUO_MAX_JOURNALS", defaults.max_journals)?,
            },
            default_window_days: parsed(&lookup, "DEFAULT_WINDOW_DAYS", DEFAULT_WINDOW_DAYS)?,
        })
    }
}
