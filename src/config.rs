use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::play::DriverConfig;
use crate::quiz::QuizRules;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Option bounds are inverted: min {min} > max {max}")]
    InvalidOptionBounds { min: usize, max: usize },
}

/// Configuration for the idle play cleanup task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupConfig {
    /// How often to run the cleanup task
    pub cleanup_interval: Duration,
    /// How long a play must be inactive before it is unmounted
    pub inactivity_threshold: Duration,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            cleanup_interval: Duration::from_secs(5 * 60),
            inactivity_threshold: Duration::from_secs(60 * 60),
        }
    }
}

/// Server configuration, read from `GAMESHOW_*` environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// Base URL of the remote gameshow API; `None` serves the built-in demo game
    pub api_url: Option<String>,
    pub driver: DriverConfig,
    pub rules: QuizRules,
    pub cleanup: CleanupConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            api_url: None,
            driver: DriverConfig::default(),
            rules: QuizRules::default(),
            cleanup: CleanupConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let rules = QuizRules {
            min_options: parse_or(&get, "GAMESHOW_MIN_OPTIONS", defaults.rules.min_options)?,
            max_options: parse_or(&get, "GAMESHOW_MAX_OPTIONS", defaults.rules.max_options)?,
            randomize_questions: parse_or(
                &get,
                "GAMESHOW_RANDOMIZE_QUESTIONS",
                defaults.rules.randomize_questions,
            )?,
        };
        if rules.min_options > rules.max_options {
            return Err(ConfigError::InvalidOptionBounds {
                min: rules.min_options,
                max: rules.max_options,
            });
        }

        let timeout_secs: u64 = parse_or(
            &get,
            "GAMESHOW_EVALUATION_TIMEOUT_SECS",
            defaults.driver.evaluation_timeout.as_secs(),
        )?;
        let idle_minutes: u64 = parse_or(
            &get,
            "GAMESHOW_IDLE_MINUTES",
            defaults.cleanup.inactivity_threshold.as_secs() / 60,
        )?;
        let cleanup_secs: u64 = parse_or(
            &get,
            "GAMESHOW_CLEANUP_INTERVAL_SECS",
            defaults.cleanup.cleanup_interval.as_secs(),
        )?;
        for (key, value) in [
            ("GAMESHOW_EVALUATION_TIMEOUT_SECS", timeout_secs),
            ("GAMESHOW_CLEANUP_INTERVAL_SECS", cleanup_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: "0".to_string(),
                });
            }
        }
        let idle_secs = idle_minutes
            .checked_mul(60)
            .ok_or_else(|| ConfigError::InvalidValue {
                key: "GAMESHOW_IDLE_MINUTES",
                value: idle_minutes.to_string(),
            })?;

        Ok(Self {
            bind_addr: get("GAMESHOW_BIND_ADDR").unwrap_or(defaults.bind_addr),
            api_url: get("GAMESHOW_API_URL"),
            driver: DriverConfig {
                evaluation_timeout: Duration::from_secs(timeout_secs),
            },
            rules,
            cleanup: CleanupConfig {
                cleanup_interval: Duration::from_secs(cleanup_secs),
                inactivity_threshold: Duration::from_secs(idle_secs),
            },
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}
