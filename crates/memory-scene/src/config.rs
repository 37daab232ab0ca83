//! Scene configuration read from the environment.

use memory_core::BotDifficulty;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TICK_MS: u64 = 16;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an integer, got '{value}'")]
    NotANumber { var: &'static str, value: String },

    #[error("MEMORY_TICK_MS must be between 1 and 1000, got {0}")]
    TickOutOfRange(u64),

    #[error("MEMORY_AUTOPLAY: {0}")]
    UnknownDifficulty(String),
}

/// Runtime settings for a scene session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneConfig {
    /// Frame interval
    pub tick: Duration,
    /// Fixed board seed, random when absent
    pub seed: Option<u64>,
    /// Let a bot play instead of reading picks from stdin
    pub autoplay: Option<BotDifficulty>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            seed: None,
            autoplay: None,
        }
    }
}

impl SceneConfig {
    /// Load from `MEMORY_TICK_MS`, `MEMORY_SEED` and `MEMORY_AUTOPLAY`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = parse_u64(&lookup, "MEMORY_TICK_MS")? {
            if !(1..=1000).contains(&ms) {
                return Err(ConfigError::TickOutOfRange(ms));
            }
            config.tick = Duration::from_millis(ms);
        }

        config.seed = parse_u64(&lookup, "MEMORY_SEED")?;

        if let Some(raw) = lookup("MEMORY_AUTOPLAY").filter(|s| !s.trim().is_empty()) {
            config.autoplay = Some(raw.parse().map_err(ConfigError::UnknownDifficulty)?);
        }

        Ok(config)
    }
}

fn parse_u64<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::NotANumber { var, value }),
    }
}
