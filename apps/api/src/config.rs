use std::str::FromStr;

use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed values fail start-up.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Width range searched when a request names neither bound.
    pub default_min_width: usize,
    pub default_max_width: usize,
    /// Hard cap on grid columns; bounds the width scan.
    pub max_cols: usize,
    pub max_phrase_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            default_min_width: 14,
            default_max_width: 24,
            max_cols: 30,
            max_phrase_chars: 200,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let config = Config {
            port: env_or("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            default_min_width: env_or("PUZZLE_MIN_WIDTH", defaults.default_min_width)?,
            default_max_width: env_or("PUZZLE_MAX_WIDTH", defaults.default_max_width)?,
            max_cols: env_or("PUZZLE_MAX_COLS", defaults.max_cols)?,
            max_phrase_chars: env_or("PUZZLE_MAX_PHRASE_CHARS", defaults.max_phrase_chars)?,
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        ensure!(
            self.default_min_width >= 1 && self.default_min_width <= self.default_max_width,
            "PUZZLE_MIN_WIDTH ({}) must be between 1 and PUZZLE_MAX_WIDTH ({})",
            self.default_min_width,
            self.default_max_width
        );
        ensure!(
            self.default_max_width <= self.max_cols,
            "PUZZLE_MAX_WIDTH ({}) must not exceed PUZZLE_MAX_COLS ({})",
            self.default_max_width,
            self.max_cols
        );
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_consistent() {
        assert!(Config::default().check().is_ok());
    }

    #[test]
    fn test_inverted_default_range_rejected() {
        let config = Config {
            default_min_width: 20,
            default_max_width: 10,
            ..Config::default()
        };
        assert!(config.check().is_err());
    }

    #[test]
    fn test_default_range_above_column_cap_rejected() {
        let config = Config {
            max_cols: 20,
            ..Config::default()
        };
        assert!(config.check().is_err());
    }
}
