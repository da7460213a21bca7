//! Runtime configuration.
//!
//! Loaded from TOML; every field is optional and falls back to its default.
//!
//! ```toml
//! playback_interval_ms = 300
//! sampling_rate = 10
//! live_delay_ms = 5
//! seed = 42
//!
//! [layout]
//! count = 8
//! width = 1024.0
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TspError};
use crate::instance::CityLayout;
use crate::playback::{DEFAULT_INTERVAL_MS, MIN_INTERVAL_MS};

/// Settings shared by a [`Session`](crate::session::Session).
///
/// # Examples
///
/// ```
/// use tsp_stepper::config::Config;
///
/// let config = Config::default()
///     .with_playback_interval_ms(250)
///     .with_sampling_rate(5);
/// assert_eq!(config.playback_interval_ms, 250);
/// assert!(config.validate().is_ok());
///
/// let parsed = Config::from_toml_str("sampling_rate = 3").unwrap();
/// assert_eq!(parsed.sampling_rate, 3);
/// assert_eq!(parsed.playback_interval_ms, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playback timer interval in milliseconds (≥ 100).
    pub playback_interval_ms: u64,
    /// Record every N-th permutation in brute-force traces (≥ 1).
    pub sampling_rate: usize,
    /// Pause between live-search permutations; 0 only yields.
    pub live_delay_ms: u64,
    /// City generation settings.
    pub layout: CityLayout,
    /// Seed for city generation (random when absent).
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            playback_interval_ms: DEFAULT_INTERVAL_MS,
            sampling_rate: 1,
            live_delay_ms: 0,
            layout: CityLayout::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Checks every field against its domain.
    pub fn validate(&self) -> Result<()> {
        if self.playback_interval_ms < MIN_INTERVAL_MS {
            return Err(TspError::invalid_config(format!(
                "playback_interval_ms must be at least {MIN_INTERVAL_MS}, got {}",
                self.playback_interval_ms
            )));
        }
        if self.sampling_rate == 0 {
            return Err(TspError::invalid_config("sampling_rate must be at least 1"));
        }
        self.layout.validate()
    }

    /// Sets the playback interval.
    pub fn with_playback_interval_ms(mut self, ms: u64) -> Self {
        self.playback_interval_ms = ms;
        self
    }

    /// Sets the brute-force trace sampling rate.
    pub fn with_sampling_rate(mut self, rate: usize) -> Self {
        self.sampling_rate = rate;
        self
    }

    /// Sets the live-search delay.
    pub fn with_live_delay_ms(mut self, ms: u64) -> Self {
        self.live_delay_ms = ms;
        self
    }

    /// Sets the city layout.
    pub fn with_layout(mut self, layout: CityLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the city generation seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Live-search delay as a [`Duration`].
    pub fn live_delay(&self) -> Duration {
        Duration::from_millis(self.live_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.playback_interval_ms, 500);
        assert_eq!(config.sampling_rate, 1);
        assert_eq!(config.live_delay(), Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_full_toml() {
        let source = r#"
            playback_interval_ms = 300
            sampling_rate = 10
            live_delay_ms = 5
            seed = 42

            [layout]
            count = 8
            width = 1024.0
        "#;
        let config = Config::from_toml_str(source).expect("valid toml");
        assert_eq!(config.playback_interval_ms, 300);
        assert_eq!(config.sampling_rate, 10);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.layout.count, 8);
        assert_eq!(config.layout.width, 1024.0);
        assert_eq!(config.layout.height, 600.0);
    }

    #[test]
    fn test_rejects_fast_interval() {
        let err = Config::from_toml_str("playback_interval_ms = 50").unwrap_err();
        assert!(matches!(err, TspError::InvalidConfig { .. }));
    }

    #[test]
    fn test_rejects_zero_sampling_rate() {
        assert!(Config::default().with_sampling_rate(0).validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = Config::from_toml_str("sampling_rate = \"many\"").unwrap_err();
        assert!(matches!(err, TspError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_path("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, TspError::Io(_)));
    }
}
