//! Scoring configuration
//!
//! Input limits for the quadratic alignment and the accuracy grade boundaries.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

/// Longest reference/hypothesis text scored, in chars
pub const DEFAULT_MAX_REFERENCE_CHARS: usize = 10_000;

/// Most words aligned per side
pub const DEFAULT_MAX_WORDS: usize = 1_000;

pub const DEFAULT_PERFECT_THRESHOLD: f64 = 100.0;
pub const DEFAULT_GOOD_THRESHOLD: f64 = 80.0;
pub const DEFAULT_NEEDS_PRACTICE_THRESHOLD: f64 = 60.0;

/// Settings for a [`crate::scorer::Scorer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Texts longer than this are truncated before scoring
    pub max_reference_chars: usize,
    /// Word lists longer than this are truncated before alignment
    pub max_words: usize,
    pub perfect_threshold: f64,
    pub good_threshold: f64,
    pub needs_practice_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_reference_chars: DEFAULT_MAX_REFERENCE_CHARS,
            max_words: DEFAULT_MAX_WORDS,
            perfect_threshold: DEFAULT_PERFECT_THRESHOLD,
            good_threshold: DEFAULT_GOOD_THRESHOLD,
            needs_practice_threshold: DEFAULT_NEEDS_PRACTICE_THRESHOLD,
        }
    }
}

impl ScoringConfig {
    /// Parse and validate a JSON config; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!("Loaded scoring config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_reference_chars == 0 {
            return Err(Error::Config(
                "max_reference_chars must be greater than zero".to_string(),
            ));
        }
        if self.max_words == 0 {
            return Err(Error::Config(
                "max_words must be greater than zero".to_string(),
            ));
        }

        for (name, value) in [
            ("perfect_threshold", self.perfect_threshold),
            ("good_threshold", self.good_threshold),
            ("needs_practice_threshold", self.needs_practice_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be within 0..=100, got {}",
                    name, value
                )));
            }
        }

        if self.needs_practice_threshold > self.good_threshold
            || self.good_threshold > self.perfect_threshold
        {
            return Err(Error::Config(
                "thresholds must satisfy needs_practice <= good <= perfect".to_string(),
            ));
        }

        Ok(())
    }
}
