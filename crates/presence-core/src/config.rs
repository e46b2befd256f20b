//! Session configuration
//!
//! Everything here has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! weeks = 6
//! granularity = "tenth"
//!
//! [baseline]
//! kind = "offset"
//! below = 1.0
//! above = 0.5
//! ```

use crate::error::ConfigError;
use crate::growth::{BaselinePolicy, GrowthProjector, DEFAULT_WEEKS};
use crate::score::{clamp_score, SCORE_MAX, SCORE_MIN};
use serde::{Deserialize, Serialize};

/// Step size of a single score input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// 0.1 steps (sliders)
    #[default]
    Tenth,
    /// Whole-number steps
    Whole,
}

impl Granularity {
    #[inline]
    #[must_use]
    pub fn step(self) -> f64 {
        match self {
            Granularity::Tenth => 0.1,
            Granularity::Whole => 1.0,
        }
    }
}

/// Input constraint handed to rendering layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ScoreScale {
    #[must_use]
    pub fn new(granularity: Granularity) -> Self {
        Self {
            min: SCORE_MIN,
            max: SCORE_MAX,
            step: granularity.step(),
        }
    }

    /// Clamp into `[min, max]`
    #[inline]
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        clamp_score(value)
    }

    /// Clamp, then round to the nearest step
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        let steps = (self.clamp(value) / self.step).round();
        // Round-trip through the decimal step count so 0.1 steps print cleanly.
        let snapped = if self.step < 1.0 {
            steps / (1.0 / self.step).round()
        } else {
            steps * self.step
        };
        snapped.clamp(self.min, self.max)
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Projection horizon (W)
    pub weeks: usize,
    /// Score input step
    pub granularity: Granularity,
    /// No-intervention curve
    pub baseline: BaselinePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            weeks: DEFAULT_WEEKS,
            granularity: Granularity::default(),
            baseline: BaselinePolicy::default(),
        }
    }
}

impl SessionConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With projection horizon
    #[inline]
    #[must_use]
    pub fn with_weeks(mut self, weeks: usize) -> Self {
        self.weeks = weeks;
        self
    }

    /// With input granularity
    #[inline]
    #[must_use]
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// With baseline policy
    #[inline]
    #[must_use]
    pub fn with_baseline(mut self, baseline: BaselinePolicy) -> Self {
        self.baseline = baseline;
        self
    }

    /// Parse from TOML and validate
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig =
            toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.projector().map(|_| ())
    }

    /// Projector for this configuration
    pub fn projector(&self) -> Result<GrowthProjector, ConfigError> {
        GrowthProjector::new(self.weeks, self.baseline.clone())
    }

    #[must_use]
    pub fn scale(&self) -> ScoreScale {
        ScoreScale::new(self.granularity)
    }
}
