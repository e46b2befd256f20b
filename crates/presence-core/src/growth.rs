//! Growth projection
//!
//! Turns the composites of the first and last committed attempts into a
//! week-by-week trajectory. The actual path is a straight line between the two
//! composites; the baseline path is whatever [`BaselinePolicy`] says an
//! uncoached learner would do. The two paths share a length and the score
//! domain, nothing else.

use crate::error::ConfigError;
use crate::score::{clamp_score, ScoreVector};
use serde::{Deserialize, Serialize};

/// Default projection horizon in weeks
pub const DEFAULT_WEEKS: usize = 6;

/// Longest projection horizon a config may ask for
pub const MAX_WEEKS: usize = 520;

/// Static no-intervention curve used when nothing else is configured
pub const DEFAULT_BASELINE: [f64; DEFAULT_WEEKS] = [2.0, 3.0, 3.8, 4.8, 5.8, 6.5];

/// How the no-intervention path is derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BaselinePolicy {
    /// Fixed points, resampled to the horizon when the lengths differ
    Static { points: Vec<f64> },
    /// Drift around the first composite: `c_first - below` to `c_first + above`
    Offset { below: f64, above: f64 },
    /// Independent straight line
    Linspace { start: f64, end: f64 },
}

impl Default for BaselinePolicy {
    fn default() -> Self {
        BaselinePolicy::Static {
            points: DEFAULT_BASELINE.to_vec(),
        }
    }
}

impl BaselinePolicy {
    /// Check the policy can produce finite values
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            BaselinePolicy::Static { points } => {
                if points.is_empty() {
                    return Err(ConfigError::EmptyBaseline);
                }
                if points.iter().any(|p| !p.is_finite()) {
                    return Err(ConfigError::NonFiniteBaseline);
                }
            }
            BaselinePolicy::Offset { below, above } => {
                if !below.is_finite() || !above.is_finite() {
                    return Err(ConfigError::NonFiniteBaseline);
                }
            }
            BaselinePolicy::Linspace { start, end } => {
                if !start.is_finite() || !end.is_finite() {
                    return Err(ConfigError::NonFiniteBaseline);
                }
            }
        }
        Ok(())
    }

    fn path(&self, first_composite: f64, weeks: usize) -> Vec<f64> {
        match self {
            BaselinePolicy::Static { points } => resample(points, weeks),
            BaselinePolicy::Offset { below, above } => linspace(
                first_composite - below,
                first_composite + above,
                weeks,
            ),
            BaselinePolicy::Linspace { start, end } => linspace(*start, *end, weeks),
        }
    }
}

/// Baseline and actual paths over the same horizon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyTrajectory {
    pub weeks: Vec<String>,
    pub baseline: Vec<f64>,
    pub actual: Vec<f64>,
}

impl WeeklyTrajectory {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.actual.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }

    /// Change in the actual path across the horizon
    #[must_use]
    pub fn gain(&self) -> f64 {
        match (self.actual.first(), self.actual.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }

    /// `(week label, baseline, actual)` rows
    pub fn rows(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.weeks
            .iter()
            .zip(self.baseline.iter().zip(&self.actual))
            .map(|(w, (b, a))| (w.as_str(), *b, *a))
    }
}

/// Derives [`WeeklyTrajectory`] values from attempt composites
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthProjector {
    weeks: usize,
    baseline: BaselinePolicy,
}

impl Default for GrowthProjector {
    fn default() -> Self {
        Self {
            weeks: DEFAULT_WEEKS,
            baseline: BaselinePolicy::default(),
        }
    }
}

impl GrowthProjector {
    /// Create a projector; `weeks` must lie in `2..=MAX_WEEKS`
    pub fn new(weeks: usize, baseline: BaselinePolicy) -> Result<Self, ConfigError> {
        if weeks < 2 {
            return Err(ConfigError::TooFewWeeks(weeks));
        }
        if weeks > MAX_WEEKS {
            return Err(ConfigError::TooManyWeeks(weeks));
        }
        baseline.validate()?;
        Ok(Self { weeks, baseline })
    }

    #[inline]
    #[must_use]
    pub fn weeks(&self) -> usize {
        self.weeks
    }

    #[must_use]
    pub fn baseline_policy(&self) -> &BaselinePolicy {
        &self.baseline
    }

    /// Project from the first and last attempt vectors
    #[must_use]
    pub fn project(&self, first: &ScoreVector, last: &ScoreVector) -> WeeklyTrajectory {
        self.project_composites(first.composite(), last.composite())
    }

    /// Project from two composites
    ///
    /// `actual[0]` and `actual[weeks - 1]` are exactly the clamped composites.
    #[must_use]
    pub fn project_composites(&self, first: f64, last: f64) -> WeeklyTrajectory {
        let first = clamp_score(first);
        let last = clamp_score(last);
        let actual = linspace(first, last, self.weeks);
        let baseline = self
            .baseline
            .path(first, self.weeks)
            .into_iter()
            .map(clamp_score)
            .collect();
        tracing::debug!(first, last, weeks = self.weeks, "projected growth trajectory");
        WeeklyTrajectory {
            weeks: week_labels(self.weeks),
            baseline,
            actual,
        }
    }
}

/// Axis labels: `Week 1`, then `W2`, `W3`, ...
#[must_use]
pub fn week_labels(weeks: usize) -> Vec<String> {
    (1..=weeks)
        .map(|w| {
            if w == 1 {
                "Week 1".to_string()
            } else {
                format!("W{w}")
            }
        })
        .collect()
}

/// `n` evenly spaced points from `start` to `end`, both included exactly
fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let span = (n - 1) as f64;
            let step = end - start;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * (i as f64 / span)).collect();
            out[n - 1] = end;
            out
        }
    }
}

/// Linear resampling of `points` onto `n` evenly spaced positions
fn resample(points: &[f64], n: usize) -> Vec<f64> {
    if points.len() == n {
        return points.to_vec();
    }
    match points {
        [] => vec![0.0; n],
        [only] => vec![*only; n],
        _ => {
            let last = (points.len() - 1) as f64;
            (0..n)
                .map(|i| {
                    let pos = if n == 1 {
                        0.0
                    } else {
                        i as f64 * last / (n - 1) as f64
                    };
                    let lo = pos.floor() as usize;
                    let hi = (lo + 1).min(points.len() - 1);
                    let t = pos - lo as f64;
                    points[lo] + (points[hi] - points[lo]) * t
                })
                .collect()
        }
    }
}
