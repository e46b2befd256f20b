//! Error types for the presence engine
//!
//! Every interaction-level failure is recoverable: the session applies the
//! fallback named by [`SessionError::fallback`] and surfaces a notice instead
//! of tearing down the interaction loop. Only configuration errors are fatal,
//! and those happen before a session exists.

use crate::score::VectorShape;

/// Main session error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// Unknown scenario key passed to select
    #[error("scenario not found: {key}")]
    ScenarioNotFound { key: String },

    /// Wrong number of values for a vector shape
    #[error("{shape} vector expects {expected} values, got {actual}")]
    DimensionMismatch {
        shape: VectorShape,
        expected: usize,
        actual: usize,
    },

    /// Value that cannot be clamped into the score range
    #[error("score for {label} is not a finite number: {value}")]
    OutOfRange { label: String, value: f64 },

    /// Navigation target outside the known page set
    #[error("unknown page: {name}")]
    InvalidPage { name: String },

    /// Page navigation attempted from the dashboard
    #[error("no scenario selected")]
    NoActiveScenario,

    /// Attempt index outside `1..=max`
    #[error("attempt {attempt} is outside 1..={max}")]
    AttemptOutOfRange { attempt: usize, max: usize },

    /// Save requested with no pending edit
    #[error("no pending edit to save")]
    NothingPending,

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Safe state the session falls back to after an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Return to the scenario list
    Dashboard,
    /// Stay in the scenario, on its overview page
    Overview,
    /// Keep the current position; stored data is untouched
    Unchanged,
}

impl SessionError {
    /// Check if the interaction loop can continue after this error
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Config(_))
    }

    /// Fallback position applied by the session
    #[must_use]
    pub fn fallback(&self) -> Fallback {
        match self {
            Self::ScenarioNotFound { .. } | Self::NoActiveScenario => Fallback::Dashboard,
            Self::InvalidPage { .. } => Fallback::Overview,
            Self::DimensionMismatch { .. }
            | Self::OutOfRange { .. }
            | Self::AttemptOutOfRange { .. }
            | Self::NothingPending
            | Self::Config(_) => Fallback::Unchanged,
        }
    }

    /// Short message suitable for an informational banner
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ScenarioNotFound { key } => {
                format!("Scenario \"{key}\" is not available. Pick one from the dashboard.")
            }
            Self::DimensionMismatch { shape, expected, .. } => {
                format!("{shape} scores need exactly {expected} values; nothing was saved.")
            }
            Self::OutOfRange { label, .. } => {
                format!("{label} needs a number between 0 and 10; nothing was saved.")
            }
            Self::InvalidPage { name } => {
                format!("\"{name}\" is not a page of this scenario. Showing the overview.")
            }
            Self::NoActiveScenario => "Select a scenario first.".to_string(),
            Self::AttemptOutOfRange { max, .. } => {
                format!("This scenario records attempts 1 to {max}.")
            }
            Self::NothingPending => "There are no adjusted scores to save.".to_string(),
            Self::Config(e) => e.to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Trajectory needs at least two weeks
    #[error("weeks must be at least 2, got {0}")]
    TooFewWeeks(usize),

    /// Horizon past the longest supported projection
    #[error("weeks must be at most 520, got {0}")]
    TooManyWeeks(usize),

    /// Static baseline with no points
    #[error("static baseline needs at least one point")]
    EmptyBaseline,

    /// Baseline value that is not a finite number
    #[error("baseline contains a non-finite value")]
    NonFiniteBaseline,

    /// Scenario definition that breaks catalog rules
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    /// TOML could not be parsed
    #[error("invalid config: {0}")]
    Parse(String),
}
