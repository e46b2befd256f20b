//! Identifier types shared across the engine

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique session identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based attempt number
///
/// Higher indices are later passes through the scenario. Range checks against a
/// scenario's attempt count happen in the attempt store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct AttemptIndex(usize);

/// Attempt number zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("attempt numbers start at 1")]
pub struct ZeroAttempt;

impl AttemptIndex {
    /// First attempt (the baseline pass)
    pub const FIRST: AttemptIndex = AttemptIndex(1);

    /// Create from a 1-based number; zero is not an attempt
    #[inline]
    #[must_use]
    pub fn new(n: usize) -> Option<Self> {
        (n >= 1).then_some(Self(n))
    }

    #[cfg(test)]
    pub(crate) const fn unchecked(n: usize) -> Self {
        Self(n)
    }

    /// 1-based number
    #[inline]
    #[must_use]
    pub fn get(self) -> usize {
        self.0
    }

    /// 0-based slot position
    #[inline]
    #[must_use]
    pub fn slot(self) -> usize {
        self.0 - 1
    }

    /// Caption used next to score inputs
    #[must_use]
    pub fn caption(self, last: usize) -> String {
        match self.0 {
            1 => "Attempt 1 (Baseline)".to_string(),
            n if n == last => format!("Attempt {n} (After Learning)"),
            n => format!("Attempt {n}"),
        }
    }
}

impl TryFrom<usize> for AttemptIndex {
    type Error = ZeroAttempt;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        Self::new(n).ok_or(ZeroAttempt)
    }
}

impl From<AttemptIndex> for usize {
    fn from(attempt: AttemptIndex) -> Self {
        attempt.0
    }
}

impl fmt::Display for AttemptIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attempt_zero_is_rejected() {
        assert!(AttemptIndex::new(0).is_none());
        assert_eq!(AttemptIndex::new(3).map(AttemptIndex::slot), Some(2));
    }

    #[test]
    fn captions_mark_baseline_and_last() {
        assert_eq!(AttemptIndex::FIRST.caption(2), "Attempt 1 (Baseline)");
        assert_eq!(AttemptIndex::new(2).unwrap().caption(2), "Attempt 2 (After Learning)");
        assert_eq!(AttemptIndex::new(2).unwrap().caption(3), "Attempt 2");
    }

    #[test]
    fn deserializing_zero_fails() {
        let err = serde_json::from_str::<AttemptIndex>("0").unwrap_err();
        assert!(err.to_string().contains("attempt numbers start at 1"));
        let two: AttemptIndex = serde_json::from_str("2").unwrap();
        assert_eq!(two.get(), 2);
        assert_eq!(serde_json::to_string(&two).unwrap(), "2");
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }
}
