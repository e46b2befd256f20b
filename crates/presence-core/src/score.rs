//! Score vectors
//!
//! A [`ScoreVector`] is a fixed-length, labeled set of ratings in
//! `[SCORE_MIN, SCORE_MAX]`. The label order of a [`VectorShape`] is the chart
//! axis order and never changes.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest rating a dimension can hold
pub const SCORE_MIN: f64 = 0.0;

/// Highest rating a dimension can hold
pub const SCORE_MAX: f64 = 10.0;

/// Presence footprint axis labels
pub const PRESENCE_LABELS: [&str; 5] = ["Gravitas", "Persuasion", "Vocal", "Gestures", "Brevity"];

/// Stage comparison labels
pub const STAGE_LABELS: [&str; 3] = ["Opening", "Objections", "Close"];

/// The two vector shapes recorded per attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorShape {
    /// 5-dimension presence footprint
    Presence,
    /// 3-dimension stage vector
    Stage,
}

impl VectorShape {
    /// Both shapes, presence first
    pub const ALL: [VectorShape; 2] = [VectorShape::Presence, VectorShape::Stage];

    /// Dimension labels in axis order
    #[inline]
    #[must_use]
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            VectorShape::Presence => &PRESENCE_LABELS,
            VectorShape::Stage => &STAGE_LABELS,
        }
    }

    /// Number of dimensions
    #[inline]
    #[must_use]
    pub fn dimensions(self) -> usize {
        self.labels().len()
    }

    /// Stable lowercase name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VectorShape::Presence => "presence",
            VectorShape::Stage => "stage",
        }
    }
}

impl fmt::Display for VectorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VectorShape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "presence" | "footprint" | "radar" => Ok(VectorShape::Presence),
            "stage" | "stages" | "bars" => Ok(VectorShape::Stage),
            other => Err(format!("unknown vector shape: {other} (use presence|stage)")),
        }
    }
}

/// A value that was pulled back into range during construction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClampedValue {
    pub label: &'static str,
    pub requested: f64,
    pub stored: f64,
}

/// Result of building a vector from raw input
#[derive(Debug, Clone, PartialEq)]
pub struct Clamped {
    pub vector: ScoreVector,
    pub adjustments: Vec<ClampedValue>,
}

impl Clamped {
    /// True when every input was already in range
    #[inline]
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.adjustments.is_empty()
    }
}

/// Fixed-length labeled rating vector
///
/// Deserialized input goes through [`ScoreVector::clamped`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScoreVector")]
pub struct ScoreVector {
    shape: VectorShape,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawScoreVector {
    shape: VectorShape,
    values: Vec<f64>,
}

impl TryFrom<RawScoreVector> for ScoreVector {
    type Error = SessionError;

    fn try_from(raw: RawScoreVector) -> Result<Self, Self::Error> {
        Self::clamped(raw.shape, &raw.values).map(|c| c.vector)
    }
}

impl ScoreVector {
    /// Build a presence vector from literal seed values
    #[must_use]
    pub fn presence(values: [f64; 5]) -> Self {
        Self::from_trusted(VectorShape::Presence, &values)
    }

    /// Build a stage vector from literal seed values
    #[must_use]
    pub fn stage(values: [f64; 3]) -> Self {
        Self::from_trusted(VectorShape::Stage, &values)
    }

    fn from_trusted(shape: VectorShape, values: &[f64]) -> Self {
        Self {
            shape,
            values: values.iter().map(|&v| clamp_score(v)).collect(),
        }
    }

    /// Validate raw input against `shape`
    ///
    /// Wrong length is rejected with `DimensionMismatch`, non-finite values with
    /// `OutOfRange`. Finite values outside the score range are clamped and
    /// listed in [`Clamped::adjustments`].
    pub fn clamped(shape: VectorShape, values: &[f64]) -> Result<Clamped, SessionError> {
        if values.len() != shape.dimensions() {
            return Err(SessionError::DimensionMismatch {
                shape,
                expected: shape.dimensions(),
                actual: values.len(),
            });
        }

        let mut stored = Vec::with_capacity(values.len());
        let mut adjustments = Vec::new();
        for (&label, &value) in shape.labels().iter().zip(values) {
            if !value.is_finite() {
                return Err(SessionError::OutOfRange {
                    label: label.to_string(),
                    value,
                });
            }
            let v = clamp_score(value);
            if v != value {
                adjustments.push(ClampedValue {
                    label,
                    requested: value,
                    stored: v,
                });
            }
            stored.push(v);
        }

        Ok(Clamped {
            vector: Self {
                shape,
                values: stored,
            },
            adjustments,
        })
    }

    #[inline]
    #[must_use]
    pub fn shape(&self) -> VectorShape {
        self.shape
    }

    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for a dimension label
    #[must_use]
    pub fn get(&self, label: &str) -> Option<f64> {
        self.shape
            .labels()
            .iter()
            .position(|l| l.eq_ignore_ascii_case(label))
            .and_then(|i| self.values.get(i).copied())
    }

    /// `(label, value)` pairs in axis order
    pub fn labeled(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.shape.labels().iter().copied().zip(self.values.iter().copied())
    }

    /// Arithmetic mean of all dimensions
    #[must_use]
    pub fn composite(&self) -> f64 {
        if self.values.is_empty() {
            return SCORE_MIN;
        }
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }
}

/// Clamp one rating into the score range; NaN maps to the floor
#[inline]
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        SCORE_MIN
    } else {
        value.clamp(SCORE_MIN, SCORE_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presence_composite_is_mean() {
        let v = ScoreVector::presence([5.0, 5.5, 6.0, 5.0, 4.8]);
        assert!((v.composite() - 5.26).abs() < 1e-12);
    }

    #[test]
    fn deserialized_vectors_are_validated() {
        let short = serde_json::from_str::<ScoreVector>(r#"{"shape":"presence","values":[99.0]}"#);
        assert!(short.unwrap_err().to_string().contains("expects 5"));

        let v: ScoreVector =
            serde_json::from_str(r#"{"shape":"stage","values":[12.0,4.0,-1.0]}"#).unwrap();
        assert_eq!(v.values(), &[10.0, 4.0, 0.0]);
        assert_eq!(v.get("close"), Some(0.0));
        assert_eq!(v.get("Brevity"), None);
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        let out = ScoreVector::clamped(VectorShape::Stage, &[11.0, -2.0, 5.0]).unwrap();
        assert_eq!(out.vector.values(), &[10.0, 0.0, 5.0]);
        assert_eq!(out.adjustments.len(), 2);
        assert_eq!(out.adjustments[0].label, "Opening");
        assert_eq!(out.adjustments[1].stored, 0.0);
    }

    #[test]
    fn clamped_rejects_wrong_length() {
        let err = ScoreVector::clamped(VectorShape::Presence, &[1.0, 2.0, 3.0, 4.0]).unwrap_err();
        assert_eq!(
            err,
            SessionError::DimensionMismatch {
                shape: VectorShape::Presence,
                expected: 5,
                actual: 4,
            }
        );
    }

    #[test]
    fn clamped_rejects_nan() {
        let err = ScoreVector::clamped(VectorShape::Stage, &[1.0, f64::NAN, 3.0]).unwrap_err();
        assert!(matches!(err, SessionError::OutOfRange { ref label, .. } if label == "Objections"));
    }

    #[test]
    fn labeled_follows_axis_order() {
        let v = ScoreVector::stage([6.0, 5.2, 4.6]);
        let labels: Vec<_> = v.labeled().map(|(l, _)| l).collect();
        assert_eq!(labels, STAGE_LABELS);
        assert_eq!(v.get("close"), Some(4.6));
    }

    #[test]
    fn shape_parses_aliases() {
        assert_eq!("Radar".parse::<VectorShape>().unwrap(), VectorShape::Presence);
        assert_eq!("bars".parse::<VectorShape>().unwrap(), VectorShape::Stage);
        assert!("pie".parse::<VectorShape>().is_err());
    }
}
