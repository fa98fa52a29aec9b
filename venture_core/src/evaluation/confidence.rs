//! Bounded confidence percentage
//!
//! Confidence is a newtype around an integer percent that enforces the
//! [0, 100] range. Fractional scores are rounded to the nearest integer
//! percent on construction; NaN is rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Confidence percent in [0, 100]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Confidence(u8);

#[derive(Error, Debug)]
pub enum ConfidenceError {
    #[error("Confidence score cannot be NaN")]
    NaN,

    #[error("Confidence out of bounds: {value} (must be 0 to 100)")]
    OutOfBounds { value: f64 },
}

impl Confidence {
    pub const MIN: Confidence = Confidence(0);
    pub const MAX: Confidence = Confidence(100);

    /// Create a confidence percent with bounds validation.
    ///
    /// # Errors
    /// Returns `ConfidenceError::OutOfBounds` if value > 100
    pub fn new(value: u8) -> Result<Self, ConfidenceError> {
        if value > 100 {
            return Err(ConfidenceError::OutOfBounds {
                value: value as f64,
            });
        }
        Ok(Self(value))
    }

    /// Create a confidence percent, clamping into [0, 100].
    pub const fn saturating(value: u8) -> Self {
        if value > 100 {
            Self(100)
        } else {
            Self(value)
        }
    }

    /// Convert a fractional score to an integer percent: rejects NaN,
    /// clamps into [0, 100], rounds to nearest.
    pub fn from_score(score: f64) -> Result<Self, ConfidenceError> {
        if score.is_nan() {
            return Err(ConfidenceError::NaN);
        }
        Ok(Self(score.clamp(0.0, 100.0).round() as u8))
    }

    /// The integer percent value
    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<f64> for Confidence {
    type Error = ConfidenceError;
    fn try_from(score: f64) -> Result<Self, Self::Error> {
        Self::from_score(score)
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}
