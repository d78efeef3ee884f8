//! Tunable weights and limits applied by the ranker.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::RankError;

/// Number of matches kept when no limit is configured.
pub const DEFAULT_TOP_N: usize = 3;

/// Relative weighting of the three sub-scores in the composite score.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Multiplier applied to the distance sub-score.
    pub distance: f64,
    /// Multiplier applied to the specialization sub-score.
    pub specialization: f64,
    /// Multiplier applied to the capacity sub-score.
    pub capacity: f64,
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`RankError::InvalidWeights`] when any value is negative or not
    /// finite, or when the total weight is zero.
    pub fn validate(self) -> Result<Self, RankError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(RankError::InvalidWeights)
        }
    }

    fn is_valid(self) -> bool {
        self.has_finite_values() && self.has_non_negative_values() && self.has_non_zero_total()
    }

    const fn has_finite_values(self) -> bool {
        self.distance.is_finite() && self.specialization.is_finite() && self.capacity.is_finite()
    }

    const fn has_non_negative_values(self) -> bool {
        self.distance >= 0.0 && self.specialization >= 0.0 && self.capacity >= 0.0
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "validation sums weights to ensure a non-zero total"
    )]
    fn has_non_zero_total(self) -> bool {
        (self.distance + self.specialization + self.capacity) != 0.0
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            distance: 0.5,
            specialization: 0.3,
            capacity: 0.2,
        }
    }
}

/// Complete ranker configuration.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankerConfig {
    /// Sub-score weights.
    pub weights: ScoreWeights,
    /// Maximum number of matches reported.
    pub top_n: usize,
}

impl RankerConfig {
    /// Validate weights and limits and return a copy.
    ///
    /// # Errors
    /// Returns [`RankError::InvalidWeights`] for unusable weights and
    /// [`RankError::InvalidTopN`] when `top_n` is zero.
    pub fn validate(self) -> Result<Self, RankError> {
        self.weights.validate()?;
        if self.top_n == 0 {
            return Err(RankError::InvalidTopN);
        }
        Ok(self)
    }
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_config_is_valid() {
        assert!(RankerConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case(ScoreWeights { distance: -0.1, specialization: 0.3, capacity: 0.2 })]
    #[case(ScoreWeights { distance: f64::NAN, specialization: 0.3, capacity: 0.2 })]
    #[case(ScoreWeights { distance: 0.5, specialization: f64::INFINITY, capacity: 0.2 })]
    #[case(ScoreWeights { distance: 0.0, specialization: 0.0, capacity: 0.0 })]
    fn rejects_unusable_weights(#[case] weights: ScoreWeights) {
        assert_eq!(weights.validate(), Err(RankError::InvalidWeights));
    }

    #[rstest]
    fn accepts_single_non_zero_weight() {
        let weights = ScoreWeights {
            distance: 1.0,
            specialization: 0.0,
            capacity: 0.0,
        };
        assert_eq!(weights.validate(), Ok(weights));
    }

    #[rstest]
    fn rejects_zero_top_n() {
        let config = RankerConfig {
            top_n: 0,
            ..RankerConfig::default()
        };
        assert_eq!(config.validate(), Err(RankError::InvalidTopN));
    }
}
