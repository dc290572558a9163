//! Scoring curve parameters.

use serde::{Deserialize, Serialize};

use crate::error::InvalidConfig;

/// Parameters of the node usage-scoring curve.
///
/// Three ratios pin the curve's shape (see [`crate::curve`] for the exact
/// form): the score of a completely empty node (`min_usage_score`) and of a
/// completely full one (`max_usage_score`), both relative to the maximum at
/// `score_peak` — the usage fraction where scoring tops out.
///
/// Decoded from the `scoring` object of the plugin's JSON configuration.
/// Must pass [`ScoringConfig::validate`] exactly once before the first
/// scoring call and is read-only from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ScoringConfig {
    /// Score ratio at usage fraction 0, relative to the peak score.
    pub min_usage_score: f64,

    /// Score ratio at usage fraction 1, relative to the peak score.
    pub max_usage_score: f64,

    /// Usage fraction at which the score is maximal, with the curve sloping
    /// down on either side towards `min_usage_score` at 0 and
    /// `max_usage_score` at 1.
    pub score_peak: f64,

    /// Replace the computed score with a uniform draw from
    /// `[MIN_SCORE + 1, score]`, spreading otherwise-tied placements across
    /// similarly-scored nodes.
    #[serde(default)]
    pub randomize: bool,
}

const UNIT_INTERVAL_MSG: &str = "value must be between 0 and 1, inclusive";

impl ScoringConfig {
    /// Check every curve parameter, reporting the first violation.
    ///
    /// Paths in the returned error are the bare JSON field names; callers
    /// embedding this config re-root them with [`InvalidConfig::nested`].
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !(0.0..=1.0).contains(&self.min_usage_score) {
            return Err(InvalidConfig::new("minUsageScore", UNIT_INTERVAL_MSG));
        }
        if !(0.0..=1.0).contains(&self.max_usage_score) {
            return Err(InvalidConfig::new("maxUsageScore", UNIT_INTERVAL_MSG));
        }
        if !(0.0..=1.0).contains(&self.score_peak) {
            return Err(InvalidConfig::new("scorePeak", UNIT_INTERVAL_MSG));
        }
        Ok(())
    }
}
