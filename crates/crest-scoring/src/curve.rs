//! The node usage-scoring curve.
//!
//! Maps how full a node is to a comparable score so the scheduler can rank
//! candidates, preferring a configured utilization sweet spot over both
//! empty and packed nodes.
//!
//! # Curve form
//!
//! Piecewise-linear with a single peak. On the unit interval the curve runs
//! through three configured points,
//!
//! ```text
//! (0, min_usage_score)   (score_peak, 1)   (1, max_usage_score)
//! ```
//!
//! rising linearly on `[0, score_peak]` and falling linearly on
//! `[score_peak, 1]`. The node's relative capacity then scales the whole
//! curve: a node half the size of the largest candidate scores at most half
//! of [`MAX_SCORE`], so filling big nodes toward their peak always beats
//! spreading the same load thinly across small ones.
//!
//! Scores are integers in `[MIN_SCORE, MAX_SCORE]`. The curve is evaluated
//! in `f64` and rounded once at the end; inputs outside their documented
//! domains are clamped, never rejected.

use rand::Rng;

use crate::config::ScoringConfig;

/// Score assigned to a candidate node. Higher ranks first.
pub type Score = i64;

/// Lowest score the curve can produce.
pub const MIN_SCORE: Score = 0;

/// Highest score the curve can produce, attained by the largest node at the
/// configured peak usage fraction.
pub const MAX_SCORE: Score = 100;

/// Per-node inputs to one scoring evaluation.
///
/// Plain value data, rebuilt from the node's live resource state on every
/// scheduling cycle; carries no identity and is discarded after the call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeUsage {
    /// How full the node is: allocated resources over total capacity, 0..=1.
    pub fraction: f64,
    /// The node's total capacity relative to the largest candidate node, in
    /// (0, 1] — 1 for the largest node itself.
    pub scale: f64,
}

impl NodeUsage {
    /// Build usage ratios from raw capacity numbers.
    ///
    /// `used` and `total` describe this node; `largest_total` is the
    /// biggest total capacity among the cycle's candidates. Ratios are
    /// clamped into their documented domains; a node reporting zero
    /// capacity comes out full (`fraction` 1) and weightless (`scale` 0),
    /// ranking last.
    pub fn from_capacity(used: f64, total: f64, largest_total: f64) -> Self {
        let fraction = if total > 0.0 {
            (used / total).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let scale = if largest_total > 0.0 {
            (total / largest_total).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { fraction, scale }
    }
}

/// Maximum achievable value for a size class, before integer rounding.
///
/// The scaling law lives here and nowhere else: linear in `scale`.
fn peak_value(scale: f64) -> f64 {
    MAX_SCORE as f64 * scale.clamp(0.0, 1.0)
}

/// Highest score a node of the given relative size can attain — the value
/// of the curve at `score_peak` for that size class.
pub fn peak_score(scale: f64) -> Score {
    peak_value(scale).round() as Score
}

/// The unscaled curve: a usage fraction's score relative to the peak, which
/// is 1 by definition.
///
/// Each sloped branch is only reachable when its denominator is non-zero:
/// a peak at 0 or 1 routes the endpoint through the equality arm.
fn unit_curve(config: &ScoringConfig, fraction: f64) -> f64 {
    let x = fraction.clamp(0.0, 1.0);
    let peak = config.score_peak;
    if x < peak {
        // Rising edge: (0, min_usage_score) → (peak, 1).
        config.min_usage_score + (1.0 - config.min_usage_score) * x / peak
    } else if x > peak {
        // Falling edge: (peak, 1) → (1, max_usage_score).
        config.max_usage_score + (1.0 - config.max_usage_score) * (1.0 - x) / (1.0 - peak)
    } else {
        1.0
    }
}

/// Deterministic curve value for a node: the configured curve at the node's
/// usage fraction, scaled by its size class.
///
/// Always within `[MIN_SCORE, MAX_SCORE]`. `randomize` is ignored here —
/// this is the true score that [`score_node`] perturbs.
pub fn true_score(config: &ScoringConfig, usage: NodeUsage) -> Score {
    (peak_value(usage.scale) * unit_curve(config, usage.fraction)).round() as Score
}

/// Score a candidate node.
///
/// With `randomize` off this is exactly [`true_score`]. With it on, the
/// returned score is drawn uniformly from `[MIN_SCORE + 1, true_score]`,
/// spreading otherwise-tied placements across similarly-scored nodes
/// instead of always electing the same one; scores already at or next to
/// the floor are returned unperturbed. The draw never exceeds the true
/// score and never goes below [`MIN_SCORE`].
///
/// Randomness comes only from the caller's `rng`: concurrent scheduling
/// cycles supply their own generators, and tests pass a seeded one.
pub fn score_node(config: &ScoringConfig, usage: NodeUsage, rng: &mut impl Rng) -> Score {
    let score = true_score(config, usage);
    if config.randomize && score > MIN_SCORE + 1 {
        rng.gen_range(MIN_SCORE + 1..=score)
    } else {
        score
    }
}
