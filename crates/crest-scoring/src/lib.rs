//! crest-scoring — the usage curve behind Crest's node ranking.
//!
//! This crate is the pure policy kernel of the Crest scheduler plugin. It
//! knows nothing about Kubernetes objects, reconcile queues, or the plugin
//! lifecycle: the plugin decodes a [`ScoringConfig`] at startup, validates
//! it exactly once, and then calls [`score_node`] once per candidate node
//! per scheduling cycle.
//!
//! # Scoring model
//!
//! ```text
//! unit(0)         = min_usage_score      (empty node)
//! unit(score_peak) = 1                   (the configured sweet spot)
//! unit(1)         = max_usage_score      (full node)
//!
//! score(node) = round( MAX_SCORE · node.scale · unit(node.fraction) )
//! ```
//!
//! rising linearly up to the peak and falling linearly after it, so that
//! nodes near the configured utilization sweet spot rank first, and bigger
//! nodes always out-rank smaller ones at the same fullness. With
//! `randomize` enabled the returned score is drawn uniformly from
//! `[MIN_SCORE + 1, score]` to spread tied placements.
//!
//! # Components
//!
//! - **`config`** — [`ScoringConfig`] curve parameters and their validation
//! - **`curve`** — curve evaluation, size scaling, randomized tie-breaking
//! - **`error`** — [`InvalidConfig`], the validation error with its JSON path
//!
//! Everything here is plain data and pure functions: `ScoringConfig` is
//! `Send + Sync` and safe to share immutably across concurrently running
//! scoring evaluations. Randomness comes only from a caller-supplied
//! generator, per evaluation context.

pub mod config;
pub mod curve;
pub mod error;

pub use config::ScoringConfig;
pub use curve::{MAX_SCORE, MIN_SCORE, NodeUsage, Score, peak_score, score_node, true_score};
pub use error::InvalidConfig;
