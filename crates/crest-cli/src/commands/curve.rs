use std::path::Path;

use anyhow::bail;
use serde::Serialize;
use tracing::debug;

use crest_config::Config;
use crest_scoring::{NodeUsage, Score, ScoringConfig, true_score};

/// One sampled point of the curve: the deterministic score at a usage
/// fraction, for each requested node scale.
#[derive(Debug, Serialize)]
pub struct SamplePoint {
    pub fraction: f64,
    pub scores: Vec<Score>,
}

/// Evaluate the curve at `samples` evenly spaced fractions across [0, 1],
/// endpoints included, for every scale in `scales`.
pub fn sample(config: &ScoringConfig, scales: &[f64], samples: usize) -> Vec<SamplePoint> {
    let last = samples.saturating_sub(1).max(1);
    (0..samples.max(2))
        .map(|i| {
            let fraction = i as f64 / last as f64;
            SamplePoint {
                fraction,
                scores: scales
                    .iter()
                    .map(|&scale| true_score(config, NodeUsage { fraction, scale }))
                    .collect(),
            }
        })
        .collect()
}

pub fn run(path: &Path, scales: &[f64], samples: usize, json: bool) -> anyhow::Result<()> {
    let config = Config::from_file(path)?;
    for &scale in scales {
        if !(0.0..=1.0).contains(&scale) || scale == 0.0 {
            bail!("--scale {scale} is outside (0, 1]");
        }
    }

    debug!(?scales, samples, "sampling scoring curve");
    let points = sample(&config.scoring, scales, samples);

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    print!("{:>8} ", "usage");
    for scale in scales {
        print!("{:>10} ", format!("s={scale}"));
    }
    println!();
    for point in &points {
        print!("{:>8.2} ", point.fraction);
        for score in &point.scores {
            print!("{score:>10} ");
        }
        println!();
    }
    Ok(())
}
