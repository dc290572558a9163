use std::path::Path;

use tracing::debug;

use crest_config::Config;

pub fn run(path: &Path) -> anyhow::Result<()> {
    let config = Config::from_file(path)?;
    debug!(path = %path.display(), "policy accepted");

    println!("✓ {} is a valid policy", path.display());
    println!("  scheduler:  {}", config.scheduler_name);
    println!(
        "  curve:      min {} · peak at {} · max {}{}",
        config.scoring.min_usage_score,
        config.scoring.score_peak,
        config.scoring.max_usage_score,
        if config.scoring.randomize {
            " (randomized)"
        } else {
            ""
        },
    );
    println!("  watermark:  {}", config.watermark);
    if !config.ignored_namespaces.is_empty() {
        println!("  ignoring:   {}", config.ignored_namespaces.join(", "));
    }
    Ok(())
}
